//! Transcription rate gate
//!
//! Protects a quota-limited speech-to-text service: calls are spaced by a
//! minimum interval, throttled calls are retried with exponential backoff
//! and jitter, and every other failure degrades to an empty transcript.
//!
//! # Architecture
//!
//! ```text
//! caller ──► GatedTranscriber ──► RateGate::acquire ──► Transcriber
//!                 ▲                                         │
//!                 └──── Throttled: sleep(backoff) ◄─────────┘
//! ```
//!
//! One [`RateGate`] is shared (via `Arc`) by every client of the same
//! service; the gate is explicit state rather than a global.

#![warn(missing_docs)]

mod backoff;
mod config;
mod error;
mod gated;
mod http;
mod mock;
mod rate_gate;

pub use backoff::{Backoff, RetryDecision, RetryState};
pub use config::GateConfig;
pub use error::GateError;
pub use gated::GatedTranscriber;
pub use http::{HttpTranscriber, DEFAULT_ENDPOINT, DEFAULT_MODEL};
pub use mock::MockTranscriber;
pub use rate_gate::{RateGate, Slot};
