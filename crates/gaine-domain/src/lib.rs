//! Gaine Domain Layer
//!
//! Core value types and boundary traits for extracting inventory queries
//! from French speech transcripts.
//!
//! ## Key Concepts
//!
//! - **StructuredQuery**: intent + gaine identifier + temporal reference
//! - **Intent**: entries (`entrees`), exits (`sorties`) or current `stock`
//! - **Gaine**: a typed code, prefix `gsb`/`gab`/`gl`/`gs` followed by 1-5 digits
//! - **TimeRef**: unspecified, a single day, or an inclusive date range
//! - **Partial result**: a query missing intent or gaine; valid output, not an error
//!
//! ## Architecture
//!
//! This crate holds no I/O. Language models, transcription services and the
//! downstream inventory router are reached through the traits in [`traits`];
//! their implementations live in other crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod audio;
pub mod query;
pub mod traits;

// Re-exports for convenience
pub use audio::{AudioClip, Transcript, TRANSCRIPTION_SAMPLE_RATE};
pub use query::{Gaine, Intent, IsoDate, StructuredQuery, TimeRef, GAINE_PREFIXES, MAX_GAINE_DIGITS};
pub use traits::{LlmProvider, QueryRouter, Transcriber, TranscriptionError};
