//! Gaine Extractor
//!
//! Turns a French speech transcript into a structured inventory query.
//!
//! # Architecture
//!
//! ```text
//! Transcript → Orchestrator → [Model] → Anchor → Fallback → StructuredQuery → Outcome
//! ```
//!
//! - **Model** (optional): schema-constrained language-model call, output normalised
//! - **Anchor**: "les <intent> de <gaine> [le <date> | du <date> au <date>]"
//! - **Fallback**: independent keyword/regex lookups for intent, gaine and date
//!
//! The first strategy that produces a query wins. Extraction never fails:
//! missing fields come back as `None` and [`Outcome::decide`] says what to
//! ask the user.
//!
//! # Example Usage
//!
//! ```
//! use gaine_extractor::{ExtractorConfig, Orchestrator, Outcome};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let orchestrator = Orchestrator::new(ExtractorConfig::default());
//! let resolution = orchestrator.run("les sorties de gsb11 le 01-10-2025").await;
//!
//! match Outcome::decide(resolution.query) {
//!     Outcome::Ready(query) => assert_eq!(query.gaine.unwrap().value(), "gsb11"),
//!     other => panic!("unexpected outcome {:?}", other),
//! }
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod model;
mod orchestrator;
mod outcome;
mod parser;
mod prompt;
mod strategy;

pub mod anchor;
pub mod dates;
pub mod fallback;
pub mod normalize;


pub use anchor::AnchorStrategy;
pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use model::ModelExtractor;
pub use orchestrator::{Orchestrator, Resolution};
pub use outcome::Outcome;
pub use prompt::{EXTRACTION_INSTRUCTIONS, RESPONSE_SCHEMA};
pub use strategy::{ExtractionStrategy, StrategyKind};
