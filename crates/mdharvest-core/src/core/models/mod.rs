//! # Core Models Module
//!
//! Data structures passed between the stages of the extraction pipeline.
//!
//! ## Key Components
//!
//! - [`sentence`] - Immutable, ordered sentences of one document
//! - [`mention`] - Protein identifiers detected in the text
//! - [`candidate`] - Tentative software / water-model detections near a mention
//! - [`record`] - The final output rows
//!
//! ## Lifecycle
//!
//! A [`sentence::Document`] is created once per input text and never mutated. Candidates are
//! transient and scoped to the resolution of one mention. [`record::ProteinRecord`]s are the
//! only values that outlive a pipeline call.

pub mod candidate;
pub mod mention;
pub mod record;
pub mod sentence;
