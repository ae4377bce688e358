//! # mdharvest Core Library
//!
//! Extraction of simulation metadata from the methods prose of molecular-dynamics papers:
//! which protein structures were simulated, which simulation package operated on them, and
//! which water (solvent) model was used.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture so that each concern can be tested
//! on its own.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Document`, `ProteinMention`,
//!   `Candidate`, `ProteinRecord`), the sentence segmenter, the vocabulary tables and the pure
//!   pattern matchers. Nothing in this layer fails; absence of a match is `None`.
//!
//! - **[`engine`]: The Logic Core.** Configuration, the per-document processing context, the
//!   disambiguation oracle port, progress reporting and the tasks that turn mentions into
//!   records (proximity scan, candidate filter, assembly).
//!
//! - **[`workflows`]: The Public API.** Ties `core` and `engine` together. The
//!   [`workflows::extract::process`] function is the single call most users need.

pub mod core;
pub mod engine;
pub mod workflows;
