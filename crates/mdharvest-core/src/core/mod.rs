//! # Core Module
//!
//! The stateless foundation of mdharvest: the data models that flow through the extraction
//! pipeline, the text primitives it is built on, and the pattern matchers that recognize
//! protein identifiers, simulation software and water models inside single sentences.
//!
//! ## Architecture
//!
//! - **Data Models** ([`models`]) - Sentences, protein mentions, candidates and output records
//! - **Text Primitives** ([`text`]) - Sentence segmentation and the fixed vocabulary tables
//! - **Matchers** ([`matchers`]) - Pure recognizers for identifiers, software and water models
//!
//! Every function in this layer is deterministic and infallible: a sentence that mentions
//! nothing of interest simply yields `None` or an empty collection.

pub mod matchers;
pub mod models;
pub mod text;
