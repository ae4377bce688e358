//! Text primitives shared by the matchers: sentence segmentation and the fixed vocabularies.
//!
//! Segmentation is a dedicated punctuation heuristic rather than a general NLP tokenizer, and
//! the vocabularies are closed lookup tables. Nothing here normalizes or corrects the domain
//! terms it recognizes.

pub mod segmenter;
pub mod vocabulary;
