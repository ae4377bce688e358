//! # Workflows Module
//!
//! High-level entry points that run the complete extraction pipeline over one text.
//!
//! ## Overview
//!
//! A workflow segments the text, extracts protein mentions, resolves each mention against its
//! neighbourhood through the engine, and returns the assembled records. Every call is
//! independent: no state survives from one text to the next.
//!
//! ## Architecture
//!
//! - **Extraction Workflow** ([`extract`]) - Mention extraction, candidate resolution, oracle
//!   consultation, and record assembly for one document.
//!
//! ## Key Capabilities
//!
//! - **Full control** through [`extract::run`] with an explicit configuration, oracle, and
//!   progress reporter
//! - **Zero-setup processing** through [`extract::process`] with deterministic defaults

pub mod extract;
