//! # Engine Module
//!
//! This module implements the per-document resolution engine of mdharvest: everything that
//! happens between "these proteins are mentioned" and "these records describe the simulations".
//!
//! ## Overview
//!
//! For every protein mention, the engine scans the surrounding sentences for simulation software
//! and water models, collapses duplicate detections, asks a disambiguation oracle which of the
//! remaining candidates actually belong to the mention, and assembles the selected combinations
//! into de-duplicated records.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Context radius, resolution scope, and output shape
//! - **Document Context** ([`context`]) - Per-document state, including the resolve-once gate
//! - **Oracle Port** ([`oracle`]) - The request/response contract with the external decision service
//! - **Progress Monitoring** ([`progress`]) - Progress events and observer callbacks
//! - **Error Handling** ([`error`]) - Engine-specific error types
//!
//! ## Key Capabilities
//!
//! - **Proximity scanning** outward from each mention, nearest sentences first
//! - **Precedence-based de-duplication** preferring versioned and model-specific detections
//! - **Structural validation** of every oracle answer before it is used
//! - **Exact-repeat suppression** when assembling output records

pub mod config;
pub mod context;
pub mod error;
pub mod oracle;
pub mod progress;
pub(crate) mod tasks;
