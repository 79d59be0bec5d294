//! # chemiscope input engine
//!
//! Converts a batch of atomic-structure frames, together with user-supplied
//! metadata, properties and optional environment selections, into a single
//! validated, normalized document for the chemiscope visualizer.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Stateless data models: the loose [`Value`](core::models::value::Value)
//!   type, the [`Frame`](core::models::frame::Frame) accessor contract, and the output
//!   [`Document`](core::models::document::Document).
//!
//! - **[`engine`]: The Rules.** Coercion, metadata and property normalization,
//!   environment derivation, diagnostics, configuration and errors.
//!
//! - **[`workflows`]: The Public API.** [`workflows::convert::run`] orchestrates
//!   the engine over one batch and returns the document with its warnings.
//!
//! The engine performs no I/O and keeps no state between calls: converting the
//! same input twice yields the same document.

pub mod core;
pub mod engine;
pub mod workflows;
