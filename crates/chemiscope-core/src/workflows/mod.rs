//! # Workflows Module
//!
//! High-level entry points tying the [`crate::engine`] stages together.
//!
//! - **Conversion Workflow** ([`convert`]) - Frames, metadata, properties and
//!   optional centers in; one validated document plus its warnings out.

pub mod convert;
