//! # Engine Module
//!
//! The normalization and validation engine: every rule that turns loosely
//! typed, user-authored input into the strictly shaped output document.
//!
//! ## Architecture
//!
//! - **Value Coercion** ([`coercion`]) - Best-effort conversion of arbitrary values to strings or numbers
//! - **Metadata Normalizer** (`metadata`) - Fixed-schema dataset metadata with a fallback name
//! - **Environment Deriver** ([`environments`]) - Canonical ordered environment list and sizing counts
//! - **Property Normalizer** (`properties`) - Validation, coercion and column splitting of properties
//! - **Frame Annotations** (`annotations`) - Implicit properties contributed by the frames
//! - **Configuration** ([`config`]) - Conversion options and their builder
//! - **Diagnostics** ([`diagnostics`]) - Non-fatal warnings, collected and forwarded individually
//! - **Error Handling** ([`error`]) - The fatal error taxonomy
//!
//! Every fatal condition aborts the whole conversion; there is no partial
//! result.

pub(crate) mod annotations;
pub mod coercion;
pub mod config;
pub mod diagnostics;
pub mod environments;
pub mod error;
pub(crate) mod metadata;
pub(crate) mod properties;
