//! # Core Models Module
//!
//! Data structures shared by every stage of the conversion: the loose value
//! model used for user-authored input, the frame accessor contract, and the
//! strictly shaped records of the output document.
//!
//! ## Key Components
//!
//! - [`value`] - Loosely typed input values, output scalars and n-dimensional arrays
//! - [`frame`] - The [`frame::Frame`] accessor contract and a minimal in-memory frame
//! - [`environment`] - Environment records (structure, center, optional cutoff)
//! - [`metadata`] - Normalized dataset metadata
//! - [`property`] - Normalized properties and their ordered, unique-name container
//! - [`document`] - The final `{meta, properties, environments}` document
//!
//! ## Usage
//!
//! ```
//! use chemiscope::core::models::frame::AtomicFrame;
//! use chemiscope::core::models::value::Value;
//!
//! let frame = AtomicFrame::new(3)
//!     .with_info("energy", -12.5)
//!     .with_array("charge", vec![0.1, -0.2, 0.1]);
//! assert_eq!(Value::from(vec!["foo", "bar"]).to_string(), "['foo', 'bar']");
//! # let _ = frame;
//! ```

pub mod document;
pub mod environment;
pub mod frame;
pub mod metadata;
pub mod property;
pub mod value;
