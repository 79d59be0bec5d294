//! # Core Module
//!
//! Stateless building blocks of the conversion: the loose value model for
//! user-authored input, the frame accessor contract, and the records that
//! make up the output document. See [`models`].

pub mod models;
