use crate::core::models::property::Target;
use thiserror::Error;

/// Why a property name was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidNameKind {
    #[error("the name of a property can not be the empty string")]
    Empty,
    #[error("the name of a property must be a string, got '{value}' of type {type_name}")]
    NotAString {
        value: String,
        type_name: &'static str,
    },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConversionError {
    #[error("at least one frame is required")]
    NoFrames,

    #[error("{0}")]
    InvalidName(InvalidNameKind),

    #[error("the declaration of the '{name}' property must be a map, got {type_name}")]
    InvalidDeclaration {
        name: String,
        type_name: &'static str,
    },

    #[error("missing 'target' for the '{name}' property")]
    MissingTarget { name: String },

    #[error("the target must be 'atom' or 'structure' for the '{name}' property")]
    InvalidTarget { name: String },

    #[error("missing 'values' for the '{name}' property")]
    MissingValues { name: String },

    #[error("unknown type ({found}) for property '{name}'")]
    UnsupportedValueType { name: String, found: String },

    #[error("unsupported type in property values: should be string or number")]
    UnsupportedElementType { name: String },

    #[error(
        "wrong size for the property '{name}' with target=='{target}': expected {expected} values, got {got}"
    )]
    WrongSize {
        name: String,
        target: Target,
        expected: usize,
        got: usize,
    },

    #[error("the property '{name}' is defined more than once")]
    DuplicateProperty { name: String },

    #[error("invalid cutoff {cutoff} for environment {index}: must be a non-negative number")]
    InvalidCutoff { index: usize, cutoff: f64 },

    #[error("center_atoms_mask of structure {structure} has {got} entries, expected {expected}")]
    InvalidCenterMask {
        structure: usize,
        expected: usize,
        got: usize,
    },

    #[error("structure {structure} is missing the '{name}' annotation carried by other frames")]
    MissingAnnotation { name: String, structure: usize },

    #[error("atom annotation '{name}' has no value for atom {center} of structure {structure}")]
    InvalidAnnotation {
        name: String,
        structure: usize,
        center: usize,
    },
}
