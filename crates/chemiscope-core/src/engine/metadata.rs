use super::coercion::{Fields, coerce_sequence, coerce_to_string};
use super::diagnostics::{Diagnostics, Warning};
use crate::core::models::metadata::Metadata;
use crate::core::models::value::Mapping;

const METADATA_KEYS: [&str; 4] = ["name", "description", "references", "authors"];

/// Normalizes free-form metadata into [`Metadata`].
///
/// Unrecognized keys are dropped with one warning each. A missing or empty
/// name is replaced by `unknown_name`.
pub(crate) fn normalize(
    meta: Option<&Mapping>,
    unknown_name: &str,
    diagnostics: &mut Diagnostics<'_, '_>,
) -> Metadata {
    let empty = Mapping::new();
    let fields = Fields::partition(meta.unwrap_or(&empty), &METADATA_KEYS);

    for key in &fields.unexpected {
        diagnostics.push(Warning::UnexpectedMetadata { key: key.clone() });
    }

    let name = fields
        .get("name")
        .map(coerce_to_string)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| unknown_name.to_string());

    Metadata {
        name,
        description: fields.get("description").map(coerce_to_string),
        references: fields.get("references").map(coerce_sequence),
        authors: fields.get("authors").map(coerce_sequence),
    }
}
