use serde::Serialize;

/// Name used for datasets that were not given one.
pub const UNKNOWN_NAME: &str = "<unknown>";

/// Normalized dataset metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<String>>,
}

impl Metadata {
    /// Number of fields present in the serialized form.
    pub fn field_count(&self) -> usize {
        1 + usize::from(self.description.is_some())
            + usize::from(self.references.is_some())
            + usize::from(self.authors.is_some())
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            name: UNKNOWN_NAME.to_string(),
            description: None,
            references: None,
            authors: None,
        }
    }
}
