use crate::core::models::metadata::UNKNOWN_NAME;
use thiserror::Error;

/// Per-atom annotations that never become properties by default.
pub const DEFAULT_IGNORED_ATOM_ANNOTATIONS: [&str; 3] = ["positions", "numbers", "center_atoms_mask"];

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for parameter '{parameter}': {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionConfig {
    /// Name substituted when the metadata has no (or an empty) name.
    pub unknown_name: String,
    /// Cutoff assigned to environments derived from frames.
    pub default_cutoff: Option<f64>,
    /// Per-atom annotation names skipped when collecting implicit properties.
    pub ignored_atom_annotations: Vec<String>,
}

impl ConversionConfig {
    pub fn is_ignored_atom_annotation(&self, name: &str) -> bool {
        self.ignored_atom_annotations.iter().any(|n| n == name)
    }
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            unknown_name: UNKNOWN_NAME.to_string(),
            default_cutoff: None,
            ignored_atom_annotations: DEFAULT_IGNORED_ATOM_ANNOTATIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Default)]
pub struct ConversionConfigBuilder {
    unknown_name: Option<String>,
    default_cutoff: Option<f64>,
    ignored_atom_annotations: Option<Vec<String>>,
}

impl ConversionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unknown_name(mut self, name: impl Into<String>) -> Self {
        self.unknown_name = Some(name.into());
        self
    }
    pub fn default_cutoff(mut self, cutoff: Option<f64>) -> Self {
        self.default_cutoff = cutoff;
        self
    }
    pub fn ignored_atom_annotations(mut self, names: Vec<String>) -> Self {
        self.ignored_atom_annotations = Some(names);
        self
    }

    pub fn build(self) -> Result<ConversionConfig, ConfigError> {
        let defaults = ConversionConfig::default();

        if let Some(cutoff) = self.default_cutoff {
            if cutoff.is_nan() || cutoff < 0.0 {
                return Err(ConfigError::InvalidParameter {
                    parameter: "default_cutoff",
                    reason: format!("expected a non-negative number, got {cutoff}"),
                });
            }
        }

        let unknown_name = self.unknown_name.unwrap_or(defaults.unknown_name);
        if unknown_name.is_empty() {
            return Err(ConfigError::InvalidParameter {
                parameter: "unknown_name",
                reason: "the fallback name can not be empty".to_string(),
            });
        }

        Ok(ConversionConfig {
            unknown_name,
            default_cutoff: self.default_cutoff,
            ignored_atom_annotations: self
                .ignored_atom_annotations
                .unwrap_or(defaults.ignored_atom_annotations),
        })
    }
}
