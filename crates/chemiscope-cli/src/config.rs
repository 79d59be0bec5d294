use crate::cli::ConversionOptions;
use crate::error::{CliError, Result};
use chemiscope::engine::config as core_config;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialMetaConfig {
    #[serde(rename = "unknown-name")]
    unknown_name: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialEnvironmentsConfig {
    cutoff: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialAnnotationsConfig {
    ignore: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialConversionConfig {
    meta: Option<PartialMetaConfig>,
    environments: Option<PartialEnvironmentsConfig>,
    annotations: Option<PartialAnnotationsConfig>,
}

impl PartialConversionConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads the file named by `--config`, or starts from an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn merge_with_cli(
        mut self,
        options: &ConversionOptions,
    ) -> Result<core_config::ConversionConfig> {
        self.apply_set_values(&options.set_values)?;

        let meta = self.meta.take().unwrap_or_default();
        let environments = self.environments.take().unwrap_or_default();
        let annotations = self.annotations.take().unwrap_or_default();

        let mut builder = core_config::ConversionConfigBuilder::new()
            .default_cutoff(options.cutoff.or(environments.cutoff));

        if let Some(name) = options.unknown_name.clone().or(meta.unknown_name) {
            builder = builder.unknown_name(name);
        }

        if !options.ignore_annotations.is_empty() {
            builder = builder.ignored_atom_annotations(options.ignore_annotations.clone());
        } else if let Some(names) = annotations.ignore {
            builder = builder.ignored_atom_annotations(names);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "meta.unknown-name" => {
                    self.meta.get_or_insert_with(Default::default).unknown_name =
                        Some(value_str.to_string());
                }
                "environments.cutoff" => {
                    self.environments
                        .get_or_insert_with(Default::default)
                        .cutoff = Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
                    })?);
                }
                "annotations.ignore" => {
                    let names = value_str
                        .split(',')
                        .map(str::trim)
                        .filter(|name| !name.is_empty())
                        .map(str::to_string)
                        .collect();
                    self.annotations.get_or_insert_with(Default::default).ignore = Some(names);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}
