use crate::core::models::document::Document;
use crate::core::models::environment::Environment;
use crate::core::models::frame::Frame;
use crate::core::models::property::{Property, PropertyMap, Target};
use crate::core::models::value::Mapping;
use crate::engine::config::ConversionConfig;
use crate::engine::diagnostics::{Diagnostics, Warning, WarningReporter};
use crate::engine::error::ConversionError;
use crate::engine::{annotations, environments, metadata, properties};
use tracing::{debug, info, instrument};

/// Everything one conversion consumes.
pub struct ConversionInput<'a, F: Frame> {
    frames: &'a [F],
    meta: Option<&'a Mapping>,
    properties: Option<&'a Mapping>,
    centers: Option<&'a [Environment]>,
}

impl<'a, F: Frame> ConversionInput<'a, F> {
    pub fn new(frames: &'a [F]) -> Self {
        Self {
            frames,
            meta: None,
            properties: None,
            centers: None,
        }
    }

    /// Free-form dataset metadata.
    pub fn meta(mut self, meta: &'a Mapping) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Property declarations, keyed by property name.
    pub fn properties(mut self, properties: &'a Mapping) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Explicit environments, replacing the ones derived from the frames.
    pub fn centers(mut self, centers: &'a [Environment]) -> Self {
        self.centers = Some(centers);
        self
    }
}

/// The outcome of a successful conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub document: Document,
    /// Every non-fatal warning raised, in order.
    pub warnings: Vec<Warning>,
}

#[instrument(skip_all, name = "conversion_workflow")]
pub fn run<F: Frame>(
    input: &ConversionInput<'_, F>,
    config: &ConversionConfig,
    reporter: &WarningReporter<'_>,
) -> Result<Conversion, ConversionError> {
    if input.frames.is_empty() {
        return Err(ConversionError::NoFrames);
    }
    info!("Converting a batch of {} frame(s).", input.frames.len());
    let mut diagnostics = Diagnostics::new(reporter);

    // === Phase 1: Environments (sizes every atom property) ===
    let environment_set =
        environments::derive(input.frames, input.centers, config.default_cutoff)?;

    // === Phase 2: Metadata ===
    let meta = metadata::normalize(input.meta, &config.unknown_name, &mut diagnostics);

    // === Phase 3: Explicit properties, in declaration order ===
    let mut property_map = PropertyMap::new();
    for (name, declaration) in input.properties.into_iter().flatten() {
        let normalized =
            properties::normalize(name, declaration, &environment_set, &mut diagnostics)?;
        insert_unique(&mut property_map, normalized)?;
    }
    debug!("{} explicit property column(s).", property_map.len());

    // === Phase 4: Implicit properties from frame annotations ===
    for (name, values) in
        annotations::atom_values(input.frames, environment_set.records(), config)?
    {
        let normalized =
            properties::normalize_values(&name, Target::Atom, &values, &environment_set)?;
        insert_unique(&mut property_map, normalized)?;
    }
    for (name, values) in annotations::structure_values(input.frames)? {
        let normalized =
            properties::normalize_values(&name, Target::Structure, &values, &environment_set)?;
        insert_unique(&mut property_map, normalized)?;
    }

    let warnings = diagnostics.into_warnings();
    info!(
        "Conversion complete: {} property column(s), {} environment(s), {} warning(s).",
        property_map.len(),
        environment_set.n_environments(),
        warnings.len()
    );

    Ok(Conversion {
        document: Document {
            meta,
            properties: property_map,
            environments: environment_set.into_records(),
        },
        warnings,
    })
}

fn insert_unique(
    property_map: &mut PropertyMap,
    entries: Vec<(String, Property)>,
) -> Result<(), ConversionError> {
    for (name, property) in entries {
        property_map
            .insert(name, property)
            .map_err(|(name, _)| ConversionError::DuplicateProperty { name })?;
    }
    Ok(())
}
