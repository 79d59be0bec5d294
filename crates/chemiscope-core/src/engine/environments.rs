use super::error::ConversionError;
use crate::core::models::environment::Environment;
use crate::core::models::frame::Frame;
use tracing::debug;

/// The canonical, ordered environments of a conversion, together with the
/// counts used to size properties.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentSet {
    records: Vec<Environment>,
    atom_counts: Vec<usize>,
}

impl EnvironmentSet {
    pub fn records(&self) -> &[Environment] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Environment> {
        self.records
    }

    /// Expected number of values for `atom` properties.
    pub fn n_environments(&self) -> usize {
        self.records.len()
    }

    /// Expected number of values for `structure` properties.
    pub fn n_frames(&self) -> usize {
        self.atom_counts.len()
    }

    pub fn atom_counts(&self) -> &[usize] {
        &self.atom_counts
    }

    pub fn n_atoms(&self) -> usize {
        self.atom_counts.iter().sum()
    }
}

/// Builds the environment list of a conversion.
///
/// Explicit `centers` are used verbatim and in order; only their cutoffs are
/// checked. Without them, every atom of every frame becomes a center unless
/// the frame's `center_atoms_mask` excludes it, and `default_cutoff` is
/// attached to each derived record.
pub fn derive<F: Frame>(
    frames: &[F],
    centers: Option<&[Environment]>,
    default_cutoff: Option<f64>,
) -> Result<EnvironmentSet, ConversionError> {
    let atom_counts: Vec<usize> = frames.iter().map(Frame::atom_count).collect();

    let records = match centers {
        Some(centers) => {
            for (index, environment) in centers.iter().enumerate() {
                if let Some(cutoff) = environment.cutoff {
                    if cutoff.is_nan() || cutoff < 0.0 {
                        return Err(ConversionError::InvalidCutoff { index, cutoff });
                    }
                }
            }
            debug!("Using {} explicit environment(s).", centers.len());
            centers.to_vec()
        }
        None => {
            let records = from_frames(frames, default_cutoff)?;
            debug!(
                "Derived {} environment(s) from {} frame(s).",
                records.len(),
                frames.len()
            );
            records
        }
    };

    Ok(EnvironmentSet {
        records,
        atom_counts,
    })
}

fn from_frames<F: Frame>(
    frames: &[F],
    cutoff: Option<f64>,
) -> Result<Vec<Environment>, ConversionError> {
    let mut records = Vec::new();
    for (structure, frame) in frames.iter().enumerate() {
        let n_atoms = frame.atom_count();
        match frame.center_atoms_mask() {
            Some(mask) => {
                if mask.len() != n_atoms {
                    return Err(ConversionError::InvalidCenterMask {
                        structure,
                        expected: n_atoms,
                        got: mask.len(),
                    });
                }
                records.extend(
                    mask.iter()
                        .enumerate()
                        .filter(|(_, included)| **included)
                        .map(|(center, _)| Environment {
                            structure,
                            center,
                            cutoff,
                        }),
                );
            }
            None => records.extend((0..n_atoms).map(|center| Environment {
                structure,
                center,
                cutoff,
            })),
        }
    }
    Ok(records)
}
