use super::value::Value;
use std::collections::BTreeMap;

/// Named annotations attached to a frame, iterated in name order.
pub type Annotations = BTreeMap<String, Value>;

/// Read-only accessor contract for one atomic structure.
///
/// The conversion engine never needs positions, species or cells; it only
/// sizes per-atom data, selects environment centers and collects the
/// annotations a frame carries. Anything that can answer these questions can
/// be converted, regardless of the file format it was read from.
pub trait Frame {
    /// Number of atoms in the structure.
    fn atom_count(&self) -> usize;

    /// Per-atom selection of environment centers. Atoms whose entry is
    /// `false` are not used as centers when environments are derived from
    /// frames.
    fn center_atoms_mask(&self) -> Option<&[bool]>;

    /// Frame-level annotations; each becomes a `structure` property.
    fn structure_annotations(&self) -> &Annotations;

    /// Per-atom annotations, one row per atom; each becomes an `atom`
    /// property.
    fn atom_annotations(&self) -> &Annotations;
}

/// A minimal in-memory [`Frame`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomicFrame {
    atom_count: usize,
    center_atoms_mask: Option<Vec<bool>>,
    info: Annotations,
    arrays: Annotations,
}

impl AtomicFrame {
    pub fn new(atom_count: usize) -> Self {
        Self {
            atom_count,
            ..Self::default()
        }
    }

    pub fn with_center_atoms_mask(mut self, mask: Vec<bool>) -> Self {
        self.center_atoms_mask = Some(mask);
        self
    }

    pub fn with_info(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.info.insert(name.into(), value.into());
        self
    }

    pub fn with_array(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arrays.insert(name.into(), value.into());
        self
    }
}

impl Frame for AtomicFrame {
    fn atom_count(&self) -> usize {
        self.atom_count
    }

    fn center_atoms_mask(&self) -> Option<&[bool]> {
        self.center_atoms_mask.as_deref()
    }

    fn structure_annotations(&self) -> &Annotations {
        &self.info
    }

    fn atom_annotations(&self) -> &Annotations {
        &self.arrays
    }
}
