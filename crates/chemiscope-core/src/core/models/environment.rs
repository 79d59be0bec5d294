use serde::Serialize;

/// A local neighborhood: one center atom of one structure, with an optional
/// cutoff radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Environment {
    /// Index of the structure in the frame collection.
    pub structure: usize,
    /// Index of the center atom inside the structure.
    pub center: usize,
    /// Cutoff radius around the center, when explicitly set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cutoff: Option<f64>,
}

impl Environment {
    pub fn new(structure: usize, center: usize) -> Self {
        Self {
            structure,
            center,
            cutoff: None,
        }
    }

    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = Some(cutoff);
        self
    }
}

impl From<(usize, usize)> for Environment {
    fn from((structure, center): (usize, usize)) -> Self {
        Self::new(structure, center)
    }
}

impl From<(usize, usize, f64)> for Environment {
    fn from((structure, center, cutoff): (usize, usize, f64)) -> Self {
        Self::new(structure, center).with_cutoff(cutoff)
    }
}
