use super::value::Scalar;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use std::fmt;
use std::str::FromStr;

/// What the values of a property are indexed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// One value per environment.
    Atom,
    /// One value per structure.
    Structure,
}

impl Target {
    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Atom => "atom",
            Target::Structure => "structure",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = ();

    /// Parses the exact keywords `atom` and `structure`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "atom" => Ok(Target::Atom),
            "structure" => Ok(Target::Structure),
            _ => Err(()),
        }
    }
}

/// A normalized, single-column property.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub target: Target,
    pub values: Vec<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
}

impl Property {
    /// Number of fields present in the serialized form.
    pub fn field_count(&self) -> usize {
        2 + usize::from(self.description.is_some()) + usize::from(self.units.is_some())
    }
}

/// Properties keyed by unique name, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyMap {
    entries: Vec<(String, Property)>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&Property> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, property)| property)
    }

    /// Inserts a property under a name that is not yet used.
    ///
    /// # Errors
    ///
    /// Hands the property back if `name` is already taken.
    pub fn insert(&mut self, name: String, property: Property) -> Result<(), (String, Property)> {
        if self.contains(&name) {
            return Err((name, property));
        }
        self.entries.push((name, property));
        Ok(())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Property)> {
        self.entries
            .iter()
            .map(|(name, property)| (name.as_str(), property))
    }
}

impl Serialize for PropertyMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, property) in &self.entries {
            map.serialize_entry(name, property)?;
        }
        map.end()
    }
}
