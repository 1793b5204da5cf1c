//! The planet entity and its identifier.

use std::fmt;
use std::str::FromStr;

use mongodb::bson::oid::ObjectId;

use crate::error::Error;

/// Store-assigned planet identifier.
///
/// Wraps a MongoDB object id and renders as its 24 character lowercase hex
/// form, which is also the only accepted textual input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlanetId(ObjectId);

impl PlanetId {
    /// Generate a fresh, globally unique id.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// The all-zero id. No stored planet ever carries it.
    pub fn nil() -> Self {
        Self(ObjectId::from_bytes([0; 12]))
    }

    /// Parse `value`, falling back to [`PlanetId::nil`] when it is not a
    /// valid object id. Lookups with the fallback simply match nothing.
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            tracing::debug!(value, "unparseable planet id, using nil id");
            Self::nil()
        })
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl FromStr for PlanetId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| Error::InvalidPlanetId {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for PlanetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

impl From<ObjectId> for PlanetId {
    fn from(id: ObjectId) -> Self {
        Self(id)
    }
}

/// A persisted planet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Planet {
    pub id: PlanetId,
    pub name: String,
}

/// A planet that has not been stored yet and therefore has no id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlanet {
    pub name: String,
}

impl NewPlanet {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
