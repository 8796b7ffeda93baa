use thiserror::Error;

use crate::constants::ObjectKey;

#[derive(Error, Debug)]
pub enum GnutError {
    #[error("Object rejected: empty key")]
    EmptyKey,

    #[error("Cannot overwrite object: {0}")]
    Duplicate(ObjectKey),

    #[error("Satellite catalog corrupted: {0}")]
    CatalogCorruption(String),

    #[error("Invalid GNSS system: {0}")]
    InvalidGnssSystem(String),

    #[error("Invalid satellite identifier: {0}")]
    InvalidSatelliteId(String),

    #[error("Invalid registry configuration: {0}")]
    InvalidConfig(String),

    #[error("Unable to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl GnutError {
    /// `true` for the two rejections [`ObjectRegistry::insert`](crate::registry::ObjectRegistry::insert) can return.
    pub fn is_rejection(&self) -> bool {
        matches!(self, GnutError::EmptyKey | GnutError::Duplicate(_))
    }
}

impl PartialEq for GnutError {
    fn eq(&self, other: &Self) -> bool {
        use GnutError::*;
        match (self, other) {
            (EmptyKey, EmptyKey) => true,
            (Duplicate(a), Duplicate(b)) => a == b,
            (CatalogCorruption(a), CatalogCorruption(b)) => a == b,
            (InvalidGnssSystem(a), InvalidGnssSystem(b)) => a == b,
            (InvalidSatelliteId(a), InvalidSatelliteId(b)) => a == b,
            (InvalidConfig(a), InvalidConfig(b)) => a == b,

            // toml errors are not comparable: same variant is enough
            (TomlError(_), TomlError(_)) => true,

            _ => false,
        }
    }
}
