//! # Registry configuration
//!
//! [`RegistryConfig`] selects which constellations are bootstrapped and how
//! verbose the registry diagnostics are. It is read from a small TOML document:
//!
//! ```toml
//! systems = ["GPS", "GAL", "R"]
//! verbosity = 2
//! ```
//!
//! Both keys are optional: all constellations and verbosity `1` by default.
//! System names accept the three-letter codes, the long names and the RINEX
//! characters (see [`GnssSystem`]'s `FromStr`).
//!
//! ```rust
//! use std::sync::Arc;
//! use gnut_objects::config::RegistryConfig;
//! use gnut_objects::registry::ObjectRegistry;
//!
//! let config = RegistryConfig::from_toml_str(r#"systems = ["GPS"]"#)?;
//! let logger = config.logger();
//! let registry = ObjectRegistry::from_catalog(&config.catalog(), None, None).with_logger(&logger);
//! assert_eq!(registry.count(), 32);
//! # Ok::<(), gnut_objects::gnut_errors::GnutError>(())
//! ```
use std::{collections::BTreeSet, sync::Arc};

use serde::Deserialize;

use crate::{
    gnss::{catalog::SatelliteCatalog, GnssSystem},
    gnut_errors::GnutError,
    logger::{Logger, TracingLogger},
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    #[serde(default = "all_systems")]
    pub systems: BTreeSet<GnssSystem>,
    #[serde(default = "default_verbosity")]
    pub verbosity: u8,
}

fn all_systems() -> BTreeSet<GnssSystem> {
    GnssSystem::ALL.into_iter().collect()
}

fn default_verbosity() -> u8 {
    1
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            systems: all_systems(),
            verbosity: default_verbosity(),
        }
    }
}

impl RegistryConfig {
    /// Parse a configuration from TOML text.
    ///
    /// Errors
    /// ----------
    /// * [`GnutError::TomlError`] on malformed TOML, unknown keys or unknown system names.
    /// * [`GnutError::InvalidConfig`] if the system list is explicitly empty.
    pub fn from_toml_str(text: &str) -> Result<Self, GnutError> {
        let config: RegistryConfig = toml::from_str(text)?;
        if config.systems.is_empty() {
            return Err(GnutError::InvalidConfig(
                "at least one GNSS system must be selected".into(),
            ));
        }
        Ok(config)
    }

    /// Built-in catalog restricted to the configured systems.
    pub fn catalog(&self) -> SatelliteCatalog {
        SatelliteCatalog::gnss().restricted_to(&self.systems)
    }

    /// A [`TracingLogger`] at the configured verbosity. The caller owns it; the
    /// registry only keeps a weak reference.
    pub fn logger(&self) -> Arc<dyn Logger> {
        Arc::new(TracingLogger::new(self.verbosity))
    }
}
