//! # Satellite catalog
//!
//! A [`SatelliteCatalog`] lists, for each supported [`GnssSystem`], the satellite
//! identifiers the registry must know about before any data arrives. The
//! catalog is validated once, at construction: every identifier is non-empty,
//! belongs to the constellation it is filed under, and appears only once across
//! the whole catalog. A value of this type is therefore always consistent, which
//! is what lets [`ObjectRegistry`](crate::registry::ObjectRegistry) bootstrap
//! without re-checking.
//!
//! ```rust
//! use gnut_objects::gnss::{catalog::SatelliteCatalog, GnssSystem};
//!
//! let catalog = SatelliteCatalog::new([
//!     (GnssSystem::Gps, vec!["G01", "G02"]),
//!     (GnssSystem::Glonass, vec!["R01"]),
//! ])?;
//! assert_eq!(catalog.len(), 3);
//! # Ok::<(), gnut_objects::gnut_errors::GnutError>(())
//! ```
use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;
use once_cell::sync::Lazy;

use super::GnssSystem;
use crate::{constants::SatId, gnut_errors::GnutError};

static GNSS_CATALOG: Lazy<SatelliteCatalog> = Lazy::new(SatelliteCatalog::build_gnss);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SatelliteCatalog {
    satellites: BTreeMap<GnssSystem, BTreeSet<SatId>>,
}

impl SatelliteCatalog {
    /// Build and validate a catalog from `(system, identifiers)` entries.
    ///
    /// Arguments
    /// -----------------
    /// * `entries`: Satellite identifiers grouped by constellation. A system may
    ///   appear several times; its identifiers are merged.
    ///
    /// Return
    /// ----------
    /// * The catalog, or [`GnutError::CatalogCorruption`] if an identifier is empty,
    ///   filed under the wrong constellation, or listed more than once.
    pub fn new<I, S>(entries: I) -> Result<Self, GnutError>
    where
        I: IntoIterator<Item = (GnssSystem, Vec<S>)>,
        S: Into<SatId>,
    {
        let entries: Vec<(GnssSystem, SatId)> = entries
            .into_iter()
            .flat_map(|(sys, sats)| sats.into_iter().map(move |s| (sys, s.into())))
            .collect();

        if let Some((sys, _)) = entries.iter().find(|(_, sat)| sat.trim().is_empty()) {
            return Err(GnutError::CatalogCorruption(format!(
                "empty satellite identifier in {sys}"
            )));
        }

        for (sys, sat) in &entries {
            match GnssSystem::from_sat(sat) {
                Ok(found) if found == *sys => {}
                _ => {
                    return Err(GnutError::CatalogCorruption(format!(
                        "satellite {sat} does not belong to {sys}"
                    )))
                }
            }
        }

        let duplicated: Vec<&SatId> = entries.iter().map(|(_, sat)| sat).duplicates().collect();
        if !duplicated.is_empty() {
            return Err(GnutError::CatalogCorruption(format!(
                "duplicated satellite identifiers: {}",
                duplicated.iter().join(", ")
            )));
        }

        let mut satellites: BTreeMap<GnssSystem, BTreeSet<SatId>> = BTreeMap::new();
        for (sys, sat) in entries {
            satellites.entry(sys).or_default().insert(sat);
        }
        Ok(SatelliteCatalog { satellites })
    }

    /// Built-in catalog of every constellation supported by the library.
    ///
    /// | system | range |
    /// |--------|-------|
    /// | GPS | G01–G32 |
    /// | GLONASS | R01–R27 |
    /// | Galileo | E01–E36 |
    /// | BeiDou | C01–C63 |
    /// | QZSS | J01–J10 |
    /// | SBAS | S20–S59 |
    /// | IRNSS | I01–I14 |
    pub fn gnss() -> &'static SatelliteCatalog {
        &GNSS_CATALOG
    }

    fn build_gnss() -> SatelliteCatalog {
        let satellites = GnssSystem::ALL
            .iter()
            .map(|sys| {
                let (first, last) = prn_range(*sys);
                let sats: BTreeSet<SatId> = (first..=last).map(|prn| sys.format_sat(prn)).collect();
                (*sys, sats)
            })
            .collect();
        SatelliteCatalog { satellites }
    }

    /// Copy of this catalog keeping only the given constellations.
    pub fn restricted_to(&self, systems: &BTreeSet<GnssSystem>) -> SatelliteCatalog {
        SatelliteCatalog {
            satellites: self
                .satellites
                .iter()
                .filter(|(sys, _)| systems.contains(*sys))
                .map(|(sys, sats)| (*sys, sats.clone()))
                .collect(),
        }
    }

    pub fn systems(&self) -> impl Iterator<Item = GnssSystem> + '_ {
        self.satellites.keys().copied()
    }

    /// Satellites of one constellation (empty if the system is not in the catalog).
    pub fn satellites(&self, system: GnssSystem) -> impl Iterator<Item = &SatId> + '_ {
        self.satellites.get(&system).into_iter().flatten()
    }

    /// Every `(system, satellite)` pair, grouped by system in bootstrap order.
    pub fn iter(&self) -> impl Iterator<Item = (GnssSystem, &SatId)> + '_ {
        self.satellites
            .iter()
            .flat_map(|(sys, sats)| sats.iter().map(move |sat| (*sys, sat)))
    }

    pub fn contains(&self, sat: &str) -> bool {
        GnssSystem::from_sat(sat)
            .ok()
            .and_then(|sys| self.satellites.get(&sys))
            .is_some_and(|sats| sats.contains(sat))
    }

    pub fn len(&self) -> usize {
        self.satellites.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn prn_range(system: GnssSystem) -> (u16, u16) {
    match system {
        GnssSystem::Gps => (1, 32),
        GnssSystem::Glonass => (1, 27),
        GnssSystem::Galileo => (1, 36),
        GnssSystem::BeiDou => (1, 63),
        GnssSystem::Qzss => (1, 10),
        GnssSystem::Sbas => (20, 59),
        GnssSystem::Irnss => (1, 14),
    }
}
