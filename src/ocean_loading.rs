//! # Ocean tide loading coefficients
//!
//! The registry only stores a (weak) reference to the [`OceanLoadingProvider`] and
//! hands it to downstream tide models on request; nothing in this crate evaluates
//! the loading displacement itself.
//!
//! Coefficients follow the BLQ layout: 11 constituents
//! (`M2 S2 N2 K2 K1 O1 P1 Q1 MF MM SSA`) × 3 components (up, west, south), with
//! amplitudes in meters and Greenwich phase lags in degrees.
use std::{collections::HashMap, sync::Arc};

use nalgebra::SMatrix;

use crate::constants::{Degree, Meter, OTL_CONSTITUENTS};

/// Constituent names, in BLQ column order.
pub const OTL_WAVES: [&str; OTL_CONSTITUENTS] = [
    "M2", "S2", "N2", "K2", "K1", "O1", "P1", "Q1", "MF", "MM", "SSA",
];

/// Rows: up, west, south. Columns: [`OTL_WAVES`].
pub type OtlMatrix<T> = SMatrix<T, 3, OTL_CONSTITUENTS>;

pub trait OceanLoadingProvider: Send + Sync {
    fn coefficients(&self, site: &str) -> Option<Arc<OceanLoadingCoefficients>>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct OceanLoadingCoefficients {
    pub site: String,
    pub amplitudes: OtlMatrix<Meter>,
    pub phases: OtlMatrix<Degree>,
}

impl OceanLoadingCoefficients {
    pub fn new(site: impl Into<String>, amplitudes: OtlMatrix<Meter>, phases: OtlMatrix<Degree>) -> Self {
        OceanLoadingCoefficients {
            site: site.into(),
            amplitudes,
            phases,
        }
    }

    /// Amplitude and phase of one wave for the three components, if the wave exists.
    pub fn wave(&self, name: &str) -> Option<([Meter; 3], [Degree; 3])> {
        let col = OTL_WAVES.iter().position(|w| w.eq_ignore_ascii_case(name))?;
        let amp = self.amplitudes.column(col);
        let pha = self.phases.column(col);
        Some(([amp[0], amp[1], amp[2]], [pha[0], pha[1], pha[2]]))
    }
}

/// In-memory [`OceanLoadingProvider`], keyed by site name (case-insensitive).
#[derive(Debug, Default, Clone)]
pub struct OceanLoadingTable {
    sites: HashMap<String, Arc<OceanLoadingCoefficients>>,
}

impl OceanLoadingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, coefficients: OceanLoadingCoefficients) {
        self.sites
            .insert(coefficients.site.to_ascii_uppercase(), Arc::new(coefficients));
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

impl OceanLoadingProvider for OceanLoadingTable {
    fn coefficients(&self, site: &str) -> Option<Arc<OceanLoadingCoefficients>> {
        self.sites.get(&site.to_ascii_uppercase()).cloned()
    }
}
