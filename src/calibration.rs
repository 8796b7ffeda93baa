//! # Antenna phase-center calibration
//!
//! Phase-center offsets (PCO) and variations (PCV) are the per-antenna models
//! every [`DomainObject`](crate::objects::DomainObject) keeps in sync with the
//! registry's current [`CalibrationProvider`].
//!
//! The provider is an external collaborator: the registry never looks inside it,
//! it only hands it to each object's
//! [`synchronize_calibration`](crate::objects::DomainObject::synchronize_calibration).
//! [`AntennaCalibrationTable`] is the in-memory provider shipped with the crate,
//! filled by whatever ANTEX reader the application uses.
//!
//! ## Lookup rules
//!
//! 1. `(antenna, serial)` exact match (individual calibration);
//! 2. `(antenna, "")` type-mean calibration;
//! 3. with no antenna type, the serial alone (satellite antennas are filed under
//!    their satellite identifier).
use std::{collections::BTreeMap, collections::HashMap, sync::Arc};

use nalgebra::Vector3;

use crate::constants::{AntennaType, Degree, Meter};

/// Source of phase-center calibration, queried by antenna type and serial.
pub trait CalibrationProvider: Send + Sync {
    fn phase_center(&self, antenna: Option<&str>, serial: &str)
        -> Option<Arc<PhaseCenterVariation>>;
}

/// Phase-center model of one antenna: per-frequency offset and
/// non-azimuth-dependent variation sampled on a regular zenith grid.
///
/// Units
/// -----
/// * `zen1`, `zen2`, `dzen`: degrees.
/// * offsets and variations: meters.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseCenterVariation {
    pub antenna: AntennaType,
    pub serial: String,
    pub zen1: Degree,
    pub zen2: Degree,
    pub dzen: Degree,
    offsets: BTreeMap<String, Vector3<Meter>>,
    variations: BTreeMap<String, Vec<Meter>>,
}

impl PhaseCenterVariation {
    pub fn new(
        antenna: impl Into<AntennaType>,
        serial: impl Into<String>,
        zen1: Degree,
        zen2: Degree,
        dzen: Degree,
    ) -> Self {
        PhaseCenterVariation {
            antenna: antenna.into(),
            serial: serial.into(),
            zen1,
            zen2,
            dzen,
            offsets: BTreeMap::new(),
            variations: BTreeMap::new(),
        }
    }

    /// Add the model of one frequency (e.g. `"G01"`, `"E05"`).
    pub fn with_frequency(
        mut self,
        freq: impl Into<String>,
        offset: Vector3<Meter>,
        variation: Vec<Meter>,
    ) -> Self {
        let freq = freq.into();
        self.offsets.insert(freq.clone(), offset);
        self.variations.insert(freq, variation);
        self
    }

    pub fn frequencies(&self) -> impl Iterator<Item = &str> + '_ {
        self.offsets.keys().map(String::as_str)
    }

    /// Phase-center offset of a frequency, in meters.
    pub fn offset(&self, freq: &str) -> Option<&Vector3<Meter>> {
        self.offsets.get(freq)
    }

    /// Phase-center variation of a frequency at a given zenith angle.
    ///
    /// Arguments
    /// -----------------
    /// * `freq`: Frequency label.
    /// * `zenith`: Zenith angle (or nadir angle for satellite antennas), degrees.
    ///
    /// Return
    /// ----------
    /// * The variation in meters, linearly interpolated on the zenith grid and
    ///   clamped to its first/last sample, or `None` when the frequency is unknown
    ///   or the grid is empty.
    pub fn variation(&self, freq: &str, zenith: Degree) -> Option<Meter> {
        let samples = self.variations.get(freq)?;
        if samples.is_empty() || self.dzen <= 0.0 {
            return None;
        }
        let last = samples.len() - 1;
        let pos = ((zenith - self.zen1) / self.dzen).clamp(0.0, last as f64);
        let lower = pos.floor() as usize;
        if lower >= last {
            return Some(samples[last]);
        }
        let frac = pos - lower as f64;
        Some(samples[lower] + frac * (samples[lower + 1] - samples[lower]))
    }
}

/// In-memory [`CalibrationProvider`].
#[derive(Debug, Default, Clone)]
pub struct AntennaCalibrationTable {
    by_antenna: HashMap<(AntennaType, String), Arc<PhaseCenterVariation>>,
    by_serial: HashMap<String, Arc<PhaseCenterVariation>>,
}

impl AntennaCalibrationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model, replacing any previous one with the same antenna and serial.
    ///
    /// Models with a serial are also indexed by serial alone, for lookups without
    /// an antenna type. That index is last-wins: when several antennas share a
    /// serial (a satellite PRN re-used across spacecraft), the model inserted last
    /// answers. Insert them oldest first, as they appear in ANTEX files, so the
    /// serial-only lookup returns the most recent antenna.
    pub fn insert(&mut self, pcv: PhaseCenterVariation) {
        let pcv = Arc::new(pcv);
        if !pcv.serial.is_empty() {
            self.by_serial.insert(pcv.serial.clone(), Arc::clone(&pcv));
        }
        self.by_antenna
            .insert((pcv.antenna.clone(), pcv.serial.clone()), pcv);
    }

    pub fn len(&self) -> usize {
        self.by_antenna.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_antenna.is_empty()
    }
}

impl CalibrationProvider for AntennaCalibrationTable {
    fn phase_center(
        &self,
        antenna: Option<&str>,
        serial: &str,
    ) -> Option<Arc<PhaseCenterVariation>> {
        match antenna {
            Some(antenna) => self
                .by_antenna
                .get(&(antenna.to_string(), serial.to_string()))
                .or_else(|| self.by_antenna.get(&(antenna.to_string(), String::new())))
                .cloned(),
            None => self.by_serial.get(serial).cloned(),
        }
    }
}
