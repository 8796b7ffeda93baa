#![allow(dead_code)]

use std::sync::Arc;

use gnut_objects::{
    calibration::{AntennaCalibrationTable, CalibrationProvider, PhaseCenterVariation},
    gnss::{catalog::SatelliteCatalog, GnssSystem},
};
use nalgebra::Vector3;

pub const RECEIVER_ANTENNA: &str = "JAVRINGANT_DM   NONE";

/// `{G01, G02}` + `{R01}`.
pub fn two_constellations() -> SatelliteCatalog {
    SatelliteCatalog::new([
        (GnssSystem::Gps, vec!["G01", "G02"]),
        (GnssSystem::Glonass, vec!["R01"]),
    ])
    .expect("valid catalog")
}

/// Type-mean receiver calibration plus satellite calibrations for `sats`.
pub fn calibration_for(sats: &[&str]) -> Arc<dyn CalibrationProvider> {
    let mut table = AntennaCalibrationTable::new();
    table.insert(
        PhaseCenterVariation::new(RECEIVER_ANTENNA, "", 0.0, 90.0, 5.0).with_frequency(
            "G01",
            Vector3::new(0.0011, 0.0003, 0.0871),
            vec![0.0, 0.0004, 0.0011],
        ),
    );
    for sat in sats {
        table.insert(
            PhaseCenterVariation::new("BLOCK IIF", *sat, 0.0, 17.0, 1.0).with_frequency(
                "G01",
                Vector3::new(0.394, 0.0, 1.5613),
                vec![-0.0008, -0.0006],
            ),
        );
    }
    Arc::new(table)
}
