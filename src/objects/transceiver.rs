use std::{any::Any, sync::Arc};

use hifitime::Epoch;
use parking_lot::RwLock;

use super::{CalibrationSlot, DomainObject, IdGroup, IdType};
use crate::{
    calibration::{CalibrationProvider, PhaseCenterVariation},
    constants::{AntennaType, SatId},
    gnss::{bds_geo, bds_igso, GnssSystem},
};

/// A satellite transmitter tracked by the registry.
///
/// Besides its identifier, a transceiver keeps the history of antenna types
/// mounted on the satellite slot (a PRN is re-used when a spacecraft is
/// replaced). The calibration is looked up with the most recent antenna type, or
/// with the satellite identifier alone when no antenna has been assigned yet.
///
/// After changing the antenna history the calibration is stale until the next
/// [`synchronize_calibration`](DomainObject::synchronize_calibration).
#[derive(Debug)]
pub struct Transceiver {
    id: SatId,
    antennas: RwLock<Vec<(Epoch, AntennaType)>>,
    calibration: CalibrationSlot,
}

impl Transceiver {
    pub fn new(id: impl Into<SatId>) -> Self {
        Transceiver {
            id: id.into(),
            antennas: RwLock::new(Vec::new()),
            calibration: CalibrationSlot::new(),
        }
    }

    /// Constellation of the satellite, `None` if the identifier is not a GNSS one.
    pub fn system(&self) -> Option<GnssSystem> {
        GnssSystem::from_sat(&self.id).ok()
    }

    pub fn is_geostationary(&self) -> bool {
        self.system() == Some(GnssSystem::BeiDou) && bds_geo(&self.id)
    }

    /// `true` for BeiDou satellites on inclined geosynchronous orbits.
    pub fn is_igso(&self) -> bool {
        self.system() == Some(GnssSystem::BeiDou) && bds_igso(&self.id)
    }

    /// Record the antenna type valid from `valid_from` onwards.
    ///
    /// Arguments
    /// -----------------
    /// * `antenna`: IGS antenna type, e.g. `"BLOCK IIF"`.
    /// * `valid_from`: First epoch at which the antenna is mounted. An assignment at
    ///   an epoch already present replaces the previous one.
    pub fn set_antenna(&self, antenna: impl Into<AntennaType>, valid_from: Epoch) {
        let antenna = antenna.into();
        let mut antennas = self.antennas.write();
        match antennas.iter_mut().find(|(epoch, _)| *epoch == valid_from) {
            Some(slot) => slot.1 = antenna,
            None => {
                let pos = antennas.partition_point(|(epoch, _)| *epoch < valid_from);
                antennas.insert(pos, (valid_from, antenna));
            }
        }
    }

    /// Antenna type mounted at `epoch`.
    pub fn antenna_at(&self, epoch: Epoch) -> Option<AntennaType> {
        self.antennas
            .read()
            .iter()
            .rev()
            .find(|(valid_from, _)| *valid_from <= epoch)
            .map(|(_, antenna)| antenna.clone())
    }

    /// Most recently assigned antenna type.
    pub fn current_antenna(&self) -> Option<AntennaType> {
        self.antennas.read().last().map(|(_, antenna)| antenna.clone())
    }
}

impl DomainObject for Transceiver {
    fn id(&self) -> &str {
        &self.id
    }

    fn id_type(&self) -> IdType {
        IdType::Transceiver
    }

    fn id_group(&self) -> IdGroup {
        IdGroup::Object
    }

    fn synchronize_calibration(&self, provider: Option<&dyn CalibrationProvider>) {
        let antenna = self.current_antenna();
        self.calibration
            .refresh(provider, antenna.as_deref(), &self.id);
    }

    fn calibration(&self) -> Option<Arc<PhaseCenterVariation>> {
        self.calibration.get()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
