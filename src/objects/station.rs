use std::{any::Any, sync::Arc};

use nalgebra::Vector3;

use super::{CalibrationSlot, DomainObject, IdGroup, IdType};
use crate::{
    calibration::{CalibrationProvider, PhaseCenterVariation},
    constants::{AntennaType, Meter, ObjectKey},
};

/// A ground receiver site.
///
/// Stations are created by input readers (RINEX headers, SINEX blocks) and
/// handed to the registry through
/// [`ObjectRegistry::insert`](crate::registry::ObjectRegistry::insert).
/// The receiver antenna (type + serial) selects the calibration; a station with
/// no antenna never holds one.
///
/// ```rust
/// use gnut_objects::objects::{station::Station, DomainObject};
/// use nalgebra::Vector3;
///
/// let brux = Station::new("BRUX")
///     .with_name("Brussels")
///     .with_antenna("JAVRINGANT_DM   NONE", "00464")
///     .with_position(Vector3::new(4027881.628, 306998.537, 4919498.984));
/// assert_eq!(brux.id(), "BRUX");
/// ```
#[derive(Debug)]
pub struct Station {
    id: ObjectKey,
    name: Option<String>,
    antenna: Option<AntennaType>,
    antenna_serial: String,
    position: Option<Vector3<Meter>>,
    calibration: CalibrationSlot,
}

impl Station {
    pub fn new(id: impl Into<ObjectKey>) -> Self {
        Station {
            id: id.into(),
            name: None,
            antenna: None,
            antenna_serial: String::new(),
            position: None,
            calibration: CalibrationSlot::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_antenna(mut self, antenna: impl Into<AntennaType>, serial: impl Into<String>) -> Self {
        self.antenna = Some(antenna.into());
        self.antenna_serial = serial.into();
        self
    }

    /// A-priori ECEF position, meters.
    pub fn with_position(mut self, xyz: Vector3<Meter>) -> Self {
        self.position = Some(xyz);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn antenna(&self) -> Option<&str> {
        self.antenna.as_deref()
    }

    pub fn antenna_serial(&self) -> &str {
        &self.antenna_serial
    }

    pub fn position(&self) -> Option<&Vector3<Meter>> {
        self.position.as_ref()
    }
}

impl DomainObject for Station {
    fn id(&self) -> &str {
        &self.id
    }

    fn id_type(&self) -> IdType {
        IdType::Station
    }

    fn id_group(&self) -> IdGroup {
        IdGroup::Object
    }

    fn synchronize_calibration(&self, provider: Option<&dyn CalibrationProvider>) {
        match self.antenna.as_deref() {
            Some(antenna) => self
                .calibration
                .refresh(provider, Some(antenna), &self.antenna_serial),
            None => self.calibration.clear(),
        }
    }

    fn calibration(&self) -> Option<Arc<PhaseCenterVariation>> {
        self.calibration.get()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
