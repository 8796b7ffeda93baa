//! # Domain objects
//!
//! Everything the [`ObjectRegistry`](crate::registry::ObjectRegistry) stores is a
//! [`DomainObject`]: a record with a string identity, a type tag used for filtered
//! enumeration, a coarser group tag, and a phase-center calibration slot that the
//! registry refreshes from its current [`CalibrationProvider`].
//!
//! Objects are shared as [`SharedObject`](crate::constants::SharedObject)
//! (`Arc<dyn DomainObject>`) between the registry and every stage that looked
//! them up, so all state that may change after publication (calibration,
//! antenna history) sits behind interior locks and every mutator takes `&self`.
//!
//! ## Object kinds
//!
//! | type | group | struct |
//! |------|-------|--------|
//! | [`IdType::Transceiver`] | [`IdGroup::Object`] | [`Transceiver`](crate::objects::transceiver::Transceiver) |
//! | [`IdType::Station`] | [`IdGroup::Object`] | [`Station`](crate::objects::station::Station) |
//! | [`IdType::Position`] | [`IdGroup::Product`] | [`CoordinateProduct`](crate::objects::coordinate_product::CoordinateProduct) |
//!
//! ## Downcasting
//!
//! ```rust
//! use std::sync::Arc;
//! use gnut_objects::constants::SharedObject;
//! use gnut_objects::objects::{transceiver::Transceiver, DomainObject};
//!
//! let obj: SharedObject = Arc::new(Transceiver::new("G01"));
//! let trn = obj.downcast_ref::<Transceiver>().unwrap();
//! assert_eq!(trn.id(), "G01");
//! ```
pub mod coordinate_product;
pub mod station;
pub mod transceiver;

use std::{any::Any, fmt, sync::Arc};

use parking_lot::RwLock;

use crate::calibration::{CalibrationProvider, PhaseCenterVariation};

/// Type classification used to filter enumerations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IdType {
    Transceiver,
    Station,
    Position,
}

/// Coarse classification used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdGroup {
    Object,
    Product,
}

impl fmt::Display for IdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IdType::Transceiver => "TRN",
            IdType::Station => "REC",
            IdType::Position => "POS",
        };
        f.write_str(name)
    }
}

impl fmt::Display for IdGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdGroup::Object => f.write_str("GRP_OBJECT"),
            IdGroup::Product => f.write_str("GRP_PRODUCT"),
        }
    }
}

/// A polymorphic record stored in the registry.
pub trait DomainObject: Send + Sync + fmt::Debug + Any {
    /// Identity of the object; the registry key. Never changes after construction.
    fn id(&self) -> &str;

    fn id_type(&self) -> IdType;

    fn id_group(&self) -> IdGroup;

    /// Refresh the calibration state from `provider`.
    ///
    /// With `None` the object must end up with no calibration at all. Calling it
    /// twice with the same provider leaves the same state.
    fn synchronize_calibration(&self, provider: Option<&dyn CalibrationProvider>);

    /// Calibration currently held by the object.
    fn calibration(&self) -> Option<Arc<PhaseCenterVariation>>;

    fn as_any(&self) -> &dyn Any;
}

impl dyn DomainObject {
    pub fn downcast_ref<T: DomainObject>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn is<T: DomainObject>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

/// Calibration state shared by the object kinds that carry an antenna.
#[derive(Debug, Default)]
pub struct CalibrationSlot {
    pcv: RwLock<Option<Arc<PhaseCenterVariation>>>,
}

impl CalibrationSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held model with what `provider` returns for `(antenna, serial)`.
    pub fn refresh(
        &self,
        provider: Option<&dyn CalibrationProvider>,
        antenna: Option<&str>,
        serial: &str,
    ) {
        let pcv = provider.and_then(|p| p.phase_center(antenna, serial));
        *self.pcv.write() = pcv;
    }

    pub fn clear(&self) {
        *self.pcv.write() = None;
    }

    pub fn get(&self) -> Option<Arc<PhaseCenterVariation>> {
        self.pcv.read().clone()
    }
}
