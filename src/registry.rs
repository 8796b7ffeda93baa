//! # Object registry: the single store of every domain object
//!
//! This module defines [`ObjectRegistry`](crate::registry::ObjectRegistry), the
//! authoritative key → object map shared by all processing stages (orbit
//! modelling, tide corrections, coordinate estimation). It wires together:
//!
//! 1. **Satellite bootstrap**: one [`Transceiver`] per satellite of a
//!    [`SatelliteCatalog`], created at construction so the registry is never
//!    missing a known satellite.
//! 2. **Strict insertion**: an object is added only under a new, non-empty key;
//!    a second object under an existing key is rejected and reported, never
//!    merged.
//! 3. **Calibration fan-out**: every object holds the phase-center model of the
//!    current [`CalibrationProvider`]. A newly inserted object is synchronized
//!    immediately; after a provider change, the caller requests
//!    [`synchronize_all_calibration`](crate::registry::ObjectRegistry::synchronize_all_calibration).
//! 4. **Pass-through providers**: the [`OceanLoadingProvider`] is only stored and
//!    handed out.
//!
//! ## Concurrency
//!
//! All state sits behind one [`parking_lot::Mutex`], held for the whole duration
//! of every public operation. Operations are therefore serialized: an object is
//! either absent or present *and* already synchronized, and a fan-out always sees
//! one provider and the complete object set. Objects are handed out as
//! [`SharedObject`] (`Arc`) so they can be used after the lock is released.
//!
//! ## Provider ownership
//!
//! Providers and the logger are held through [`Weak`] references: the registry
//! never keeps them alive. Keep the `Arc` somewhere for as long as it should be
//! used; once it is dropped the registry behaves as if no provider was set.
//!
//! ## Typical usage
//!
//! ```rust
//! use std::sync::Arc;
//! use gnut_objects::calibration::{AntennaCalibrationTable, CalibrationProvider};
//! use gnut_objects::objects::{station::Station, IdType};
//! use gnut_objects::registry::ObjectRegistry;
//!
//! let registry = ObjectRegistry::new();
//! assert!(registry.lookup("G01").is_some());
//!
//! registry.insert(Arc::new(Station::new("BRUX")))?;
//! assert!(registry.insert(Arc::new(Station::new("BRUX"))).is_err());
//!
//! let pcv: Arc<dyn CalibrationProvider> = Arc::new(AntennaCalibrationTable::new());
//! registry.set_calibration_provider(Some(&pcv));
//! registry.synchronize_all_calibration();
//!
//! assert_eq!(registry.enumerate_keys(Some(IdType::Station)).len(), 1);
//! # Ok::<(), gnut_objects::gnut_errors::GnutError>(())
//! ```
use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    fmt,
    sync::{Arc, Weak},
};

use hifitime::Epoch;
use parking_lot::Mutex;

use crate::{
    calibration::CalibrationProvider,
    constants::{AntennaType, ObjectKey, SatId, SharedObject},
    gnss::{catalog::SatelliteCatalog, GnssSystem},
    gnut_errors::GnutError,
    logger::Logger,
    objects::{transceiver::Transceiver, DomainObject, IdType},
    ocean_loading::OceanLoadingProvider,
};

const COMPONENT: &str = "registry";

/// Thread-safe store of every domain object, keyed by object identifier.
///
/// All operations take a single internal lock, so an object returned by
/// [`lookup`](ObjectRegistry::lookup) has always been fully inserted and
/// synchronized. Providers and the logger are held as [`Weak`] references:
/// the caller keeps them alive.
pub struct ObjectRegistry {
    state: Mutex<RegistryState>,
}

struct RegistryState {
    objects: HashMap<ObjectKey, SharedObject>,
    calibration: Option<Weak<dyn CalibrationProvider>>,
    ocean_loading: Option<Weak<dyn OceanLoadingProvider>>,
    logger: Option<Weak<dyn Logger>>,
}

impl RegistryState {
    fn calibration(&self) -> Option<Arc<dyn CalibrationProvider>> {
        self.calibration.as_ref().and_then(Weak::upgrade)
    }

    /// Logger if attached, alive, and verbose enough for `level`.
    fn logger_at(&self, level: u8) -> Option<Arc<dyn Logger>> {
        self.logger
            .as_ref()
            .and_then(Weak::upgrade)
            .filter(|logger| logger.verbosity() >= level)
    }
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectRegistry {
    /// Registry bootstrapped with the built-in GNSS catalog and no providers.
    pub fn new() -> Self {
        Self::from_catalog(SatelliteCatalog::gnss(), None, None)
    }

    /// Registry bootstrapped with the built-in GNSS catalog and initial providers.
    ///
    /// Arguments
    /// -----------------
    /// * `calibration`: Phase-center provider (held weakly).
    /// * `ocean_loading`: Ocean tide loading provider (held weakly).
    ///
    /// See also
    /// ------------
    /// * [`ObjectRegistry::from_catalog`] – Same, with a caller-supplied catalog.
    pub fn with_providers(
        calibration: Option<&Arc<dyn CalibrationProvider>>,
        ocean_loading: Option<&Arc<dyn OceanLoadingProvider>>,
    ) -> Self {
        Self::from_catalog(SatelliteCatalog::gnss(), calibration, ocean_loading)
    }

    /// Build a registry holding one [`Transceiver`] per satellite of `catalog`.
    ///
    /// The catalog is consistent by construction (see [`SatelliteCatalog::new`]),
    /// so bootstrap inserts directly, without the duplicate checks and diagnostics
    /// of [`insert`](ObjectRegistry::insert). When an initial calibration provider
    /// is given, the bootstrapped transceivers are synchronized with it before the
    /// registry is returned.
    ///
    /// Arguments
    /// -----------------
    /// * `catalog`: Satellites to create.
    /// * `calibration`: Initial phase-center provider (held weakly).
    /// * `ocean_loading`: Initial ocean loading provider (held weakly).
    ///
    /// Return
    /// ----------
    /// * A registry with exactly `catalog.len()` transceivers.
    pub fn from_catalog(
        catalog: &SatelliteCatalog,
        calibration: Option<&Arc<dyn CalibrationProvider>>,
        ocean_loading: Option<&Arc<dyn OceanLoadingProvider>>,
    ) -> Self {
        let objects = Self::bootstrap(catalog);

        if let Some(provider) = calibration {
            for object in objects.values() {
                object.synchronize_calibration(Some(&**provider));
            }
        }

        tracing::debug!(
            satellites = objects.len(),
            systems = catalog.systems().count(),
            "object registry bootstrapped"
        );

        ObjectRegistry {
            state: Mutex::new(RegistryState {
                objects,
                calibration: calibration.map(Arc::downgrade),
                ocean_loading: ocean_loading.map(Arc::downgrade),
                logger: None,
            }),
        }
    }

    fn bootstrap(catalog: &SatelliteCatalog) -> HashMap<ObjectKey, SharedObject> {
        catalog
            .iter()
            .map(|(_, sat)| {
                let trn: SharedObject = Arc::new(Transceiver::new(sat.clone()));
                (sat.clone(), trn)
            })
            .collect()
    }

    /// Attach a logger, builder style.
    pub fn with_logger(self, logger: &Arc<dyn Logger>) -> Self {
        self.set_logger(Some(logger));
        self
    }

    /// Replace the logger, or detach it with `None`.
    pub fn set_logger(&self, logger: Option<&Arc<dyn Logger>>) {
        self.state.lock().logger = logger.map(Arc::downgrade);
    }

    /// The attached logger, if it is still alive.
    pub fn logger(&self) -> Option<Arc<dyn Logger>> {
        self.state.lock().logger.as_ref().and_then(Weak::upgrade)
    }

    /// Add a new object to the registry.
    ///
    /// On success the object is stored under its own [`id`](DomainObject::id) and
    /// immediately synchronized with the current calibration provider (or reset
    /// to "no calibration" when there is none), all under the registry lock.
    ///
    /// Arguments
    /// -----------------
    /// * `object`: The object to publish.
    ///
    /// Return
    /// ----------
    /// * `Ok(())` when the object was added.
    ///
    /// Errors
    /// ----------
    /// * [`GnutError::EmptyKey`] if the object has no identity.
    /// * [`GnutError::Duplicate`] if an object with the same key is already stored.
    ///   The stored object is left untouched and a warning is emitted, to the
    ///   logger when one is attached with verbosity ≥ 1, to `tracing` otherwise.
    pub fn insert(&self, object: SharedObject) -> Result<(), GnutError> {
        let mut state = self.state.lock();

        let key = object.id().to_string();
        if key.is_empty() {
            return Err(GnutError::EmptyKey);
        }

        if state.objects.contains_key(&key) {
            let message = format!("warning - cannot overwrite object: {key}");
            match state.logger_at(1) {
                Some(logger) => logger.comment(0, COMPONENT, &message),
                None => tracing::warn!(target: "gnut_objects::registry", "{message}"),
            }
            return Err(GnutError::Duplicate(key));
        }
        state.objects.insert(key.clone(), Arc::clone(&object));

        if let Some(logger) = state.logger_at(1) {
            logger.comment(1, COMPONENT, &format!("add new obj {key}"));
        }

        let provider = state.calibration();
        object.synchronize_calibration(provider.as_deref());
        Ok(())
    }

    /// Object stored under `key`, if any. A miss is noted at verbosity ≥ 2.
    pub fn lookup(&self, key: &str) -> Option<SharedObject> {
        let state = self.state.lock();
        let found = state.objects.get(key).cloned();
        if found.is_none() {
            if let Some(logger) = state.logger_at(2) {
                logger.comment(2, COMPONENT, &format!("object: {key} not found."));
            }
        }
        found
    }

    /// `true` when an object is stored under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.state.lock().objects.contains_key(key)
    }

    /// Keys of the objects of type `filter`, or every key when `filter` is `None`.
    pub fn enumerate_keys(&self, filter: Option<IdType>) -> BTreeSet<ObjectKey> {
        let state = self.state.lock();
        state
            .objects
            .iter()
            .filter(|(_, obj)| matches_filter(obj.as_ref(), filter))
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Snapshot of the objects of type `filter` (all when `None`), keyed by their own id.
    pub fn enumerate_objects(&self, filter: Option<IdType>) -> BTreeMap<ObjectKey, SharedObject> {
        let state = self.state.lock();
        state
            .objects
            .values()
            .filter(|obj| matches_filter(obj.as_ref(), filter))
            .map(|obj| (obj.id().to_string(), Arc::clone(obj)))
            .collect()
    }

    /// Number of stored objects, bootstrapped transceivers included.
    pub fn count(&self) -> usize {
        self.state.lock().objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Replace the calibration provider.
    ///
    /// Stored objects keep their current calibration until
    /// [`synchronize_all_calibration`](ObjectRegistry::synchronize_all_calibration)
    /// is called, so several inputs can be swapped before a single fan-out.
    pub fn set_calibration_provider(&self, provider: Option<&Arc<dyn CalibrationProvider>>) {
        self.state.lock().calibration = provider.map(Arc::downgrade);
    }

    /// Replace the ocean loading provider. No stored object is touched.
    pub fn set_ocean_loading_provider(&self, provider: Option<&Arc<dyn OceanLoadingProvider>>) {
        self.state.lock().ocean_loading = provider.map(Arc::downgrade);
    }

    pub fn calibration_provider(&self) -> Option<Arc<dyn CalibrationProvider>> {
        self.state.lock().calibration()
    }

    pub fn ocean_loading_provider(&self) -> Option<Arc<dyn OceanLoadingProvider>> {
        self.state.lock().ocean_loading.as_ref().and_then(Weak::upgrade)
    }

    /// Synchronize every stored object with the current calibration provider.
    ///
    /// Idempotent: with an unchanged provider, a second call leaves every object
    /// in the same state.
    pub fn synchronize_all_calibration(&self) {
        let state = self.state.lock();
        let provider = state.calibration();
        for object in state.objects.values() {
            object.synchronize_calibration(provider.as_deref());
        }
        tracing::debug!(
            objects = state.objects.len(),
            provider = provider.is_some(),
            "calibration synchronized for all objects"
        );
    }

    /// Apply satellite antenna assignments valid from `epoch`.
    ///
    /// This is the hook used by satellite-information readers: each
    /// `(satellite, antenna type)` pair is applied to the matching bootstrapped
    /// [`Transceiver`]. Identifiers are normalized first (`"G5"` → `"G05"`).
    /// Calibration is **not** refreshed; call
    /// [`synchronize_all_calibration`](ObjectRegistry::synchronize_all_calibration)
    /// once the batch is applied.
    ///
    /// Return
    /// ----------
    /// * The identifiers that could not be resolved to a transceiver.
    pub fn assign_antennas<I, S, A>(&self, epoch: Epoch, assignments: I) -> Vec<String>
    where
        I: IntoIterator<Item = (S, A)>,
        S: AsRef<str>,
        A: Into<AntennaType>,
    {
        let state = self.state.lock();
        let mut unresolved = Vec::new();

        for (sat, antenna) in assignments {
            let sat = sat.as_ref();
            let trn = GnssSystem::normalize_sat(sat, GnssSystem::Gps)
                .ok()
                .and_then(|id: SatId| state.objects.get(&id))
                .and_then(|obj| obj.downcast_ref::<Transceiver>());

            match trn {
                Some(trn) => trn.set_antenna(antenna, epoch),
                None => unresolved.push(sat.to_string()),
            }
        }

        if !unresolved.is_empty() {
            if let Some(logger) = state.logger_at(1) {
                logger.comment(
                    1,
                    COMPONENT,
                    &format!("antenna not assigned, unknown satellites: {unresolved:?}"),
                );
            }
        }
        unresolved
    }
}

fn matches_filter(object: &dyn DomainObject, filter: Option<IdType>) -> bool {
    filter.map_or(true, |id_type| object.id_type() == id_type)
}

impl fmt::Debug for ObjectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ObjectRegistry")
            .field("objects", &state.objects.len())
            .field("calibration", &state.calibration().is_some())
            .field(
                "ocean_loading",
                &state.ocean_loading.as_ref().and_then(Weak::upgrade).is_some(),
            )
            .finish()
    }
}

impl Drop for ObjectRegistry {
    fn drop(&mut self) {
        let state = self.state.get_mut();
        tracing::debug!(objects = state.objects.len(), "object registry cleared");
        state.objects.clear();
    }
}

#[cfg(test)]
mod registry_test {
    use super::*;
    use crate::{
        calibration::{AntennaCalibrationTable, PhaseCenterVariation},
        objects::{coordinate_product::CoordinateProduct, station::Station},
        ocean_loading::{OceanLoadingCoefficients, OceanLoadingTable, OtlMatrix},
    };

    fn small_catalog() -> SatelliteCatalog {
        SatelliteCatalog::new([
            (GnssSystem::Gps, vec!["G01", "G02"]),
            (GnssSystem::Glonass, vec!["R01"]),
        ])
        .unwrap()
    }

    fn calibration_table() -> Arc<dyn CalibrationProvider> {
        let mut table = AntennaCalibrationTable::new();
        table.insert(PhaseCenterVariation::new("BLOCK IIF", "G01", 0.0, 17.0, 1.0));
        table.insert(PhaseCenterVariation::new("GLONASS-M", "R01", 0.0, 15.0, 1.0));
        table.insert(PhaseCenterVariation::new("JAVRINGANT_DM   NONE", "", 0.0, 90.0, 5.0));
        Arc::new(table)
    }

    #[derive(Default)]
    struct RecordingLogger {
        verbosity: u8,
        lines: Mutex<Vec<(u8, String)>>,
    }

    impl Logger for RecordingLogger {
        fn verbosity(&self) -> u8 {
            self.verbosity
        }

        fn comment(&self, level: u8, component: &str, message: &str) {
            assert_eq!(component, COMPONENT);
            self.lines.lock().push((level, message.to_string()));
        }
    }

    /// In-memory sink for a `tracing_subscriber::fmt` subscriber.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Insert "BRUX" twice with `logger` attached and return the warnings emitted to tracing.
    fn tracing_output_of_duplicate(logger: Option<&Arc<dyn Logger>>) -> String {
        let captured = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let registry = ObjectRegistry::from_catalog(&small_catalog(), None, None);
            registry.set_logger(logger);
            registry.insert(Arc::new(Station::new("BRUX"))).unwrap();
            assert_eq!(
                registry.insert(Arc::new(Station::new("BRUX"))),
                Err(GnutError::Duplicate("BRUX".into()))
            );
        });
        captured.contents()
    }

    fn otl_table(site: &str) -> Arc<dyn OceanLoadingProvider> {
        let mut table = OceanLoadingTable::new();
        table.insert(OceanLoadingCoefficients::new(
            site,
            OtlMatrix::<f64>::zeros(),
            OtlMatrix::<f64>::zeros(),
        ));
        Arc::new(table)
    }

    #[test]
    fn test_bootstrap_small_catalog() {
        let registry = ObjectRegistry::from_catalog(&small_catalog(), None, None);
        assert_eq!(registry.count(), 3);
        assert_eq!(
            registry.enumerate_keys(Some(IdType::Transceiver)),
            BTreeSet::from(["G01".to_string(), "G02".to_string(), "R01".to_string()])
        );
        assert!(registry.enumerate_keys(Some(IdType::Station)).is_empty());
    }

    #[test]
    fn test_bootstrap_builtin_catalog() {
        let registry = ObjectRegistry::new();
        let catalog = SatelliteCatalog::gnss();
        assert_eq!(registry.count(), catalog.len());
        let expected: BTreeSet<String> = catalog.iter().map(|(_, s)| s.clone()).collect();
        assert_eq!(registry.enumerate_keys(Some(IdType::Transceiver)), expected);
    }

    #[test]
    fn test_insert_rejections() {
        let registry = ObjectRegistry::from_catalog(&small_catalog(), None, None);

        assert_eq!(registry.insert(Arc::new(Station::new(""))), Err(GnutError::EmptyKey));
        assert_eq!(registry.count(), 3);

        assert_eq!(registry.insert(Arc::new(Station::new("BRUX"))), Ok(()));
        assert_eq!(registry.count(), 4);

        assert_eq!(
            registry.insert(Arc::new(Station::new("BRUX").with_name("other"))),
            Err(GnutError::Duplicate("BRUX".into()))
        );
        assert_eq!(registry.count(), 4);

        // satellites cannot be overwritten either
        assert_eq!(
            registry.insert(Arc::new(Transceiver::new("G01"))),
            Err(GnutError::Duplicate("G01".into()))
        );
    }

    #[test]
    fn test_duplicate_leaves_original() {
        let pcv = calibration_table();
        let registry = ObjectRegistry::from_catalog(&small_catalog(), Some(&pcv), None);

        let original: SharedObject =
            Arc::new(Station::new("BRUX").with_antenna("JAVRINGANT_DM   NONE", "00464"));
        registry.insert(Arc::clone(&original)).unwrap();
        let before = original.calibration();
        assert!(before.is_some());

        let intruder = Arc::new(Station::new("BRUX"));
        assert!(registry.insert(intruder).is_err());

        let stored = registry.lookup("BRUX").unwrap();
        assert!(Arc::ptr_eq(&stored, &original));
        assert_eq!(stored.calibration(), before);
        let station = stored.downcast_ref::<Station>().unwrap();
        assert_eq!(station.antenna_serial(), "00464");
        assert!(station.name().is_none());
    }

    #[test]
    fn test_lookup() {
        let registry = ObjectRegistry::from_catalog(&small_catalog(), None, None);
        let g01 = registry.lookup("G01").unwrap();
        assert_eq!(g01.id(), "G01");
        assert!(g01.is::<Transceiver>());
        assert!(registry.lookup("ZZZZ").is_none());
        assert!(registry.contains("R01"));
        assert!(!registry.contains("R02"));
    }

    #[test]
    fn test_enumerate_filters() {
        let registry = ObjectRegistry::from_catalog(&small_catalog(), None, None);
        registry.insert(Arc::new(Station::new("BRUX"))).unwrap();
        registry
            .insert(Arc::new(CoordinateProduct::new(
                "BRUX_CRD",
                Epoch::from_gregorian_utc_at_midnight(2024, 1, 1),
                registry.lookup("BRUX"),
            )))
            .unwrap();

        assert_eq!(registry.enumerate_keys(None).len(), registry.count());
        for id_type in [IdType::Transceiver, IdType::Station, IdType::Position] {
            for (key, obj) in registry.enumerate_objects(Some(id_type)) {
                assert_eq!(obj.id_type(), id_type);
                assert_eq!(obj.id(), key);
            }
        }
        assert_eq!(
            registry.enumerate_keys(Some(IdType::Position)),
            BTreeSet::from(["BRUX_CRD".to_string()])
        );
        assert_eq!(registry.enumerate_objects(None).len(), 5);
    }

    #[test]
    fn test_insert_synchronizes_with_current_provider() {
        let pcv = calibration_table();
        let registry = ObjectRegistry::from_catalog(&small_catalog(), None, None);
        registry.set_calibration_provider(Some(&pcv));

        let station: SharedObject =
            Arc::new(Station::new("BRUX").with_antenna("JAVRINGANT_DM   NONE", "00464"));
        registry.insert(Arc::clone(&station)).unwrap();
        let after_insert = station.calibration();
        assert_eq!(after_insert.as_ref().unwrap().antenna, "JAVRINGANT_DM   NONE");

        registry.synchronize_all_calibration();
        assert_eq!(station.calibration(), after_insert);
    }

    #[test]
    fn test_set_provider_is_two_step() {
        let pcv = calibration_table();
        let registry = ObjectRegistry::from_catalog(&small_catalog(), None, None);
        let g01 = registry.lookup("G01").unwrap();

        registry.set_calibration_provider(Some(&pcv));
        assert!(g01.calibration().is_none());

        registry.synchronize_all_calibration();
        assert_eq!(g01.calibration().unwrap().antenna, "BLOCK IIF");
        assert!(registry.lookup("G02").unwrap().calibration().is_none());

        let snapshot: Vec<_> = registry
            .enumerate_objects(None)
            .values()
            .map(|o| o.calibration())
            .collect();
        registry.synchronize_all_calibration();
        let again: Vec<_> = registry
            .enumerate_objects(None)
            .values()
            .map(|o| o.calibration())
            .collect();
        assert_eq!(snapshot, again);

        registry.set_calibration_provider(None);
        registry.synchronize_all_calibration();
        assert!(g01.calibration().is_none());
    }

    #[test]
    fn test_initial_provider_applied_to_bootstrap() {
        let pcv = calibration_table();
        let registry = ObjectRegistry::from_catalog(&small_catalog(), Some(&pcv), None);
        assert_eq!(
            registry.lookup("R01").unwrap().calibration().unwrap().antenna,
            "GLONASS-M"
        );
    }

    #[test]
    fn test_providers_are_held_weakly() {
        let pcv = calibration_table();
        let otl: Arc<dyn OceanLoadingProvider> = Arc::new(OceanLoadingTable::new());
        let registry = ObjectRegistry::from_catalog(&small_catalog(), Some(&pcv), Some(&otl));
        assert!(registry.calibration_provider().is_some());
        assert!(registry.ocean_loading_provider().is_some());

        drop(otl);
        assert!(registry.ocean_loading_provider().is_none());

        drop(pcv);
        assert!(registry.calibration_provider().is_none());
        registry.synchronize_all_calibration();
        assert!(registry.lookup("G01").unwrap().calibration().is_none());
    }

    #[test]
    fn test_logger_verbosity_rules() {
        let logger = Arc::new(RecordingLogger {
            verbosity: 1,
            ..Default::default()
        });
        let as_dyn: Arc<dyn Logger> = logger.clone();
        let registry = ObjectRegistry::from_catalog(&small_catalog(), None, None).with_logger(&as_dyn);

        registry.insert(Arc::new(Station::new("BRUX"))).unwrap();
        let _ = registry.insert(Arc::new(Station::new("BRUX")));
        assert!(registry.lookup("ZZZZ").is_none());

        let lines = logger.lines.lock().clone();
        assert_eq!(
            lines,
            vec![
                (1, "add new obj BRUX".to_string()),
                (0, "warning - cannot overwrite object: BRUX".to_string()),
            ]
        );

        let chatty = Arc::new(RecordingLogger {
            verbosity: 2,
            ..Default::default()
        });
        let chatty_dyn: Arc<dyn Logger> = chatty.clone();
        registry.set_logger(Some(&chatty_dyn));
        assert!(registry.lookup("ZZZZ").is_none());
        assert_eq!(
            chatty.lines.lock().clone(),
            vec![(2, "object: ZZZZ not found.".to_string())]
        );
    }

    #[test]
    fn test_silent_logger_falls_back() {
        let logger = Arc::new(RecordingLogger::default());
        let as_dyn: Arc<dyn Logger> = logger.clone();
        let registry = ObjectRegistry::from_catalog(&small_catalog(), None, None).with_logger(&as_dyn);

        registry.insert(Arc::new(Station::new("BRUX"))).unwrap();
        assert!(registry.insert(Arc::new(Station::new("BRUX"))).is_err());
        assert!(logger.lines.lock().is_empty());
    }

    #[test]
    fn test_duplicate_warning_fallback_channel() {
        let without_logger = tracing_output_of_duplicate(None);
        assert!(without_logger.contains("gnut_objects::registry"));
        assert!(without_logger.contains("warning - cannot overwrite object: BRUX"));

        let silent = Arc::new(RecordingLogger::default());
        let silent_dyn: Arc<dyn Logger> = silent.clone();
        let below_threshold = tracing_output_of_duplicate(Some(&silent_dyn));
        assert!(below_threshold.contains("warning - cannot overwrite object: BRUX"));
        assert!(silent.lines.lock().is_empty());

        let verbose = Arc::new(RecordingLogger {
            verbosity: 1,
            ..Default::default()
        });
        let verbose_dyn: Arc<dyn Logger> = verbose.clone();
        let routed_to_logger = tracing_output_of_duplicate(Some(&verbose_dyn));
        assert!(!routed_to_logger.contains("cannot overwrite object"));
        assert!(verbose
            .lines
            .lock()
            .contains(&(0, "warning - cannot overwrite object: BRUX".to_string())));
    }

    #[test]
    fn test_set_ocean_loading_provider() {
        let pcv = calibration_table();
        let registry = ObjectRegistry::from_catalog(&small_catalog(), Some(&pcv), None);
        registry
            .insert(Arc::new(
                Station::new("BRUX").with_antenna("JAVRINGANT_DM   NONE", "00464"),
            ))
            .unwrap();
        assert!(registry.ocean_loading_provider().is_none());

        let calibrations = || -> Vec<_> {
            registry
                .enumerate_objects(None)
                .values()
                .map(|o| o.calibration())
                .collect()
        };
        let before = calibrations();

        let brux = otl_table("BRUX");
        registry.set_ocean_loading_provider(Some(&brux));
        let current = registry.ocean_loading_provider().unwrap();
        assert!(current.coefficients("BRUX").is_some());
        assert_eq!(calibrations(), before);

        let wtzr = otl_table("WTZR");
        registry.set_ocean_loading_provider(Some(&wtzr));
        let current = registry.ocean_loading_provider().unwrap();
        assert!(current.coefficients("WTZR").is_some());
        assert!(current.coefficients("BRUX").is_none());
        assert_eq!(calibrations(), before);

        registry.set_ocean_loading_provider(None);
        assert!(registry.ocean_loading_provider().is_none());
        assert_eq!(calibrations(), before);
        assert!(registry.calibration_provider().is_some());
    }

    #[test]
    fn test_assign_antennas() {
        let pcv: Arc<dyn CalibrationProvider> = {
            let mut table = AntennaCalibrationTable::new();
            table.insert(PhaseCenterVariation::new("BLOCK IIIA", "", 0.0, 17.0, 1.0));
            Arc::new(table)
        };
        let registry = ObjectRegistry::from_catalog(&small_catalog(), Some(&pcv), None);
        registry.insert(Arc::new(Station::new("BRUX"))).unwrap();

        let epoch = Epoch::from_gregorian_utc_at_midnight(2023, 1, 18);
        let unresolved =
            registry.assign_antennas(epoch, [("G2", "BLOCK IIIA"), ("G09", "BLOCK IIF"), ("BRUX", "X")]);
        assert_eq!(unresolved, vec!["G09".to_string(), "BRUX".to_string()]);

        let g02 = registry.lookup("G02").unwrap();
        let trn = g02.downcast_ref::<Transceiver>().unwrap();
        assert_eq!(trn.current_antenna().as_deref(), Some("BLOCK IIIA"));
        assert!(g02.calibration().is_none());

        registry.synchronize_all_calibration();
        assert_eq!(g02.calibration().unwrap().antenna, "BLOCK IIIA");
    }
}
