use std::{any::Any, sync::Arc};

use hifitime::Epoch;
use nalgebra::Vector3;

use super::{DomainObject, IdGroup, IdType};
use crate::{
    calibration::{CalibrationProvider, PhaseCenterVariation},
    constants::{Meter, ObjectKey, SharedObject},
};

/// Off-diagonal covariance terms of an estimated position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CovType {
    Xy,
    Xz,
    Yz,
}

/// Estimated coordinates of an object at one epoch.
///
/// A product is filled by the estimator before being published, then read only.
/// It carries no antenna, so its calibration state is always empty.
#[derive(Debug)]
pub struct CoordinateProduct {
    id: ObjectKey,
    epoch: Epoch,
    reference: Option<SharedObject>,
    xyz: Vector3<Meter>,
    xyz_rms: Vector3<Meter>,
    apr: Vector3<Meter>,
    apr_rms: Vector3<Meter>,
    cov: [f64; 3],
}

impl CoordinateProduct {
    pub fn new(id: impl Into<ObjectKey>, epoch: Epoch, reference: Option<SharedObject>) -> Self {
        CoordinateProduct {
            id: id.into(),
            epoch,
            reference,
            xyz: Vector3::zeros(),
            xyz_rms: Vector3::zeros(),
            apr: Vector3::zeros(),
            apr_rms: Vector3::zeros(),
            cov: [0.0; 3],
        }
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Object the coordinates belong to, if any.
    pub fn reference(&self) -> Option<&SharedObject> {
        self.reference.as_ref()
    }

    pub fn set_xyz(&mut self, xyz: Vector3<Meter>, rms: Vector3<Meter>) {
        self.xyz = xyz;
        self.xyz_rms = rms;
    }

    pub fn set_apr(&mut self, apr: Vector3<Meter>, rms: Vector3<Meter>) {
        self.apr = apr;
        self.apr_rms = rms;
    }

    pub fn set_cov(&mut self, kind: CovType, value: f64) {
        self.cov[kind as usize] = value;
    }

    pub fn xyz(&self) -> &Vector3<Meter> {
        &self.xyz
    }

    pub fn xyz_rms(&self) -> &Vector3<Meter> {
        &self.xyz_rms
    }

    /// Variances of the estimate (squared rms), m².
    pub fn xyz_var(&self) -> Vector3<f64> {
        self.xyz_rms.component_mul(&self.xyz_rms)
    }

    pub fn apr(&self) -> &Vector3<Meter> {
        &self.apr
    }

    pub fn apr_rms(&self) -> &Vector3<Meter> {
        &self.apr_rms
    }

    pub fn apr_var(&self) -> Vector3<f64> {
        self.apr_rms.component_mul(&self.apr_rms)
    }

    pub fn cov(&self, kind: CovType) -> f64 {
        self.cov[kind as usize]
    }
}

impl DomainObject for CoordinateProduct {
    fn id(&self) -> &str {
        &self.id
    }

    fn id_type(&self) -> IdType {
        IdType::Position
    }

    fn id_group(&self) -> IdGroup {
        IdGroup::Product
    }

    fn synchronize_calibration(&self, _provider: Option<&dyn CalibrationProvider>) {}

    fn calibration(&self) -> Option<Arc<PhaseCenterVariation>> {
        None
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
