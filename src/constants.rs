//! # Constants and type definitions for gnut-objects
//!
//! This module centralizes the **numbering conventions** and **common type
//! definitions** shared by the registry, the GNSS catalog and the domain objects.
//!
//! ## Overview
//!
//! - Satellite numbering offsets used by RINEX 2 style identifiers
//! - Core type aliases used across the crate
//! - The shared object handle [`SharedObject`]

use std::sync::Arc;

use crate::objects::DomainObject;

// -------------------------------------------------------------------------------------------------
// Satellite numbering
// -------------------------------------------------------------------------------------------------

/// Offset applied to SBAS PRNs in RINEX 2 (S20 is written as 120)
pub const SBS_OFFSET: u16 = 100;

/// Offset applied to QZSS PRNs in RINEX 2 (J01 is written as 193)
pub const QZS_OFFSET: u16 = 192;

/// Number of tidal constituents in a BLQ ocean loading record
pub const OTL_CONSTITUENTS: usize = 11;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Distance in meters
pub type Meter = f64;

/// Unique identity of a registered object (satellite id, site name, product name)
pub type ObjectKey = String;

/// Canonical satellite identifier, e.g. `"G01"` or `"R24"`
pub type SatId = String;

/// IGS antenna type designation, e.g. `"LEIAR25.R3      LEIT"` or `"BLOCK IIF"`
pub type AntennaType = String;

/// Reference-counted handle to an object stored in the registry.
///
/// The registry and every caller holding a handle share ownership; an object
/// lives as long as its longest holder.
pub type SharedObject = Arc<dyn DomainObject>;
