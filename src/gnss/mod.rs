//! # GNSS constellations and satellite identifiers
//!
//! This module defines [`GnssSystem`](crate::gnss::GnssSystem), the closed set of
//! constellations known to the library, together with the conversions used to
//! turn loosely formatted satellite identifiers (RINEX 2 numbers, unpadded PRNs)
//! into the canonical three-character form (`"G05"`, `"S23"`, `"J01"`).
//!
//! The canonical identifier is what the [`ObjectRegistry`](crate::registry::ObjectRegistry)
//! uses as the key of every bootstrapped [`Transceiver`](crate::objects::transceiver::Transceiver).
//!
//! ## Conventions
//!
//! | system  | char | name | RINEX 2 offset |
//! |---------|------|------|----------------|
//! | GPS     | `G`  | GPS  | –              |
//! | GLONASS | `R`  | GLO  | –              |
//! | Galileo | `E`  | GAL  | –              |
//! | BeiDou  | `C`  | BDS  | –              |
//! | QZSS    | `J`  | QZS  | 192            |
//! | SBAS    | `S`  | SBS  | 100            |
//! | IRNSS   | `I`  | IRN  | –              |
//!
//! ## See also
//! ------------
//! * [`SatelliteCatalog`](crate::gnss::catalog::SatelliteCatalog) – Satellites per constellation used at bootstrap.
pub mod catalog;

use std::{fmt, str::FromStr};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::{
    constants::{SatId, QZS_OFFSET, SBS_OFFSET},
    gnut_errors::GnutError,
};

static SAT_ID_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([A-Za-z])?\s*(\d{1,3})\s*$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub enum GnssSystem {
    Gps,
    Glonass,
    Galileo,
    BeiDou,
    Qzss,
    Sbas,
    Irnss,
}

impl GnssSystem {
    /// Every supported constellation, in bootstrap order.
    pub const ALL: [GnssSystem; 7] = [
        GnssSystem::Gps,
        GnssSystem::Glonass,
        GnssSystem::Galileo,
        GnssSystem::BeiDou,
        GnssSystem::Qzss,
        GnssSystem::Sbas,
        GnssSystem::Irnss,
    ];

    /// One-letter RINEX 3 system code.
    pub fn as_char(&self) -> char {
        match self {
            GnssSystem::Gps => 'G',
            GnssSystem::Glonass => 'R',
            GnssSystem::Galileo => 'E',
            GnssSystem::BeiDou => 'C',
            GnssSystem::Qzss => 'J',
            GnssSystem::Sbas => 'S',
            GnssSystem::Irnss => 'I',
        }
    }

    /// Three-letter system name.
    pub fn as_str(&self) -> &'static str {
        match self {
            GnssSystem::Gps => "GPS",
            GnssSystem::Glonass => "GLO",
            GnssSystem::Galileo => "GAL",
            GnssSystem::BeiDou => "BDS",
            GnssSystem::Qzss => "QZS",
            GnssSystem::Sbas => "SBS",
            GnssSystem::Irnss => "IRN",
        }
    }

    pub fn from_char(c: char) -> Result<Self, GnutError> {
        match c.to_ascii_uppercase() {
            'G' => Ok(GnssSystem::Gps),
            'R' => Ok(GnssSystem::Glonass),
            'E' => Ok(GnssSystem::Galileo),
            'C' => Ok(GnssSystem::BeiDou),
            'J' => Ok(GnssSystem::Qzss),
            'S' => Ok(GnssSystem::Sbas),
            'I' => Ok(GnssSystem::Irnss),
            other => Err(GnutError::InvalidGnssSystem(other.to_string())),
        }
    }

    /// Constellation of a satellite identifier, read from its leading character.
    ///
    /// Arguments
    /// -----------------
    /// * `sat`: A satellite identifier such as `"E11"`.
    ///
    /// Return
    /// ----------
    /// * The [`GnssSystem`] or [`GnutError::InvalidSatelliteId`] when the identifier
    ///   does not start with a known system code.
    pub fn from_sat(sat: &str) -> Result<Self, GnutError> {
        sat.trim_start()
            .chars()
            .next()
            .ok_or_else(|| GnutError::InvalidSatelliteId(sat.to_string()))
            .and_then(|c| {
                GnssSystem::from_char(c).map_err(|_| GnutError::InvalidSatelliteId(sat.to_string()))
            })
    }

    /// Canonical satellite identifier for a PRN of this constellation.
    pub fn format_sat(&self, prn: u16) -> SatId {
        format!("{}{:02}", self.as_char(), prn)
    }

    /// Normalize a satellite identifier into its canonical `"<char><prn:02>"` form.
    ///
    /// Accepted inputs are RINEX 3 identifiers (`"G05"`), unpadded ones (`"G5"`,
    /// `"G 5"`) and bare numbers (`"5"`), the latter being attributed to `default`.
    /// SBAS and QZSS numbers written with their RINEX 2 offsets (`"S120"`, `"J193"`)
    /// are brought back to their PRN.
    ///
    /// Arguments
    /// -----------------
    /// * `sat`: The raw identifier.
    /// * `default`: Constellation used when `sat` carries no system character.
    ///
    /// Return
    /// ----------
    /// * The canonical identifier, or [`GnutError::InvalidSatelliteId`].
    pub fn normalize_sat(sat: &str, default: GnssSystem) -> Result<SatId, GnutError> {
        let invalid = || GnutError::InvalidSatelliteId(sat.to_string());

        let caps = SAT_ID_REGEX.captures(sat).ok_or_else(invalid)?;
        let system = match caps.get(1) {
            Some(c) => c
                .as_str()
                .chars()
                .next()
                .ok_or_else(invalid)
                .and_then(|c| GnssSystem::from_char(c).map_err(|_| invalid()))?,
            None => default,
        };
        let mut prn: u16 = caps[2].parse().map_err(|_| invalid())?;

        match system {
            GnssSystem::Sbas if prn >= SBS_OFFSET => prn -= SBS_OFFSET,
            GnssSystem::Qzss if prn > QZS_OFFSET => prn -= QZS_OFFSET,
            _ => {}
        }
        if prn == 0 || prn > 99 {
            return Err(invalid());
        }
        Ok(system.format_sat(prn))
    }
}

impl fmt::Display for GnssSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GnssSystem {
    type Err = GnutError;

    /// Parse a system from its three-letter name, a long alias or its RINEX char.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        match upper.as_str() {
            "GPS" | "NAVSTAR" => Ok(GnssSystem::Gps),
            "GLO" | "GLONASS" => Ok(GnssSystem::Glonass),
            "GAL" | "GALILEO" => Ok(GnssSystem::Galileo),
            "BDS" | "BEIDOU" | "COMPASS" => Ok(GnssSystem::BeiDou),
            "QZS" | "QZSS" => Ok(GnssSystem::Qzss),
            "SBS" | "SBAS" => Ok(GnssSystem::Sbas),
            "IRN" | "IRNSS" | "NAVIC" => Ok(GnssSystem::Irnss),
            code if code.len() == 1 => code
                .chars()
                .next()
                .ok_or_else(|| GnutError::InvalidGnssSystem(s.to_string()))
                .and_then(GnssSystem::from_char)
                .map_err(|_| GnutError::InvalidGnssSystem(s.to_string())),
            _ => Err(GnutError::InvalidGnssSystem(s.to_string())),
        }
    }
}

impl TryFrom<String> for GnssSystem {
    type Error = GnutError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<&str> for GnssSystem {
    type Error = GnutError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

fn bds_prn(sat: &str) -> Option<u16> {
    let rest = sat.trim().strip_prefix('C')?;
    rest.parse().ok()
}

/// `true` for BeiDou satellites on geostationary orbits (C01–C05, C59–C63).
pub fn bds_geo(sat: &str) -> bool {
    matches!(bds_prn(sat), Some(1..=5) | Some(59..=63))
}

/// `true` for BeiDou satellites on inclined geosynchronous orbits.
pub fn bds_igso(sat: &str) -> bool {
    matches!(
        bds_prn(sat),
        Some(6..=10) | Some(13) | Some(16) | Some(38..=40)
    )
}
