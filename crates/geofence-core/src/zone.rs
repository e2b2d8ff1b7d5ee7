use crate::error::GeofenceError;
use crate::geo::GeoPoint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Safety classification of a geofence.
///
/// Anything the API sends outside the closed set decodes as `Unknown`
/// instead of failing the whole payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ZoneType {
    Safe,
    Buffer,
    Restricted,
    Danger,
    Routine,
    Trusted,
    #[serde(other)]
    Unknown,
}

impl ZoneType {
    pub const ALL: [ZoneType; 7] = [
        ZoneType::Safe,
        ZoneType::Buffer,
        ZoneType::Restricted,
        ZoneType::Danger,
        ZoneType::Routine,
        ZoneType::Trusted,
        ZoneType::Unknown,
    ];

    /// Lenient parse; unrecognized names map to `Unknown`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "safe" => ZoneType::Safe,
            "buffer" => ZoneType::Buffer,
            "restricted" => ZoneType::Restricted,
            "danger" => ZoneType::Danger,
            "routine" => ZoneType::Routine,
            "trusted" => ZoneType::Trusted,
            _ => ZoneType::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ZoneType::Safe => "safe",
            ZoneType::Buffer => "buffer",
            ZoneType::Restricted => "restricted",
            ZoneType::Danger => "danger",
            ZoneType::Routine => "routine",
            ZoneType::Trusted => "trusted",
            ZoneType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ZoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ZoneShape {
    #[default]
    Circle,
    Polygon,
}

fn default_active() -> bool {
    true
}

/// A named geofence as configured by caregivers.
///
/// Only circles take part in resolution; polygon vertices are carried
/// through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub zone_type: ZoneType,
    #[serde(default)]
    pub patient_id: Option<String>,
    #[serde(default)]
    pub shape: ZoneShape,
    #[serde(default)]
    pub center: Option<GeoPoint>,
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Vec<GeoPoint>>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Zone {
    pub fn circle(
        id: impl Into<String>,
        name: impl Into<String>,
        zone_type: ZoneType,
        center: GeoPoint,
        radius: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            zone_type,
            patient_id: None,
            shape: ZoneShape::Circle,
            center: Some(center),
            radius: Some(radius),
            coordinates: None,
            is_active: true,
            color: None,
        }
    }

    /// Configured radius, or `fallback` when it is unset, zero or NaN.
    pub fn radius_or(&self, fallback: f64) -> f64 {
        match self.radius {
            Some(r) if r != 0.0 && !r.is_nan() => r,
            _ => fallback,
        }
    }
}

/// Decode the zone array returned by the monitoring API.
pub fn zones_from_json(payload: &str) -> Result<Vec<Zone>, GeofenceError> {
    Ok(serde_json::from_str(payload)?)
}
