use crate::demo::{zones_or_demo, DEFAULT_POSITION};
use crate::palette::{status_color, zone_color};
use crate::resolver::{calculate_zone_info, ZoneInfo};
use crate::status::StatusDisplay;
use chrono::{DateTime, Utc};
use geofence_core::{GeoPoint, GeofenceError, Zone};
use serde::Serialize;

/// Everything a patient header needs to render one evaluation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub patient_id: String,
    pub evaluated_at: DateTime<Utc>,
    pub position: GeoPoint,
    pub info: ZoneInfo,
    pub status_color: &'static str,
    pub zone_color: &'static str,
    pub display: StatusDisplay,
}

impl StatusSnapshot {
    pub fn to_json(&self) -> Result<String, GeofenceError> {
        Ok(serde_json::to_string(self)?)
    }
}

pub fn snapshot_patient(
    patient_id: impl Into<String>,
    position: Option<GeoPoint>,
    zones: &[Zone],
) -> StatusSnapshot {
    snapshot_patient_at(patient_id, position, zones, Utc::now())
}

/// Evaluate a patient the way dashboard callers do: a missing fix falls back
/// to [`DEFAULT_POSITION`] and an empty zone list to the demo set.
pub fn snapshot_patient_at(
    patient_id: impl Into<String>,
    position: Option<GeoPoint>,
    zones: &[Zone],
    evaluated_at: DateTime<Utc>,
) -> StatusSnapshot {
    let position = position.unwrap_or(DEFAULT_POSITION);
    let zones = zones_or_demo(zones);
    let info = calculate_zone_info(position, &zones);

    StatusSnapshot {
        patient_id: patient_id.into(),
        evaluated_at,
        position,
        status_color: status_color(info.status),
        zone_color: zone_color(info.zone_type),
        display: info.status.display(),
        info,
    }
}
