use crate::status::PatientStatus;
use geofence_core::ZoneType;

pub fn zone_color(zone_type: ZoneType) -> &'static str {
    match zone_type {
        ZoneType::Safe => "#10b981",
        ZoneType::Buffer => "#3b82f6",
        ZoneType::Danger => "#ef4444",
        ZoneType::Restricted => "#f97316",
        ZoneType::Routine => "#8b5cf6",
        ZoneType::Trusted => "#3b82f6",
        ZoneType::Unknown => "#f59e0b",
    }
}

/// Color for a raw type string; unrecognized names get the unknown color.
pub fn zone_color_for_name(raw: &str) -> &'static str {
    zone_color(ZoneType::parse(raw))
}

pub fn status_color(status: PatientStatus) -> &'static str {
    match status {
        PatientStatus::Safe => "#10b981",
        PatientStatus::Advisory => "#3b82f6",
        PatientStatus::Warning => "#f59e0b",
        PatientStatus::Urgent => "#f97316",
        PatientStatus::Emergency => "#ef4444",
    }
}
