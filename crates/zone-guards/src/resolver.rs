use crate::envelope::ResolverEnvelope;
use crate::status::PatientStatus;
use geofence_core::{GeoPoint, Zone, ZoneType};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Where a patient stands relative to their geofences.
///
/// Every dashboard surface (marker color, status badge, zone label, distance
/// messaging, escalation banner) reads from this one record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ZoneInfo {
    pub zone: Option<Zone>,
    pub status: PatientStatus,
    /// Meters to the center of the closest safe zone; 0 when inside one or
    /// when no safe zone exists.
    pub distance: f64,
    pub closest_safe_zone: Option<Zone>,
    pub is_in_safe_zone: bool,
    pub zone_type: ZoneType,
    pub zone_display_name: String,
}

impl ZoneInfo {
    fn unconfigured() -> Self {
        Self {
            zone: None,
            status: PatientStatus::Safe,
            distance: 0.0,
            closest_safe_zone: None,
            is_in_safe_zone: true,
            zone_type: ZoneType::Safe,
            zone_display_name: "No zones configured".into(),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Membership {
    danger: bool,
    restricted: bool,
    buffer: bool,
    safe: bool,
    routine: bool,
}

/// Resolve the patient's zone and status with the caregiver defaults.
pub fn calculate_zone_info(position: GeoPoint, zones: &[Zone]) -> ZoneInfo {
    calculate_zone_info_with(position, zones, &ResolverEnvelope::default_for_caregiver())
}

/// Resolve the patient's zone and status.
///
/// Zones are scanned once, in order. The occupied zone is picked with guards
/// that read the membership flags as they stand at that point of the scan,
/// so a lower-priority zone listed first can still be replaced later. Status
/// only looks at the final flags.
pub fn calculate_zone_info_with(
    position: GeoPoint,
    zones: &[Zone],
    envelope: &ResolverEnvelope,
) -> ZoneInfo {
    if zones.is_empty() {
        return ZoneInfo::unconfigured();
    }

    let mut inside = Membership::default();
    let mut current: Option<&Zone> = None;
    let mut closest_safe: Option<(&Zone, f64)> = None;

    for zone in zones {
        let Some(center) = zone.center else {
            continue;
        };

        let distance = position.distance_to(&center);
        let radius = zone.radius_or(envelope.default_zone_radius_m);
        let is_inside = distance <= radius;
        trace!(zone = %zone.id, zone_type = %zone.zone_type, distance, radius, is_inside, "containment");

        if zone.zone_type == ZoneType::Safe
            && distance < closest_safe.map_or(f64::INFINITY, |(_, best)| best)
        {
            closest_safe = Some((zone, distance));
        }

        if !is_inside {
            continue;
        }

        match zone.zone_type {
            ZoneType::Danger => {
                inside.danger = true;
                current = Some(zone);
            }
            ZoneType::Restricted => {
                inside.restricted = true;
                if !inside.danger {
                    current = Some(zone);
                }
            }
            ZoneType::Buffer => {
                inside.buffer = true;
                if !inside.danger && !inside.restricted && !inside.safe {
                    current = Some(zone);
                }
            }
            ZoneType::Safe => {
                inside.safe = true;
                if !inside.danger && !inside.restricted {
                    current = Some(zone);
                }
            }
            ZoneType::Routine => {
                inside.routine = true;
                if current.is_none() {
                    current = Some(zone);
                }
            }
            ZoneType::Trusted | ZoneType::Unknown => {}
        }
    }

    let status = classify(inside, closest_safe, envelope);

    let zone_type = match current {
        Some(zone) => zone.zone_type,
        None if inside.safe => ZoneType::Safe,
        None => ZoneType::Unknown,
    };
    // a blank zone name falls through to the proximity label
    let zone_display_name = match (current, closest_safe) {
        (Some(zone), _) if !zone.name.is_empty() => zone.name.clone(),
        (_, Some((safe, _))) => format!("Near {}", safe.name),
        (_, None) => "Unknown Location".into(),
    };
    let distance = match closest_safe {
        Some((_, d)) if !inside.safe => d,
        _ => 0.0,
    };

    debug!(
        ?inside,
        current = ?current.map(|z| z.id.as_str()),
        closest_safe = ?closest_safe.map(|(z, _)| z.id.as_str()),
        %status,
        distance,
        "zone info resolved"
    );

    ZoneInfo {
        zone: current.cloned(),
        status,
        distance,
        closest_safe_zone: closest_safe.map(|(z, _)| z.clone()),
        is_in_safe_zone: inside.safe,
        zone_type,
        zone_display_name,
    }
}

fn classify(
    inside: Membership,
    closest_safe: Option<(&Zone, f64)>,
    envelope: &ResolverEnvelope,
) -> PatientStatus {
    if inside.danger {
        return PatientStatus::Emergency;
    }
    if inside.restricted {
        return PatientStatus::Urgent;
    }
    if inside.safe {
        return PatientStatus::Safe;
    }
    if inside.buffer || inside.routine {
        return PatientStatus::Advisory;
    }

    // Outside every zone: band by distance to the nearest safe zone's edge.
    // Hugging the edge is still advisory, never safe.
    match closest_safe {
        None => PatientStatus::Warning,
        Some((zone, center_distance)) => {
            let edge = center_distance - zone.radius_or(envelope.default_safe_edge_radius_m);
            if edge > envelope.warning_edge_distance_m {
                PatientStatus::Warning
            } else {
                PatientStatus::Advisory
            }
        }
    }
}
