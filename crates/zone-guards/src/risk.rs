use crate::envelope::RiskEnvelope;
use geofence_core::{GeoPoint, Zone, ZoneType};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GpsSignal {
    #[default]
    Good,
    Weak,
    Lost,
}

impl GpsSignal {
    pub fn as_str(self) -> &'static str {
        match self {
            GpsSignal::Good => "good",
            GpsSignal::Weak => "weak",
            GpsSignal::Lost => "lost",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=19 => RiskLevel::Low,
            20..=39 => RiskLevel::Medium,
            40..=59 => RiskLevel::High,
            _ => RiskLevel::Critical,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-positional context for one risk evaluation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskInputs {
    pub gps_signal: GpsSignal,
    /// Seconds since the patient left their safe zone.
    pub time_outside_safe_s: u64,
    /// Seconds since a caregiver last acknowledged an alert.
    pub no_response_s: u64,
    /// Local hour of day, 0-23.
    pub hour: u32,
    pub has_anomaly: bool,
    pub usual_walk_time: bool,
}

impl RiskInputs {
    pub fn at_hour(hour: u32) -> Self {
        Self {
            gps_signal: GpsSignal::Good,
            time_outside_safe_s: 0,
            no_response_s: 0,
            hour,
            has_anomaly: false,
            usual_walk_time: false,
        }
    }
}

/// Zone memberships the risk score reads. Unlike the resolver this has no
/// scan-order guards: every containing zone counts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ZoneExposure {
    pub in_safe: bool,
    pub in_buffer: bool,
    pub in_restricted: bool,
    pub in_danger: bool,
    /// Meters to the nearest danger zone center.
    pub nearest_danger_m: Option<f64>,
}

pub fn zone_exposure(position: GeoPoint, zones: &[Zone], envelope: &RiskEnvelope) -> ZoneExposure {
    let mut exposure = ZoneExposure::default();
    for zone in zones {
        let Some(center) = zone.center else {
            continue;
        };
        let distance = position.distance_to(&center);
        let inside = distance <= zone.radius_or(envelope.default_zone_radius_m);

        match zone.zone_type {
            ZoneType::Danger => {
                if exposure.nearest_danger_m.map_or(true, |best| distance < best) {
                    exposure.nearest_danger_m = Some(distance);
                }
                exposure.in_danger |= inside;
            }
            ZoneType::Safe => exposure.in_safe |= inside,
            ZoneType::Buffer => exposure.in_buffer |= inside,
            ZoneType::Restricted => exposure.in_restricted |= inside,
            ZoneType::Routine | ZoneType::Trusted | ZoneType::Unknown => {}
        }
    }
    exposure
}

/// Night wraps midnight: hours at or after the start, or before the end.
pub fn is_night_hours(hour: u32, envelope: &RiskEnvelope) -> bool {
    hour >= envelope.night_start_hour || hour < envelope.night_end_hour
}

fn near_danger(exposure: &ZoneExposure, envelope: &RiskEnvelope) -> Option<f64> {
    exposure
        .nearest_danger_m
        .filter(|d| *d < envelope.danger_proximity_m)
}

/// Weighted 0-100 risk score for a patient at `position`.
pub fn compute_risk_score(
    position: GeoPoint,
    zones: &[Zone],
    inputs: &RiskInputs,
    envelope: &RiskEnvelope,
) -> u32 {
    let exposure = zone_exposure(position, zones, envelope);
    score_exposure(&exposure, inputs, envelope)
}

fn score_exposure(exposure: &ZoneExposure, inputs: &RiskInputs, envelope: &RiskEnvelope) -> u32 {
    let night = is_night_hours(inputs.hour, envelope);
    let mut risk = 0;

    if !exposure.in_safe {
        risk += envelope.outside_safe_zone;
    }
    if exposure.in_buffer {
        risk += envelope.in_buffer_zone;
    }
    if exposure.in_restricted {
        risk += envelope.in_restricted_zone;
    }
    if near_danger(exposure, envelope).is_some() {
        risk += envelope.near_danger_zone;
    }
    if exposure.in_danger {
        risk += envelope.near_danger_zone;
    }
    if night {
        risk += envelope.night_hours;
    }
    if inputs.time_outside_safe_s > envelope.time_outside_threshold_s {
        risk += envelope.duration_outside;
    }
    if inputs.no_response_s > envelope.no_response_threshold_s {
        risk += envelope.no_caregiver_response;
    }
    risk += match inputs.gps_signal {
        GpsSignal::Good => 0,
        GpsSignal::Weak => envelope.gps_weak,
        GpsSignal::Lost => envelope.gps_weak * 2,
    };
    if inputs.has_anomaly {
        risk += envelope.anomaly_bonus;
    }

    if inputs.usual_walk_time {
        risk = risk * envelope.usual_walk_percent / 100;
    }
    if night && !exposure.in_safe {
        risk = risk * envelope.night_exit_percent / 100;
    }
    risk.min(100)
}

/// Human-readable list of the factors that contributed to the score.
pub fn risk_factors(
    position: GeoPoint,
    zones: &[Zone],
    inputs: &RiskInputs,
    envelope: &RiskEnvelope,
) -> Vec<String> {
    let exposure = zone_exposure(position, zones, envelope);
    factors_for(&exposure, inputs, envelope)
}

fn factors_for(exposure: &ZoneExposure, inputs: &RiskInputs, envelope: &RiskEnvelope) -> Vec<String> {
    let mut factors = Vec::new();

    if !exposure.in_safe {
        factors.push("Outside safe zone".to_string());
    }
    if exposure.in_buffer {
        factors.push("In buffer zone".to_string());
    }
    if exposure.in_restricted {
        factors.push("In restricted zone".to_string());
    }
    if let Some(distance) = near_danger(exposure, envelope) {
        factors.push(format!("Near danger zone ({}m)", distance as u64));
    }
    if exposure.in_danger {
        factors.push("INSIDE danger zone".to_string());
    }
    if is_night_hours(inputs.hour, envelope) {
        factors.push("Night hours".to_string());
    }
    if inputs.time_outside_safe_s > envelope.time_outside_threshold_s {
        factors.push(format!("Outside for {} minutes", inputs.time_outside_safe_s / 60));
    }
    if inputs.no_response_s > envelope.no_response_threshold_s {
        factors.push(format!("No response for {} minutes", inputs.no_response_s / 60));
    }
    if inputs.gps_signal != GpsSignal::Good {
        factors.push(format!("GPS signal {}", inputs.gps_signal.as_str()));
    }
    if inputs.has_anomaly {
        factors.push("Behavioral anomaly detected".to_string());
    }
    factors
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub score: u32,
    pub level: RiskLevel,
    pub factors: Vec<String>,
}

/// Score, level and explanation from a single zone scan.
pub fn assess_risk(
    position: GeoPoint,
    zones: &[Zone],
    inputs: &RiskInputs,
    envelope: &RiskEnvelope,
) -> RiskAssessment {
    let exposure = zone_exposure(position, zones, envelope);
    let score = score_exposure(&exposure, inputs, envelope);
    let level = RiskLevel::from_score(score);
    debug!(?exposure, score, %level, hour = inputs.hour, "risk assessed");

    RiskAssessment {
        score,
        level,
        factors: factors_for(&exposure, inputs, envelope),
    }
}
