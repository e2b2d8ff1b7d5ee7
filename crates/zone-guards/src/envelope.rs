use geofence_core::GeofenceError;
use serde::{Deserialize, Serialize};

/// Numeric constants the resolver classifies against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResolverEnvelope {
    /// Containment radius for zones with no usable radius.
    pub default_zone_radius_m: f64,
    /// Radius assumed for the closest safe zone when measuring edge distance.
    pub default_safe_edge_radius_m: f64,
    /// Edge distance beyond which an unzoned patient is a warning.
    pub warning_edge_distance_m: f64,
}

impl ResolverEnvelope {
    pub fn default_for_caregiver() -> Self {
        Self {
            default_zone_radius_m: 100.0,
            default_safe_edge_radius_m: 50.0,
            warning_edge_distance_m: 150.0,
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, GeofenceError> {
        let envelope: Self = serde_json::from_str(raw)?;
        envelope.validate()?;
        Ok(envelope)
    }

    pub fn validate(&self) -> Result<(), GeofenceError> {
        let fields = [
            ("default_zone_radius_m", self.default_zone_radius_m),
            ("default_safe_edge_radius_m", self.default_safe_edge_radius_m),
            ("warning_edge_distance_m", self.warning_edge_distance_m),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(GeofenceError::InvalidEnvelope {
                    field,
                    reason: format!("expected a finite non-negative distance, got {value}"),
                });
            }
        }
        Ok(())
    }
}

impl Default for ResolverEnvelope {
    fn default() -> Self {
        Self::default_for_caregiver()
    }
}

/// Weights and thresholds for the 0-100 risk score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RiskEnvelope {
    pub outside_safe_zone: u32,
    /// Added once within `danger_proximity_m` of a danger center and again when inside it.
    pub near_danger_zone: u32,
    pub night_hours: u32,
    pub duration_outside: u32,
    pub no_caregiver_response: u32,
    /// Doubled when the signal is lost outright.
    pub gps_weak: u32,
    pub in_buffer_zone: u32,
    pub in_restricted_zone: u32,
    pub anomaly_bonus: u32,
    pub danger_proximity_m: f64,
    pub time_outside_threshold_s: u64,
    pub no_response_threshold_s: u64,
    /// Night runs from `night_start_hour` through midnight to `night_end_hour`.
    pub night_start_hour: u32,
    pub night_end_hour: u32,
    /// Score kept during the patient's usual walk, in percent.
    pub usual_walk_percent: u32,
    /// Score scaling for a night exit, in percent.
    pub night_exit_percent: u32,
    pub default_zone_radius_m: f64,
}

impl RiskEnvelope {
    pub fn default_for_caregiver() -> Self {
        Self {
            outside_safe_zone: 30,
            near_danger_zone: 40,
            night_hours: 15,
            duration_outside: 20,
            no_caregiver_response: 25,
            gps_weak: 10,
            in_buffer_zone: 10,
            in_restricted_zone: 25,
            anomaly_bonus: 10,
            danger_proximity_m: 50.0,
            time_outside_threshold_s: 600,
            no_response_threshold_s: 600,
            night_start_hour: 20,
            night_end_hour: 6,
            usual_walk_percent: 70,
            night_exit_percent: 130,
            default_zone_radius_m: 100.0,
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, GeofenceError> {
        let envelope: Self = serde_json::from_str(raw)?;
        envelope.validate()?;
        Ok(envelope)
    }

    pub fn validate(&self) -> Result<(), GeofenceError> {
        for (field, hour) in [
            ("night_start_hour", self.night_start_hour),
            ("night_end_hour", self.night_end_hour),
        ] {
            if hour > 23 {
                return Err(GeofenceError::InvalidEnvelope {
                    field,
                    reason: format!("expected an hour in 0..=23, got {hour}"),
                });
            }
        }
        for (field, value) in [
            ("danger_proximity_m", self.danger_proximity_m),
            ("default_zone_radius_m", self.default_zone_radius_m),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(GeofenceError::InvalidEnvelope {
                    field,
                    reason: format!("expected a finite non-negative distance, got {value}"),
                });
            }
        }
        Ok(())
    }
}

impl Default for RiskEnvelope {
    fn default() -> Self {
        Self::default_for_caregiver()
    }
}

/// Thresholds for flagging a trip as out of character.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnomalyEnvelope {
    pub speed_deviation_mps: f64,
    /// Trip duration beyond `avg + multiplier * std` is anomalous.
    pub duration_std_multiplier: f64,
    pub direction_change_deg: f64,
    pub circling_return_m: f64,
}

impl AnomalyEnvelope {
    pub fn default_for_caregiver() -> Self {
        Self {
            speed_deviation_mps: 0.5,
            duration_std_multiplier: 2.0,
            direction_change_deg: 45.0,
            circling_return_m: 20.0,
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, GeofenceError> {
        let envelope: Self = serde_json::from_str(raw)?;
        envelope.validate()?;
        Ok(envelope)
    }

    pub fn validate(&self) -> Result<(), GeofenceError> {
        let fields = [
            ("speed_deviation_mps", self.speed_deviation_mps),
            ("duration_std_multiplier", self.duration_std_multiplier),
            ("direction_change_deg", self.direction_change_deg),
            ("circling_return_m", self.circling_return_m),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(GeofenceError::InvalidEnvelope {
                    field,
                    reason: format!("expected a finite non-negative value, got {value}"),
                });
            }
        }
        Ok(())
    }
}

impl Default for AnomalyEnvelope {
    fn default() -> Self {
        Self::default_for_caregiver()
    }
}
