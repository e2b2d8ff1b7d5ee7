use crate::envelope::AnomalyEnvelope;
use geofence_core::{count_direction_changes, is_circling, leg_headings, speed_mps, LocationFix};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A patient's typical outing, learned from past trips.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TripBaseline {
    pub avg_speed_mps: f64,
    pub avg_duration_s: f64,
    pub std_duration_s: f64,
}

impl Default for TripBaseline {
    fn default() -> Self {
        Self {
            avg_speed_mps: 0.8,
            avg_duration_s: 900.0,
            std_duration_s: 300.0,
        }
    }
}

impl TripBaseline {
    fn duration_limit(&self, envelope: &AnomalyEnvelope) -> f64 {
        self.avg_duration_s + envelope.duration_std_multiplier * self.std_duration_s
    }
}

/// True when the trip runs long or the pace is off the baseline.
pub fn detect_anomaly(
    speed_mps: f64,
    duration_s: f64,
    baseline: &TripBaseline,
    envelope: &AnomalyEnvelope,
) -> bool {
    duration_s > baseline.duration_limit(envelope)
        || (speed_mps - baseline.avg_speed_mps).abs() > envelope.speed_deviation_mps
}

/// Confusion score 0-100 from turn count, circling and how overdue the trip is.
pub fn wandering_score(direction_changes: usize, circling: bool, duration_ratio: f64) -> u32 {
    let mut score = match direction_changes {
        0..=2 => 0,
        3..=5 => 10,
        6..=10 => 25,
        _ => 40,
    };
    if circling {
        score += 30;
    }
    score += if duration_ratio > 3.0 {
        30
    } else if duration_ratio > 2.0 {
        20
    } else if duration_ratio > 1.5 {
        10
    } else {
        0
    };
    score.min(100)
}

pub fn anomaly_descriptions(
    speed_mps: f64,
    duration_s: f64,
    direction_changes: usize,
    baseline: &TripBaseline,
    envelope: &AnomalyEnvelope,
) -> Vec<String> {
    let mut descriptions = Vec::new();

    if duration_s > baseline.duration_limit(envelope) {
        descriptions.push(format!(
            "Trip unusually long: {}min vs typical {}min",
            (duration_s / 60.0) as u64,
            (baseline.avg_duration_s / 60.0) as u64
        ));
    }

    let speed_diff = speed_mps - baseline.avg_speed_mps;
    if speed_diff.abs() > envelope.speed_deviation_mps {
        let pace = if speed_diff > 0.0 { "faster" } else { "slower" };
        descriptions.push(format!(
            "Moving {pace} than usual: {speed_mps:.1}m/s vs {:.1}m/s",
            baseline.avg_speed_mps
        ));
    }

    if direction_changes > 5 {
        descriptions.push(format!(
            "Frequent direction changes: {direction_changes} changes detected"
        ));
    }
    descriptions
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TripAssessment {
    /// Speed over the latest leg.
    pub speed_mps: f64,
    pub duration_s: f64,
    pub direction_changes: usize,
    pub circling: bool,
    pub wandering_score: u32,
    pub anomalous: bool,
    pub descriptions: Vec<String>,
}

/// Evaluate an ongoing trip, oldest fix first.
pub fn assess_trip(
    fixes: &[LocationFix],
    baseline: &TripBaseline,
    envelope: &AnomalyEnvelope,
) -> TripAssessment {
    let headings = leg_headings(fixes);
    let direction_changes = count_direction_changes(&headings, envelope.direction_change_deg);
    let points: Vec<_> = fixes.iter().map(LocationFix::point).collect();
    let circling = is_circling(&points, envelope.circling_return_m);

    let duration_s = match (fixes.first(), fixes.last()) {
        (Some(first), Some(last)) => {
            (last.timestamp - first.timestamp).num_milliseconds().max(0) as f64 / 1000.0
        }
        _ => 0.0,
    };
    let speed = match fixes {
        [.., prev, last] => speed_mps(prev, last),
        _ => 0.0,
    };
    let duration_ratio = if baseline.avg_duration_s > 0.0 {
        duration_s / baseline.avg_duration_s
    } else {
        0.0
    };

    let wandering_score = wandering_score(direction_changes, circling, duration_ratio);
    let anomalous = detect_anomaly(speed, duration_s, baseline, envelope);
    debug!(
        fixes = fixes.len(),
        direction_changes,
        circling,
        wandering_score,
        anomalous,
        "trip assessed"
    );

    TripAssessment {
        speed_mps: speed,
        duration_s,
        direction_changes,
        circling,
        wandering_score,
        anomalous,
        descriptions: anomaly_descriptions(speed, duration_s, direction_changes, baseline, envelope),
    }
}
