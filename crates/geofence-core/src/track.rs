use crate::geo::{bearing_degrees, point_in_circle, GeoPoint};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fewest samples a circling check will look at.
pub const MIN_CIRCLING_SAMPLES: usize = 5;

/// One timestamped GPS sample from a patient's tracker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LocationFix {
    pub lat: f64,
    pub lng: f64,
    pub timestamp: DateTime<Utc>,
}

impl LocationFix {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// Mean position of the most recent `window` fixes, used to damp GPS jitter.
pub fn moving_average(fixes: &[LocationFix], window: usize) -> Option<GeoPoint> {
    if fixes.is_empty() || window == 0 {
        return None;
    }
    let recent = &fixes[fixes.len().saturating_sub(window)..];
    let n = recent.len() as f64;
    let lat = recent.iter().map(|f| f.lat).sum::<f64>() / n;
    let lng = recent.iter().map(|f| f.lng).sum::<f64>() / n;
    Some(GeoPoint::new(lat, lng))
}

/// True when the last `n` fixes all fall outside the circle.
///
/// Fewer than `n` samples never counts as outside, so a single noisy fix
/// cannot trip an exit.
pub fn consecutive_outside(
    fixes: &[LocationFix],
    center: GeoPoint,
    radius_m: f64,
    n: usize,
) -> bool {
    if n == 0 || fixes.len() < n {
        return false;
    }
    fixes[fixes.len() - n..]
        .iter()
        .all(|f| !point_in_circle(f.point(), center, radius_m))
}

/// Ground speed between two fixes in m/s; zero when they share a timestamp.
pub fn speed_mps(a: &LocationFix, b: &LocationFix) -> f64 {
    let distance = a.point().distance_to(&b.point());
    let elapsed = (b.timestamp - a.timestamp).num_milliseconds().abs() as f64 / 1000.0;
    if elapsed > 0.0 {
        distance / elapsed
    } else {
        0.0
    }
}

/// Bearing of each leg between consecutive fixes, in degrees.
pub fn leg_headings(fixes: &[LocationFix]) -> Vec<f64> {
    fixes
        .windows(2)
        .map(|leg| bearing_degrees(leg[0].point(), leg[1].point()))
        .collect()
}

/// Number of turns sharper than `threshold_deg`, measured the short way
/// round the compass.
pub fn count_direction_changes(headings: &[f64], threshold_deg: f64) -> usize {
    headings
        .windows(2)
        .filter(|pair| {
            let diff = (pair[1] - pair[0]).abs();
            let diff = if diff > 180.0 { 360.0 - diff } else { diff };
            diff > threshold_deg
        })
        .count()
}

/// Detects a walk that keeps coming back to where it started.
///
/// A return counts once the patient has been more than three times
/// `return_radius_m` away and then comes back within `return_radius_m`.
/// Two returns make a circling pattern.
pub fn is_circling(points: &[GeoPoint], return_radius_m: f64) -> bool {
    if points.len() < MIN_CIRCLING_SAMPLES {
        return false;
    }
    let start = points[0];
    let mut returns = 0;
    let mut was_far = false;

    for point in &points[1..] {
        let distance = start.distance_to(point);
        if distance > return_radius_m * 3.0 {
            was_far = true;
        } else if was_far && distance < return_radius_m {
            returns += 1;
            was_far = false;
        }
    }
    returns >= 2
}
