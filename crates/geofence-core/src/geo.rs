use serde::{Deserialize, Serialize};

/// Mean Earth radius used by every distance calculation, in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        distance_meters(self.lat, self.lng, other.lat, other.lng)
    }

    pub fn bearing_to(&self, other: &GeoPoint) -> f64 {
        bearing_degrees(*self, *other)
    }
}

/// Haversine great-circle distance in meters.
///
/// Identical coordinates short-circuit to exactly `0.0` so rounding in the
/// haversine term can never leak a tiny non-zero distance.
pub fn distance_meters(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    if lat1 == lat2 && lng1 == lng2 {
        return 0.0;
    }

    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    // rounding can push `a` just past 1 near antipodes; keep the roots real
    let a = ((d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Initial great-circle bearing from `from` to `to`, normalized to `[0, 360)`.
pub fn bearing_degrees(from: GeoPoint, to: GeoPoint) -> f64 {
    let phi1 = from.lat.to_radians();
    let phi2 = to.lat.to_radians();
    let d_lambda = (to.lng - from.lng).to_radians();

    let x = d_lambda.sin() * phi2.cos();
    let y = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lambda.cos();

    let heading = x.atan2(y).to_degrees().rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if heading >= 360.0 {
        0.0
    } else {
        heading
    }
}

/// Inclusive circular containment: a point exactly on the radius is inside.
pub fn point_in_circle(point: GeoPoint, center: GeoPoint, radius_m: f64) -> bool {
    point.distance_to(&center) <= radius_m
}
