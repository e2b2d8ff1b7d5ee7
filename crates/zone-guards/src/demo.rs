use geofence_core::{GeoPoint, Zone, ZoneType};
use std::borrow::Cow;

/// Position assumed when a patient has no live fix (San Francisco).
pub const DEFAULT_POSITION: GeoPoint = GeoPoint {
    lat: 37.7749,
    lng: -122.4194,
};

const MAIN_ROAD: GeoPoint = GeoPoint {
    lat: 37.777,
    lng: -122.417,
};

const PARK: GeoPoint = GeoPoint {
    lat: 37.7725,
    lng: -122.4212,
};

/// Demonstration geofences around the default home position.
pub fn demo_zones() -> Vec<Zone> {
    vec![
        Zone::circle("demo-home", "Home", ZoneType::Safe, DEFAULT_POSITION, 100.0),
        Zone::circle(
            "demo-perimeter",
            "Home Perimeter",
            ZoneType::Buffer,
            DEFAULT_POSITION,
            200.0,
        ),
        Zone::circle("demo-park", "Afternoon Walk", ZoneType::Routine, PARK, 80.0),
        Zone::circle("demo-main-road", "Main Road", ZoneType::Danger, MAIN_ROAD, 50.0),
    ]
}

/// Live zones when any are configured, otherwise the demonstration set.
pub fn zones_or_demo(zones: &[Zone]) -> Cow<'_, [Zone]> {
    if zones.is_empty() {
        Cow::Owned(demo_zones())
    } else {
        Cow::Borrowed(zones)
    }
}
