use crate::geo::{bearing_degrees, distance_meters, point_in_circle, GeoPoint};
use crate::track::{
    consecutive_outside, count_direction_changes, is_circling, leg_headings, moving_average,
    speed_mps, LocationFix,
};
use crate::zone::{zones_from_json, Zone, ZoneShape, ZoneType};
use crate::{GeofenceError, EARTH_RADIUS_M};
use chrono::{TimeZone, Utc};
use rand::Rng;

fn fix_at(lat: f64, lng: f64, secs: i64) -> LocationFix {
    LocationFix {
        lat,
        lng,
        timestamp: Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap(),
    }
}

#[test]
fn distance_is_symmetric_and_zero_on_identity() {
    let mut rng = rand::thread_rng();

    for _ in 0..200 {
        let a = GeoPoint::new(rng.gen_range(-80.0..80.0), rng.gen_range(-179.0..179.0));
        let b = GeoPoint::new(rng.gen_range(-80.0..80.0), rng.gen_range(-179.0..179.0));
        let ab = a.distance_to(&b);
        let ba = b.distance_to(&a);
        assert!((ab - ba).abs() <= 1e-6 * ab.max(1.0));
        assert!(ab >= 0.0);
        assert_eq!(a.distance_to(&a), 0.0);
    }
}

#[test]
fn one_degree_of_longitude_on_equator() {
    let d = distance_meters(0.0, 0.0, 0.0, 1.0);
    assert!((d - 111_195.0).abs() < 111_195.0 * 0.01, "got {d}");
}

#[test]
fn small_step_in_san_francisco() {
    let d = distance_meters(37.7749, -122.4194, 37.7750, -122.4194);
    assert!((d - 11.1).abs() < 11.1 * 0.05, "got {d}");
}

#[test]
fn identical_coordinates_are_exactly_zero() {
    assert_eq!(distance_meters(37.7749, -122.4194, 37.7749, -122.4194), 0.0);
    assert_eq!(distance_meters(-90.0, 0.0, -90.0, 0.0), 0.0);
    assert_eq!(distance_meters(0.0, -0.0, -0.0, 0.0), 0.0);
    assert_eq!(distance_meters(-0.0, -0.0, 0.0, 0.0), 0.0);
}

#[test]
fn antipodal_distance_stays_finite() {
    let half_circumference = std::f64::consts::PI * EARTH_RADIUS_M;
    let d = distance_meters(-88.7864, -178.5704, 88.7864, 1.4296);
    assert!(d.is_finite() && d >= 0.0, "got {d}");
    assert!((d - half_circumference).abs() < 1.0, "got {d}");

    let mut rng = rand::thread_rng();
    for _ in 0..20_000 {
        let lat: f64 = rng.gen_range(-90.0..90.0);
        let lng: f64 = rng.gen_range(-180.0..180.0);
        let antipode_lng = if lng > 0.0 { lng - 180.0 } else { lng + 180.0 };
        let d = distance_meters(lat, lng, -lat, antipode_lng);
        assert!(d.is_finite() && d >= 0.0, "NaN between ({lat}, {lng}) and its antipode");
        assert!(d <= half_circumference + 1e-6);
    }
}

#[test]
fn bearing_points_along_the_compass() {
    let origin = GeoPoint::new(0.0, 0.0);
    assert!(bearing_degrees(origin, GeoPoint::new(1.0, 0.0)).abs() < 1e-9);
    assert!((bearing_degrees(origin, GeoPoint::new(0.0, 1.0)) - 90.0).abs() < 1e-9);
    assert!((bearing_degrees(origin, GeoPoint::new(-1.0, 0.0)) - 180.0).abs() < 1e-9);
    assert!((origin.bearing_to(&GeoPoint::new(0.0, -1.0)) - 270.0).abs() < 1e-9);
}

#[test]
fn bearing_stays_in_range() {
    let mut rng = rand::thread_rng();
    for _ in 0..200 {
        let a = GeoPoint::new(rng.gen_range(-80.0..80.0), rng.gen_range(-179.0..179.0));
        let b = GeoPoint::new(rng.gen_range(-80.0..80.0), rng.gen_range(-179.0..179.0));
        let h = bearing_degrees(a, b);
        assert!((0.0..360.0).contains(&h));
    }
}

#[test]
fn circle_boundary_is_inclusive() {
    let center = GeoPoint::new(37.7749, -122.4194);
    let edge = GeoPoint::new(37.7758, -122.4194);
    let radius = edge.distance_to(&center);
    assert!(point_in_circle(edge, center, radius));
    assert!(!point_in_circle(edge, center, radius - 0.01));
}

#[test]
fn moving_average_uses_trailing_window() {
    let fixes: Vec<_> = (1..=5).map(|i| fix_at(i as f64, -(i as f64), i)).collect();

    let avg = moving_average(&fixes, 3).unwrap();
    assert!((avg.lat - 4.0).abs() < 1e-12);
    assert!((avg.lng + 4.0).abs() < 1e-12);

    let all = moving_average(&fixes, 50).unwrap();
    assert!((all.lat - 3.0).abs() < 1e-12);

    assert!(moving_average(&[], 5).is_none());
    assert!(moving_average(&fixes, 0).is_none());
}

#[test]
fn consecutive_outside_needs_full_run() {
    let home = GeoPoint::new(37.7749, -122.4194);
    let inside = fix_at(37.7749, -122.4194, 0);
    let away = |s| fix_at(37.7800, -122.4194, s);

    assert!(consecutive_outside(&[inside, away(1), away(2), away(3)], home, 100.0, 3));
    assert!(!consecutive_outside(&[away(1), away(2), inside], home, 100.0, 3));
    assert!(!consecutive_outside(&[away(1), away(2)], home, 100.0, 3));
}

#[test]
fn consecutive_outside_with_zero_run_is_never_outside() {
    let home = GeoPoint::new(37.7749, -122.4194);
    let away = fix_at(37.7800, -122.4194, 0);
    assert!(!consecutive_outside(&[away], home, 100.0, 0));
    assert!(!consecutive_outside(&[away, away, away], home, 100.0, 0));
    assert!(!consecutive_outside(&[], home, 100.0, 0));
}

#[test]
fn speed_between_fixes() {
    let a = fix_at(37.7749, -122.4194, 0);
    let b = fix_at(37.7750, -122.4194, 10);
    let v = speed_mps(&a, &b);
    assert!((v - 1.112).abs() < 0.01, "got {v}");
    assert!((speed_mps(&b, &a) - v).abs() < 1e-12);
    assert_eq!(speed_mps(&a, &a), 0.0);
}

#[test]
fn zone_type_parse_is_lenient() {
    for ty in ZoneType::ALL {
        assert_eq!(ZoneType::parse(ty.as_str()), ty);
    }
    assert_eq!(ZoneType::parse("bogus"), ZoneType::Unknown);
    assert_eq!(ZoneType::parse("SAFE"), ZoneType::Unknown);
}

#[test]
fn radius_fallback_covers_unset_zero_and_nan() {
    let center = GeoPoint::new(0.0, 0.0);
    let mut zone = Zone::circle("z", "Z", ZoneType::Safe, center, 250.0);
    assert_eq!(zone.radius_or(100.0), 250.0);
    zone.radius = Some(0.0);
    assert_eq!(zone.radius_or(100.0), 100.0);
    zone.radius = Some(f64::NAN);
    assert_eq!(zone.radius_or(100.0), 100.0);
    zone.radius = None;
    assert_eq!(zone.radius_or(50.0), 50.0);
}

#[test]
fn decodes_api_zone_payload() {
    let payload = r##"[
        {"id": "z1", "patientId": "p1", "name": "Home", "type": "safe", "shape": "circle",
         "center": {"lat": 37.7749, "lng": -122.4194}, "radius": 100, "isActive": true, "color": "#10b981"},
        {"id": "z2", "name": "Somewhere", "type": "bogus", "center": {"lat": 1.0, "lng": 2.0}},
        {"id": "z3", "name": "Lot", "type": "restricted", "shape": "polygon", "isActive": false,
         "coordinates": [{"lat": 0.0, "lng": 0.0}, {"lat": 0.0, "lng": 1.0}, {"lat": 1.0, "lng": 1.0}]}
    ]"##;

    let zones = zones_from_json(payload).unwrap();
    assert_eq!(zones.len(), 3);

    assert_eq!(zones[0].zone_type, ZoneType::Safe);
    assert_eq!(zones[0].patient_id.as_deref(), Some("p1"));
    assert_eq!(zones[0].radius, Some(100.0));

    assert_eq!(zones[1].zone_type, ZoneType::Unknown);
    assert_eq!(zones[1].radius, None);
    assert!(zones[1].is_active);

    assert_eq!(zones[2].shape, ZoneShape::Polygon);
    assert!(zones[2].center.is_none());
    assert!(!zones[2].is_active);
    assert_eq!(zones[2].coordinates.as_ref().map(Vec::len), Some(3));
}

#[test]
fn rejects_malformed_payload() {
    let err = zones_from_json(r#"{"not": "an array"}"#).unwrap_err();
    assert!(matches!(err, GeofenceError::Json(_)));
}

#[test]
fn leg_headings_follow_each_leg() {
    let fixes = [
        fix_at(0.0, 0.0, 0),
        fix_at(0.001, 0.0, 10),
        fix_at(0.001, 0.001, 20),
        fix_at(0.0, 0.001, 30),
    ];
    let headings = leg_headings(&fixes);
    assert_eq!(headings.len(), 3);
    assert!(headings[0].abs() < 1e-6);
    assert!((headings[1] - 90.0).abs() < 1e-3);
    assert!((headings[2] - 180.0).abs() < 1e-6);
    assert!(leg_headings(&fixes[..1]).is_empty());
}

#[test]
fn direction_changes_wrap_around_north() {
    assert_eq!(count_direction_changes(&[0.0, 90.0, 100.0, 350.0, 10.0], 45.0), 2);
    assert_eq!(count_direction_changes(&[350.0, 20.0, 60.0], 45.0), 0);
    assert_eq!(count_direction_changes(&[0.0, 180.0, 0.0], 45.0), 2);
    assert_eq!(count_direction_changes(&[42.0], 45.0), 0);
    assert_eq!(count_direction_changes(&[], 45.0), 0);
}

#[test]
fn circling_needs_two_returns_after_leaving() {
    let north = |m: f64| GeoPoint::new((m / EARTH_RADIUS_M).to_degrees(), 0.0);

    let circling = [north(0.0), north(100.0), north(5.0), north(100.0), north(5.0)];
    assert!(is_circling(&circling, 20.0));

    let one_return = [north(0.0), north(100.0), north(5.0), north(40.0), north(10.0)];
    assert!(!is_circling(&one_return, 20.0));

    let too_short = [north(0.0), north(100.0), north(5.0), north(100.0)];
    assert!(!is_circling(&too_short, 20.0));
}
