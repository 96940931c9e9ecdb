use punchcard_types::json;

use crate::attendance::{
    AttendanceStatus, ClockDenied, ClockKind, MAX_NOTE_LEN, clock_in_event, clock_out_event,
    is_eligible,
};
use crate::geo::{GeoPoint, Geofence};

const DELHI_LAT: f64 = 28.6139;
const DELHI_LNG: f64 = 77.2090;

fn delhi_fence() -> Geofence {
    Geofence::new(GeoPoint::new(DELHI_LAT, DELHI_LNG), 100_000.0)
}

#[test]
fn test_eligibility_fails_closed_without_fix() {
    assert!(!is_eligible(None, &delhi_fence()));
}

#[test]
fn test_eligibility_at_center_and_antipode() {
    let center = GeoPoint::new(DELHI_LAT, DELHI_LNG);
    let antipode = GeoPoint::new(-DELHI_LAT, DELHI_LNG - 180.0);

    assert!(is_eligible(Some(&center), &delhi_fence()));
    assert!(!is_eligible(Some(&antipode), &delhi_fence()));
}

#[test]
fn test_clock_in_rejected_outside_perimeter() {
    let far_away = GeoPoint::new(0.0, 0.0);
    let result = clock_in_event(Some(far_away), &delhi_fence(), None);
    assert_eq!(result, Err(ClockDenied::OutsidePerimeter));
}

#[test]
fn test_clock_in_rejected_without_fix() {
    let result = clock_in_event(None, &delhi_fence(), None);
    assert_eq!(result, Err(ClockDenied::LocationUnavailable));
}

#[test]
fn test_clock_in_carries_position_and_note() {
    let here = GeoPoint::new(DELHI_LAT, DELHI_LNG);
    let event = clock_in_event(Some(here), &delhi_fence(), Some("front desk".into())).unwrap();

    assert_eq!(event.lat, Some(DELHI_LAT));
    assert_eq!(event.lng, Some(DELHI_LNG));
    assert_eq!(event.note.as_deref(), Some("front desk"));
}

#[test]
fn test_clock_out_never_gated() {
    let antipode = GeoPoint::new(-DELHI_LAT, DELHI_LNG - 180.0);
    let event = clock_out_event(Some(antipode), None).unwrap();
    assert_eq!(event.lat, Some(-DELHI_LAT));

    // even without any fix at all
    let event = clock_out_event(None, None).unwrap();
    assert_eq!(event.lat, None);
    assert_eq!(event.lng, None);
}

#[test]
fn test_over_long_note_rejected() {
    let here = GeoPoint::new(DELHI_LAT, DELHI_LNG);
    let long_note = "x".repeat(MAX_NOTE_LEN + 1);

    let result = clock_in_event(Some(here), &delhi_fence(), Some(long_note.clone()));
    assert_eq!(result, Err(ClockDenied::NoteTooLong));

    let result = clock_out_event(None, Some(long_note));
    assert_eq!(result, Err(ClockDenied::NoteTooLong));
}

#[test]
fn test_empty_note_becomes_none() {
    let here = GeoPoint::new(DELHI_LAT, DELHI_LNG);
    let event = clock_in_event(Some(here), &delhi_fence(), Some(String::new())).unwrap();
    assert_eq!(event.note, None);
}

#[test]
fn test_status_transitions() {
    let status = AttendanceStatus::default();
    assert_eq!(status, AttendanceStatus::ClockedOut);

    let status = status.on_accepted(ClockKind::In);
    assert_eq!(status, AttendanceStatus::ClockedIn);
    assert!(status.is_clocked_in());

    let status = status.on_accepted(ClockKind::Out);
    assert_eq!(status, AttendanceStatus::ClockedOut);
}

#[test]
fn test_event_wire_shape() {
    let here = GeoPoint::new(DELHI_LAT, DELHI_LNG);
    let event = clock_in_event(Some(here), &delhi_fence(), Some("note".into())).unwrap();

    let value = json::to_value(&event).unwrap();
    assert_eq!(value["lat"], json::json!(DELHI_LAT));
    assert_eq!(value["lng"], json::json!(DELHI_LNG));
    assert_eq!(value["note"], json::json!("note"));
}

#[test]
fn test_clock_kind_wire_names() {
    assert_eq!(json::to_value(ClockKind::In).unwrap(), json::json!("in"));
    assert_eq!(json::to_value(ClockKind::Out).unwrap(), json::json!("out"));
    assert_eq!(ClockKind::In.as_str(), "in");
    assert_eq!(ClockKind::Out.as_str(), "out");
}
