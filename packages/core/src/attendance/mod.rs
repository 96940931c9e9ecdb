use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::{GeoPoint, Geofence};

#[cfg(test)]
mod tests;

/// Longest note the client will attach to a clock event.
pub const MAX_NOTE_LEN: usize = 500;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, JsonSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ClockKind {
    In,
    Out,
}

impl ClockKind {
    /// Path segment of the submission endpoint (`/api/clock/{in,out}`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }
}

/// Last action taken in the current session. The server is authoritative;
/// this is never reconciled against server truth and resets on restart.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, JsonSchema, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    #[default]
    ClockedOut,
    ClockedIn,
}

impl AttendanceStatus {
    /// Transition taken only after the server acknowledged a submission.
    pub fn on_accepted(self, kind: ClockKind) -> Self {
        match kind {
            ClockKind::In => Self::ClockedIn,
            ClockKind::Out => Self::ClockedOut,
        }
    }

    pub fn is_clocked_in(self) -> bool {
        matches!(self, Self::ClockedIn)
    }
}

/// Body of `POST /api/clock/{in,out}`. Coordinates are null when no fix was
/// available, which only ever happens for clock-out.
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, PartialEq)]
pub struct AttendanceEvent {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub note: Option<String>,
}

/// Local rejection of a clock action. Nothing is sent when one of these is
/// returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockDenied {
    #[error("no location fix available yet")]
    LocationUnavailable,
    #[error("current position is outside the perimeter")]
    OutsidePerimeter,
    #[error("note exceeds {MAX_NOTE_LEN} characters")]
    NoteTooLong,
}

/// Whether a clock-in would be permitted from `position`. Fails closed while
/// no location fix exists.
pub fn is_eligible(position: Option<&GeoPoint>, fence: &Geofence) -> bool {
    match position {
        Some(point) => fence.contains(point),
        None => false,
    }
}

fn checked_note(note: Option<String>) -> Result<Option<String>, ClockDenied> {
    match note {
        Some(text) if text.chars().count() > MAX_NOTE_LEN => Err(ClockDenied::NoteTooLong),
        Some(text) if text.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Build a clock-in submission. Requires an eligible position at the time of
/// the call; anything else is a pure local rejection.
pub fn clock_in_event(
    position: Option<GeoPoint>,
    fence: &Geofence,
    note: Option<String>,
) -> Result<AttendanceEvent, ClockDenied> {
    let point = position.ok_or(ClockDenied::LocationUnavailable)?;
    if !fence.contains(&point) {
        return Err(ClockDenied::OutsidePerimeter);
    }

    Ok(AttendanceEvent {
        lat: Some(point.latitude),
        lng: Some(point.longitude),
        note: checked_note(note)?,
    })
}

/// Build a clock-out submission. Clock-out is never perimeter-gated, and a
/// missing fix produces null coordinates rather than a rejection.
pub fn clock_out_event(
    position: Option<GeoPoint>,
    note: Option<String>,
) -> Result<AttendanceEvent, ClockDenied> {
    Ok(AttendanceEvent {
        lat: position.map(|p| p.latitude),
        lng: position.map(|p| p.longitude),
        note: checked_note(note)?,
    })
}
