use std::collections::HashMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::attendance::ClockKind;
use crate::geo::{GeoPoint, Geofence};

fn default_center_lat() -> f64 {
    28.6139
}

fn default_center_lng() -> f64 {
    77.2090
}

fn default_radius() -> f64 {
    100_000.0
}

/// Perimeter settings as served by `GET /api/settings`.
///
/// The server owns this; the client keeps a read-only cached copy. The
/// defaults double as the fallback when the settings fetch fails.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, JsonSchema, PartialEq)]
pub struct PerimeterConfig {
    #[serde(rename = "centerLat", default = "default_center_lat")]
    pub center_lat: f64,
    #[serde(rename = "centerLng", default = "default_center_lng")]
    pub center_lng: f64,
    #[serde(default = "default_radius")]
    pub radius: f64,
}

impl Default for PerimeterConfig {
    fn default() -> Self {
        Self {
            center_lat: default_center_lat(),
            center_lng: default_center_lng(),
            radius: default_radius(),
        }
    }
}

impl PerimeterConfig {
    pub fn fence(&self) -> Geofence {
        Geofence::new(GeoPoint::new(self.center_lat, self.center_lng), self.radius)
    }
}

/// One clock-in or clock-out record as returned by the entries endpoints.
///
/// `name` is only populated on the team-wide listing; a user's own history
/// omits it.
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema)]
pub struct AttendanceEntry {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: ClockKind,
    /// Epoch milliseconds.
    pub ts: i64,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl AttendanceEntry {
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.ts)
    }
}

/// A staff member who is currently clocked in (`GET /api/clocked-in`).
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema)]
pub struct ActiveShift {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub name: String,
    /// Clock-in time, epoch milliseconds.
    pub in_ts: i64,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ActiveShift {
    pub fn clocked_in_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.in_ts)
    }
}

/// Aggregate team statistics (`GET /api/stats`). All maps are computed
/// server-side; the client only displays them.
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, Default)]
pub struct TeamStats {
    /// Average worked hours keyed by day.
    #[serde(rename = "avgHoursPerDay", default)]
    pub avg_hours_per_day: HashMap<String, f64>,
    /// Distinct people clocking in, keyed by day.
    #[serde(rename = "numPerDay", default)]
    pub num_per_day: HashMap<String, u32>,
    /// Total worked hours over the trailing week, keyed by staff name.
    #[serde(rename = "totalPerStaff", default)]
    pub total_per_staff: HashMap<String, f64>,
}
