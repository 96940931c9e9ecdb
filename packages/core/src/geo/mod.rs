use schemars::JsonSchema;
use serde::{Deserialize, Serialize};


/// Mean Earth radius used for great-circle math.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, JsonSchema, Default, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Great-circle distance between two points via the haversine formula.
pub fn distance_meters(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push the radicand a hair outside [0, 1] for near-antipodal
    // inputs, which would NaN the asin.
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_METERS * h.sqrt().asin()
}

/// A circular region gating an action by physical presence.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, JsonSchema, Default)]
pub struct Geofence {
    pub center: GeoPoint,
    pub radius_meters: f64,
}

impl Geofence {
    pub fn new(center: GeoPoint, radius_meters: f64) -> Self {
        Self {
            center,
            radius_meters,
        }
    }

    pub fn contains(&self, point: &GeoPoint) -> bool {
        distance_meters(point, &self.center) <= self.radius_meters
    }
}
