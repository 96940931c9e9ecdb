//! Client-side core of the punchcard staff attendance app: geofence math,
//! clock event construction, session/role gating, the remote API client, and
//! the live location subscription.

pub mod api;
pub mod attendance;
pub mod geo;
pub mod location;
pub mod models;
pub mod panel;
pub mod session;

pub use api::{AttendanceApi, AttendanceBackend};
pub use attendance::{AttendanceStatus, ClockKind};
pub use geo::{GeoPoint, Geofence};
pub use location::{LocationSource, LocationWatcher};
pub use models::PerimeterConfig;
pub use panel::ClockPanel;
pub use session::{RoleSet, Session};
