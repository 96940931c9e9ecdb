use std::sync::Arc;

use punchcard_types::sync::watch;
use thiserror::Error;

use crate::api::AttendanceBackend;
use crate::attendance::{
    self, AttendanceEvent, AttendanceStatus, ClockDenied, ClockKind, MAX_NOTE_LEN,
};
use crate::geo::GeoPoint;
use crate::models::PerimeterConfig;
use crate::session::Session;


#[derive(Error, Debug)]
pub enum PanelError {
    /// Waiting on a first fix; shown as a neutral indicator, not a failure.
    #[error("no location fix available yet")]
    LocationUnavailable,
    #[error("current position is outside the perimeter")]
    OutsidePerimeter,
    #[error("note exceeds {MAX_NOTE_LEN} characters")]
    NoteTooLong,
    #[error("a submission is already in flight")]
    Busy,
    /// The request was approved locally but the service call failed. Status
    /// is left untouched and the action can be retried.
    #[error("failed to reach the attendance service: {0}")]
    Transport(punchcard_types::Error),
}

impl From<ClockDenied> for PanelError {
    fn from(denied: ClockDenied) -> Self {
        match denied {
            ClockDenied::LocationUnavailable => Self::LocationUnavailable,
            ClockDenied::OutsidePerimeter => Self::OutsidePerimeter,
            ClockDenied::NoteTooLong => Self::NoteTooLong,
        }
    }
}

/// Drives the clock-in/out view: caches the perimeter, follows the live
/// position feed, and submits only locally approved clock events.
pub struct ClockPanel {
    session: Session,
    backend: Arc<dyn AttendanceBackend>,
    positions: watch::Receiver<Option<GeoPoint>>,
    perimeter: PerimeterConfig,
    status: AttendanceStatus,
    in_flight: bool,
}

impl ClockPanel {
    pub fn new(
        session: Session,
        backend: Arc<dyn AttendanceBackend>,
        positions: watch::Receiver<Option<GeoPoint>>,
    ) -> Self {
        Self {
            session,
            backend,
            positions,
            perimeter: PerimeterConfig::default(),
            status: AttendanceStatus::default(),
            in_flight: false,
        }
    }

    /// Re-fetch the perimeter from the server. A failed fetch keeps the
    /// cached value (initially the built-in default) so the view stays
    /// usable.
    pub async fn refresh_settings(&mut self) {
        match self.backend.fetch_settings().await {
            Ok(settings) => {
                tracing::debug!(
                    center_lat = settings.center_lat,
                    center_lng = settings.center_lng,
                    radius = settings.radius,
                    "perimeter settings refreshed"
                );
                self.perimeter = settings;
            }
            Err(e) => {
                tracing::warn!(error = %e, "settings fetch failed, keeping cached perimeter");
            }
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn perimeter(&self) -> &PerimeterConfig {
        &self.perimeter
    }

    pub fn status(&self) -> AttendanceStatus {
        self.status
    }

    /// Latest position sample, if any fix has arrived yet.
    pub fn position(&self) -> Option<GeoPoint> {
        *self.positions.borrow()
    }

    /// Whether a clock-in would currently be permitted.
    pub fn can_clock_in(&self) -> bool {
        attendance::is_eligible(self.position().as_ref(), &self.perimeter.fence())
    }

    pub async fn clock_in(&mut self, note: Option<String>) -> Result<(), PanelError> {
        let event = attendance::clock_in_event(self.position(), &self.perimeter.fence(), note)?;
        self.submit(ClockKind::In, event).await
    }

    pub async fn clock_out(&mut self, note: Option<String>) -> Result<(), PanelError> {
        let event = attendance::clock_out_event(self.position(), note)?;
        self.submit(ClockKind::Out, event).await
    }

    async fn submit(&mut self, kind: ClockKind, event: AttendanceEvent) -> Result<(), PanelError> {
        if self.in_flight {
            return Err(PanelError::Busy);
        }

        self.in_flight = true;
        let result = self
            .backend
            .submit_clock(&self.session.token, kind, &event)
            .await;
        self.in_flight = false;

        match result {
            Ok(()) => {
                self.status = self.status.on_accepted(kind);
                tracing::info!(
                    user = %self.session.display_name,
                    kind = kind.as_str(),
                    "clock event accepted"
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(kind = kind.as_str(), error = %e, "clock submission failed");
                Err(PanelError::Transport(e))
            }
        }
    }
}
