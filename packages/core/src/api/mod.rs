use std::time::Duration;

use async_trait::async_trait;
use punchcard_types::{Result, anyhow, reqwest};
use serde::de::DeserializeOwned;
use url::Url;

use crate::attendance::{AttendanceEvent, ClockKind};
use crate::models::{ActiveShift, AttendanceEntry, PerimeterConfig, TeamStats};

#[cfg(test)]
mod tests;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The two calls the clock panel performs. Kept as a trait so the panel can
/// be driven against a stub in tests.
#[async_trait]
pub trait AttendanceBackend: Send + Sync {
    async fn fetch_settings(&self) -> Result<PerimeterConfig>;

    async fn submit_clock(
        &self,
        token: &str,
        kind: ClockKind,
        event: &AttendanceEvent,
    ) -> Result<()>;
}

/// Typed client for the remote attendance API.
pub struct AttendanceApi {
    base: Url,
    client: reqwest::Client,
}

fn auth_value(token: &str) -> String {
    if token.starts_with("Bearer ") {
        token.to_string()
    } else {
        format!("Bearer {}", token)
    }
}

async fn expect_success(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if !status.is_success() {
        let body_text = response.text().await.unwrap_or_default();
        return Err(anyhow!(
            "Request failed with status {}: {}",
            status,
            body_text
        ));
    }
    Ok(response)
}

impl AttendanceApi {
    pub fn new(url: &str) -> Result<Self> {
        let mut url = String::from(url);
        if !url.starts_with("http://") && !url.starts_with("https://") {
            url = format!("https://{}", url);
        }

        if !url.ends_with('/') {
            url.push('/');
        }

        let base = Url::parse(&url).map_err(|e| anyhow!("Invalid API URL: {}", e))?;
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { base, client })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let path = path.strip_prefix('/').unwrap_or(path);
        self.base
            .join(path)
            .map_err(|e| anyhow!("Invalid endpoint path: {}", e))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, token: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .get(url)
            .header("Authorization", auth_value(token))
            .send()
            .await?;
        let response = expect_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Perimeter settings. Served without authentication so the clock panel
    /// can populate itself before any token round-trip.
    pub async fn settings(&self) -> Result<PerimeterConfig> {
        let url = self.endpoint("api/settings")?;
        let response = self.client.get(url).send().await?;
        let response = expect_success(response).await?;
        Ok(response.json::<PerimeterConfig>().await?)
    }

    /// Persist perimeter settings. Manager action.
    pub async fn save_settings(&self, token: &str, settings: &PerimeterConfig) -> Result<()> {
        let url = self.endpoint("api/settings")?;
        let response = self
            .client
            .post(url)
            .header("Authorization", auth_value(token))
            .json(settings)
            .send()
            .await?;
        expect_success(response).await?;
        Ok(())
    }

    /// Submit an approved clock event to `/api/clock/{in,out}`.
    pub async fn clock(&self, token: &str, kind: ClockKind, event: &AttendanceEvent) -> Result<()> {
        let url = self.endpoint(&format!("api/clock/{}", kind.as_str()))?;
        let response = self
            .client
            .post(url)
            .header("Authorization", auth_value(token))
            .json(event)
            .send()
            .await?;
        expect_success(response).await?;
        tracing::debug!(kind = kind.as_str(), "clock event recorded");
        Ok(())
    }

    /// The calling user's own clock history.
    pub async fn my_entries(&self, token: &str) -> Result<Vec<AttendanceEntry>> {
        self.get_json("api/my/entries", token).await
    }

    /// Every user's entries. Manager view.
    pub async fn all_entries(&self, token: &str) -> Result<Vec<AttendanceEntry>> {
        self.get_json("api/entries", token).await
    }

    /// Staff members currently clocked in. Manager view.
    pub async fn clocked_in(&self, token: &str) -> Result<Vec<ActiveShift>> {
        self.get_json("api/clocked-in", token).await
    }

    /// Aggregate team statistics. Manager view.
    pub async fn stats(&self, token: &str) -> Result<TeamStats> {
        self.get_json("api/stats", token).await
    }

    /// Everything the manager dashboard renders, fetched concurrently.
    pub async fn dashboard(
        &self,
        token: &str,
    ) -> Result<(Vec<ActiveShift>, Vec<AttendanceEntry>, TeamStats)> {
        futures::try_join!(
            self.clocked_in(token),
            self.all_entries(token),
            self.stats(token),
        )
    }
}

#[async_trait]
impl AttendanceBackend for AttendanceApi {
    async fn fetch_settings(&self) -> Result<PerimeterConfig> {
        self.settings().await
    }

    async fn submit_clock(
        &self,
        token: &str,
        kind: ClockKind,
        event: &AttendanceEvent,
    ) -> Result<()> {
        self.clock(token, kind, event).await
    }
}
