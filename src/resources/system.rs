//! Power control, clock and uptime.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

use crate::client::HalonClient;
use crate::error::{HalonError, Result};
use crate::outcome::Outcome;
use crate::request::RequestSpec;

/// Wire format of the system clock.
pub(crate) const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Serialize)]
struct TimePayload {
    time: String,
}

impl HalonClient {
    /// Reboot the appliance.
    #[tracing::instrument(skip(self))]
    pub async fn reboot_system(&self) -> Result<Outcome> {
        self.execute(RequestSpec::post("/system:reboot")).await
    }

    /// Shut the appliance down.
    #[tracing::instrument(skip(self))]
    pub async fn shut_down_system(&self) -> Result<Outcome> {
        self.execute(RequestSpec::post("/system:shutdown")).await
    }

    /// Read the system clock.
    #[tracing::instrument(skip(self))]
    pub async fn get_system_time(&self) -> Result<DateTime<Utc>> {
        let time: String = self
            .execute(RequestSpec::get("/system/time"))
            .await?
            .field("time")?;
        parse_time(&time)
    }

    /// Set the system clock. Sent as `YYYY-MM-DDTHH:MM:SSZ`.
    #[tracing::instrument(skip(self))]
    pub async fn set_system_time(&self, time: DateTime<Utc>) -> Result<Outcome> {
        let payload = TimePayload {
            time: time.format(TIME_FORMAT).to_string(),
        };
        self.execute(RequestSpec::put("/system/time").payload(&payload)?)
            .await
    }

    /// Seconds since boot.
    #[tracing::instrument(skip(self))]
    pub async fn get_system_uptime(&self) -> Result<u64> {
        self.execute(RequestSpec::get("/system/uptime"))
            .await?
            .field("uptime")
    }
}

fn parse_time(time: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(time, TIME_FORMAT)
        .map(|naive| naive.and_utc())
        .or_else(|_| DateTime::parse_from_rfc3339(time).map(|t| t.with_timezone(&Utc)))
        .map_err(|e| HalonError::UnexpectedResponse(format!("bad system time '{time}': {e}")))
}
