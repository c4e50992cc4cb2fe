use crate::configuration::ConfigurationError;
use crate::configuration::Location;
use crate::timezone::PosixTz;

use serde::Deserialize;
use serde::Serialize;

use std::time::Duration;

use tracing::debug;

pub const MAX_SERVER_LEN: usize = 32;
pub const MAX_TIMEZONE_LEN: usize = 50;
pub const MAX_TIMEZONE_DESCR_LEN: usize = 50;

/// Largest sunrise or sunset offset, half a day either way
pub const MAX_OFFSET_MINUTES: i32 = 720;

/// NTP, timezone, deep sleep, and sunrise/sunset settings.
///
/// This is the shape exchanged with the web UI and stored in the `[ntp]` table of the
/// configuration file.  Every field is required when deserializing.  No value is checked until
/// [`NtpConfig::validate`] is called.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct NtpConfig {
    /// Hostname or address of the time server
    pub ntp_server: String,
    /// POSIX TZ rule, for example `CET-1CEST,M3.5.0,M10.5.0/3`
    pub ntp_timezone: String,
    /// Human readable name of `ntp_timezone`, for example `Europe/Berlin`
    pub ntp_timezone_descr: String,
    pub sunset_enabled: bool,
    pub deepsleep: bool,
    /// Deep sleep duration in seconds
    pub deepsleeptime: u32,
    /// Decimal degrees, east positive
    pub longitude: String,
    /// Decimal degrees, north positive
    pub latitude: String,
    /// Minutes added to the computed sunrise
    pub sunrise_offset: i32,
    /// Minutes added to the computed sunset
    pub sunset_offset: i32,
}

impl Default for NtpConfig {
    fn default() -> Self {
        NtpConfig {
            ntp_server: "pool.ntp.org".to_string(),
            ntp_timezone: "CET-1CEST,M3.5.0,M10.5.0/3".to_string(),
            ntp_timezone_descr: "Europe/Berlin".to_string(),
            sunset_enabled: false,
            deepsleep: false,
            deepsleeptime: 600,
            longitude: "10.4515".to_string(),
            latitude: "51.1657".to_string(),
            sunrise_offset: 0,
            sunset_offset: 0,
        }
    }
}

/// NTP settings after validation, with text and numeric fields converted to typed values.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidNtpConfig {
    pub server: String,
    pub timezone: PosixTz,
    pub timezone_description: String,
    pub sunset_enabled: bool,
    pub location: Location,
    /// `None` when deep sleep is disabled
    pub deep_sleep: Option<Duration>,
    pub sunrise_offset: chrono::Duration,
    pub sunset_offset: chrono::Duration,
}

impl NtpConfig {
    pub fn from_json(source: &str) -> Result<NtpConfig, ConfigurationError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigurationError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check every field and convert the settings to typed values.
    ///
    /// Fields are checked in declaration order of the web form and the first failure is returned.
    pub fn validate(&self) -> Result<ValidNtpConfig, ConfigurationError> {
        let server = &self.ntp_server;

        if server.is_empty()
            || server.len() > MAX_SERVER_LEN
            || server.chars().any(char::is_whitespace)
        {
            return Err(ConfigurationError::InvalidServer(server.clone()));
        }

        let tz = &self.ntp_timezone;

        if tz.is_empty() || tz.len() > MAX_TIMEZONE_LEN {
            return Err(ConfigurationError::InvalidTimezoneLength(tz.clone()));
        }

        let timezone = match PosixTz::parse(tz) {
            Ok(t) => t,
            Err(e) => return Err(ConfigurationError::InvalidTimezone(tz.clone(), e)),
        };

        let descr = &self.ntp_timezone_descr;

        if descr.is_empty() || descr.len() > MAX_TIMEZONE_DESCR_LEN {
            return Err(ConfigurationError::InvalidTimezoneDescription(
                descr.clone(),
            ));
        }

        let location = Location::parse(&self.latitude, &self.longitude)?;

        let deep_sleep = if self.deepsleep {
            if self.deepsleeptime == 0 {
                return Err(ConfigurationError::InvalidDeepSleepTime(self.deepsleeptime));
            }

            Some(Duration::from_secs(self.deepsleeptime.into()))
        } else {
            None
        };

        if self.sunrise_offset.unsigned_abs() > MAX_OFFSET_MINUTES.unsigned_abs() {
            return Err(ConfigurationError::InvalidSunriseOffset(
                self.sunrise_offset,
            ));
        }

        if self.sunset_offset.unsigned_abs() > MAX_OFFSET_MINUTES.unsigned_abs() {
            return Err(ConfigurationError::InvalidSunsetOffset(self.sunset_offset));
        }

        debug!(
            "validated NTP settings for server {} timezone {}",
            server, descr
        );

        Ok(ValidNtpConfig {
            server: server.clone(),
            timezone,
            timezone_description: descr.clone(),
            sunset_enabled: self.sunset_enabled,
            location,
            deep_sleep,
            sunrise_offset: chrono::Duration::minutes(self.sunrise_offset.into()),
            sunset_offset: chrono::Duration::minutes(self.sunset_offset.into()),
        })
    }
}
