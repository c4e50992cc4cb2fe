use crate::timezone::TimezoneError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("NTP server \"{0}\" must be between 1 and 32 characters long without whitespace")]
    InvalidServer(String),
    #[error("timezone \"{0}\" must be between 1 and 50 characters long")]
    InvalidTimezoneLength(String),
    #[error("timezone \"{0}\" is invalid: {1}")]
    InvalidTimezone(String, TimezoneError),
    #[error("timezone description \"{0}\" must be between 1 and 50 characters long")]
    InvalidTimezoneDescription(String),
    #[error("latitude {0} must be a decimal number between -90 and 90")]
    InvalidLatitude(String),
    #[error("longitude {0} must be a decimal number between -180 and 180")]
    InvalidLongitude(String),
    #[error("deep sleep time {0} must be at least 1 second when deep sleep is enabled")]
    InvalidDeepSleepTime(u32),
    #[error("sunrise offset {0} must be between -720 and 720 minutes")]
    InvalidSunriseOffset(i32),
    #[error("sunset offset {0} must be between -720 and 720 minutes")]
    InvalidSunsetOffset(i32),
    #[error("log filter {0} is invalid: {1}")]
    InvalidLogFilter(String, tracing_subscriber::filter::ParseError),
    #[error("invalid configuration file: {0}")]
    De(#[from] toml::de::Error),
    #[error("unable to encode configuration file: {0}")]
    Ser(#[from] toml::ser::Error),
    #[error("invalid NTP settings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unable to read configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("unable to replace configuration file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

impl ConfigurationError {
    /// Numeric error code reported to the web UI for rejected NTP settings.
    ///
    /// Errors that do not come from validating submitted values have no code.
    pub fn code(&self) -> Option<u32> {
        match self {
            ConfigurationError::InvalidServer(_) => Some(9001),
            ConfigurationError::InvalidTimezoneLength(_) => Some(9002),
            ConfigurationError::InvalidTimezone(_, _) => Some(9003),
            ConfigurationError::InvalidTimezoneDescription(_) => Some(9004),
            ConfigurationError::InvalidLatitude(_) => Some(9005),
            ConfigurationError::InvalidLongitude(_) => Some(9006),
            ConfigurationError::InvalidDeepSleepTime(_) => Some(9007),
            ConfigurationError::InvalidSunriseOffset(_) => Some(9008),
            ConfigurationError::InvalidSunsetOffset(_) => Some(9009),
            _ => None,
        }
    }
}
