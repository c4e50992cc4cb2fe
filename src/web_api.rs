//! Handling of NTP settings exchanged with the web UI.
//!
//! The UI fetches the current settings as a JSON [`NtpConfig`] and submits the edited form back
//! as the same JSON document.  Every submission is answered with an [`ApiResponse`].

use crate::configuration::Configuration;
use crate::configuration::ConfigurationError;
use crate::configuration::NtpConfig;
use crate::configuration::ValidNtpConfig;

use serde::Serialize;
use serde_json::Value;

use std::path::Path;

use tracing::info;
use tracing::warn;

/// Largest accepted submission body in bytes
pub const MAX_SUBMISSION_LEN: usize = 1024;

pub const NO_VALUES_FOUND: u32 = 1001;
pub const DATA_TOO_LARGE: u32 = 1002;
pub const PARSE_ERROR: u32 = 1003;
pub const VALUES_MISSING: u32 = 1004;
pub const WRITE_FAILED: u32 = 1005;
pub const SETTINGS_SAVED: u32 = 9010;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    Success,
    Warning,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ApiResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub message: String,
    pub code: u32,
}

impl ApiResponse {
    pub fn success(message: &str, code: u32) -> Self {
        ApiResponse {
            response_type: ResponseType::Success,
            message: message.to_string(),
            code,
        }
    }

    pub fn warning(message: &str, code: u32) -> Self {
        ApiResponse {
            response_type: ResponseType::Warning,
            message: message.to_string(),
            code,
        }
    }

    pub fn is_success(&self) -> bool {
        self.response_type == ResponseType::Success
    }

    pub fn to_json(&self) -> String {
        // a struct of strings and integers always serializes
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl From<&ConfigurationError> for ApiResponse {
    fn from(error: &ConfigurationError) -> Self {
        ApiResponse::warning(&error.to_string(), error.code().unwrap_or(PARSE_ERROR))
    }
}

/// A submission that passed every check.
#[derive(Clone, Debug, PartialEq)]
pub struct Submission {
    pub config: NtpConfig,
    pub valid: ValidNtpConfig,
}

/// Body of the settings request.
pub fn config_response(config: &NtpConfig) -> Result<String, ConfigurationError> {
    config.to_json()
}

/// Check a submitted settings document.
///
/// The returned response describes the first problem found.
pub fn submit_config(data: &str) -> Result<Submission, ApiResponse> {
    if data.is_empty() {
        return Err(ApiResponse::warning("No values found!", NO_VALUES_FOUND));
    }

    if data.len() > MAX_SUBMISSION_LEN {
        return Err(ApiResponse::warning("Data too large!", DATA_TOO_LARGE));
    }

    let value: Value = match serde_json::from_str(data) {
        Ok(v) => v,
        Err(e) => {
            warn!("unable to parse NTP settings: {}", e);

            return Err(ApiResponse::warning("Failed to parse data!", PARSE_ERROR));
        }
    };

    let config: NtpConfig = match serde_json::from_value(value) {
        Ok(c) => c,
        Err(e) => {
            warn!("incomplete NTP settings: {}", e);

            return Err(ApiResponse::warning("Values are missing!", VALUES_MISSING));
        }
    };

    match config.validate() {
        Ok(valid) => Ok(Submission { config, valid }),
        Err(e) => {
            warn!("rejected NTP settings: {}", e);

            Err(ApiResponse::from(&e))
        }
    }
}

/// Check a submission and store it in `configuration`, saving the result to `path`.
///
/// `configuration` is left untouched unless the new settings were saved.
pub fn apply_submission<P: AsRef<Path>>(
    configuration: &mut Configuration,
    path: P,
    data: &str,
) -> ApiResponse {
    let submission = match submit_config(data) {
        Ok(s) => s,
        Err(response) => return response,
    };

    let mut updated = configuration.clone();
    updated.ntp = submission.config;

    if let Err(e) = updated.save(path) {
        warn!("unable to save NTP settings: {}", e);

        return ApiResponse::warning("Failed to write configuration!", WRITE_FAILED);
    }

    *configuration = updated;

    info!(
        "NTP settings changed, server {} timezone {}",
        submission.valid.server, submission.valid.timezone_description
    );

    ApiResponse::success("Settings saved!", SETTINGS_SAVED)
}
