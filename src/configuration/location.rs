use crate::configuration::ConfigurationError;

use serde::Serialize;

/// A geographic position in decimal degrees.
///
/// North and east are positive.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// Parse the text coordinates stored in the NTP settings.
    pub fn parse(latitude: &str, longitude: &str) -> Result<Location, ConfigurationError> {
        let latitude = match degrees(latitude, 90.0) {
            Some(l) => l,
            None => return Err(ConfigurationError::InvalidLatitude(latitude.to_string())),
        };

        let longitude = match degrees(longitude, 180.0) {
            Some(l) => l,
            None => return Err(ConfigurationError::InvalidLongitude(longitude.to_string())),
        };

        Ok(Location {
            latitude,
            longitude,
        })
    }
}

fn degrees(text: &str, limit: f64) -> Option<f64> {
    let value: f64 = text.trim().parse().ok()?;

    // rejects NaN as well
    if value.is_finite() && value.abs() <= limit {
        Some(value)
    } else {
        None
    }
}
