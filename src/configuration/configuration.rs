use crate::configuration::ConfigurationError;
use crate::configuration::NtpConfig;

use serde::Deserialize;
use serde::Serialize;

use std::convert::TryFrom;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use tempfile::NamedTempFile;

use tracing::debug;
use tracing::info;
use tracing::Level;

use tracing_subscriber::filter::EnvFilter;

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Configuration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    // toml requires tables after plain values, keep this last
    pub ntp: NtpConfig,
}

impl Configuration {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Configuration, ConfigurationError> {
        let source = fs::read_to_string(path.as_ref())?;

        debug!("loaded configuration from {}", path.as_ref().display());

        parse(source)
    }

    /// Write the configuration to `path`.
    ///
    /// The file is written to a temporary file in the same directory and renamed over `path`.  A
    /// failed write leaves the previous configuration in place.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigurationError> {
        let path = path.as_ref();
        let source = toml::to_string(self)?;

        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(source.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(path)?;

        info!("saved configuration to {}", path.display());

        Ok(())
    }
}

fn parse(source: String) -> Result<Configuration, ConfigurationError> {
    match toml::from_str(&source) {
        Err(e) => Err(ConfigurationError::from(e)),
        Ok(c) => Ok(c),
    }
}

impl TryFrom<Configuration> for EnvFilter {
    type Error = ConfigurationError;

    fn try_from(configuration: Configuration) -> Result<EnvFilter, ConfigurationError> {
        let level = Level::from(configuration.clone());

        match configuration.log_filter {
            Some(f) => match EnvFilter::try_new(f.clone()) {
                Ok(f) => Ok(f),
                Err(e) => Err(ConfigurationError::InvalidLogFilter(f, e)),
            },
            None => Ok(EnvFilter::new(level.as_str().to_lowercase())),
        }
    }
}

impl From<Configuration> for Level {
    fn from(configuration: Configuration) -> Level {
        configuration
            .log_level
            .and_then(|l| Level::from_str(&l).ok())
            .unwrap_or(Level::INFO)
    }
}
