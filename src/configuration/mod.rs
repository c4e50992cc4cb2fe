mod configuration;
mod configuration_error;
mod location;
mod ntp_config;

pub use configuration::Configuration;
pub use configuration_error::ConfigurationError;
pub use location::Location;
pub use ntp_config::NtpConfig;
pub use ntp_config::ValidNtpConfig;

pub use ntp_config::MAX_OFFSET_MINUTES;
pub use ntp_config::MAX_SERVER_LEN;
pub use ntp_config::MAX_TIMEZONE_DESCR_LEN;
pub use ntp_config::MAX_TIMEZONE_LEN;


#[cfg(test)]
mod test_ntp_config;
