mod parser;
mod posix_tz;
mod timezone_error;

pub use posix_tz::Daylight;
pub use posix_tz::PosixTz;
pub use posix_tz::RuleDate;
pub use posix_tz::Transition;
pub use posix_tz::Zone;
pub use timezone_error::TimezoneError;
