use thiserror::Error;

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum TimezoneError {
    #[error("timezone rule is empty")]
    Empty,
    #[error("unexpected \"{found}\" at position {position}")]
    Syntax { position: usize, found: String },
}
