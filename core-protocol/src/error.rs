use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Invalid event id: {0}")]
    InvalidId(String),

    #[error("Unknown level: {0}")]
    UnknownLevel(String),
}

pub type Result<T> = std::result::Result<T, ProtocolError>;
