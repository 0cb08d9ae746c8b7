use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Native capability not available: {0}")]
    NotAvailable(String),

    #[error("Native operation failed: {0}")]
    OperationFailed(String),

    #[error("Invalid native options: {0}")]
    InvalidOptions(String),

    #[error("Invalid event id: {0}")]
    InvalidId(String),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
