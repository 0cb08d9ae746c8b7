use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid DSN: {0}")]
    InvalidDsn(String),
}

pub type Result<T> = std::result::Result<T, Error>;
