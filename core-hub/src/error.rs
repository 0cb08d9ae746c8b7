use thiserror::Error;

#[derive(Error, Debug)]
pub enum HubError {
    #[error("Capability missing: {capability} - {message}")]
    CapabilityMissing { capability: String, message: String },
}

impl HubError {
    pub(crate) fn missing(capability: &str, message: &str) -> Self {
        Self::CapabilityMissing {
            capability: capability.to_string(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HubError>;
