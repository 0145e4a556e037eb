use crate::domain::model::ProvisioningOutcome;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("Incorrect email template format: {template}")]
    MalformedTemplate { template: String },

    #[error("{message}")]
    MalformedInput { message: String },

    #[error("{message}")]
    PolicyViolation { message: String },

    #[error("{message}")]
    Collision { message: String },

    #[error("Passwords don't match")]
    ConfirmationMismatch,

    #[error("Failed to create account for {email}")]
    RemoteFailure { email: String },

    #[error("API request failed: {0}")]
    Api(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl ProvisionError {
    pub fn malformed_input(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    pub fn policy(message: impl Into<String>) -> Self {
        Self::PolicyViolation {
            message: message.into(),
        }
    }

    pub fn collision(message: impl Into<String>) -> Self {
        Self::Collision {
            message: message.into(),
        }
    }

    /// 中止時對應的請求結果
    pub fn outcome(&self) -> ProvisioningOutcome {
        match self {
            Self::PolicyViolation { .. } | Self::ConfirmationMismatch => {
                ProvisioningOutcome::RejectedPolicy
            }
            _ => ProvisioningOutcome::RejectedInvalid,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProvisionError>;
