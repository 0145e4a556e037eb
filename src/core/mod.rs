pub mod availability;
pub mod credentials;
pub mod identity;
pub mod orchestrator;
pub mod roster;
pub mod toolbox;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::domain::model::{
    AccountRequest, BatchRecord, CollisionPolicy, ExistingClaims, ProvisionSummary,
    ProvisioningOutcome,
};
pub use crate::domain::ports::{AccountService, PasswordPrompt};
pub use crate::utils::error::Result;
