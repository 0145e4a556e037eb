use crate::domain::model::ExistingClaims;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Remote account registry of the analysis platform.
#[async_trait]
pub trait AccountService: Send + Sync {
    async fn account_exists(&self, email: &str, name: &str) -> Result<ExistingClaims>;

    /// `Ok(false)` means the service refused without further detail.
    async fn create_account(&self, email: &str, name: &str, password: &str) -> Result<bool>;
}

pub trait PasswordPrompt {
    fn read_password(&self, label: &str) -> Result<String>;
}

#[async_trait]
impl<T: AccountService + ?Sized> AccountService for &T {
    async fn account_exists(&self, email: &str, name: &str) -> Result<ExistingClaims> {
        (**self).account_exists(email, name).await
    }

    async fn create_account(&self, email: &str, name: &str, password: &str) -> Result<bool> {
        (**self).create_account(email, name, password).await
    }
}

impl<T: PasswordPrompt + ?Sized> PasswordPrompt for &T {
    fn read_password(&self, label: &str) -> Result<String> {
        (**self).read_password(label)
    }
}
