use crate::domain::model::AccountRequest;
use crate::domain::ports::AccountService;
use crate::utils::error::Result;

/// 建立帳號前查詢遠端是否已有相同 email 或使用者名稱。
///
/// 查詢與建立之間可能被其他人搶先註冊，這裡不加鎖；
/// 之後的建立失敗會以 `RemoteFailure` 回報。
pub struct AvailabilityChecker<'a, S: AccountService + ?Sized> {
    service: &'a S,
}

impl<'a, S: AccountService + ?Sized> AvailabilityChecker<'a, S> {
    pub fn new(service: &'a S) -> Self {
        Self { service }
    }

    pub async fn is_available(&self, email: &str, name: &str) -> Result<bool> {
        tracing::debug!("Checking availability of {} / {}", email, name);
        let claims = self.service.account_exists(email, name).await?;

        if claims.email_taken {
            eprintln!("User with email '{}' already exists", email);
        }
        if claims.name_taken {
            eprintln!("User with name '{}' already exists", name);
        }

        Ok(!claims.any())
    }

    pub async fn check(&self, request: &AccountRequest) -> Result<bool> {
        self.is_available(&request.email, &request.name).await
    }
}
