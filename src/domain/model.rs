/// 單次建立帳號的請求；email 已正規化（trim + 小寫）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRequest {
    pub email: String,
    pub name: String,
    pub password: Option<String>,
}

/// 批次檔中的一列：email, password, name?
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRecord {
    pub email: String,
    pub password: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisioningOutcome {
    Created,
    SkippedExisting,
    RejectedInvalid,
    RejectedPolicy,
}

/// 帳號服務回報的既有佔用情況
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExistingClaims {
    pub email_taken: bool,
    pub name_taken: bool,
}

impl ExistingClaims {
    pub fn any(&self) -> bool {
        self.email_taken || self.name_taken
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// single / template: 任何衝突都中止整批
    Abort,
    /// file-batch: 已存在的帳號直接略過
    Skip,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProvisionSummary {
    pub checked: usize,
    pub skipped: usize,
    pub created: usize,
}

impl ProvisionSummary {
    pub fn record(&mut self, outcome: ProvisioningOutcome) {
        match outcome {
            ProvisioningOutcome::Created => self.created += 1,
            ProvisioningOutcome::SkippedExisting => self.skipped += 1,
            ProvisioningOutcome::RejectedInvalid | ProvisioningOutcome::RejectedPolicy => {}
        }
    }
}
