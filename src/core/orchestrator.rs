use crate::core::availability::AvailabilityChecker;
use crate::core::credentials::{validate_email_format, validate_password, validate_username_format};
use crate::core::identity::{derive_username_from_email, expand_template, normalize_email};
use crate::core::roster::{prepare_requests, read_records};
use crate::domain::model::{AccountRequest, CollisionPolicy, ProvisionSummary, ProvisioningOutcome};
use crate::domain::ports::{AccountService, PasswordPrompt};
use crate::utils::error::{ProvisionError, Result};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

/// Drives the three provisioning modes against an [`AccountService`].
///
/// Every driver returns a process exit status: `0` when all requested
/// accounts were handled (or the check-only run passed), `1` otherwise.
pub struct Provisioner<S: AccountService, P: PasswordPrompt> {
    service: S,
    prompt: P,
    check_only: bool,
}

impl<S: AccountService, P: PasswordPrompt> Provisioner<S, P> {
    pub fn new(service: S, prompt: P) -> Self {
        Self {
            service,
            prompt,
            check_only: false,
        }
    }

    pub fn check_only(mut self, check_only: bool) -> Self {
        self.check_only = check_only;
        self
    }

    /// 建立單一帳號，`name` 省略時由 email 產生
    pub async fn create_user(
        &self,
        email: &str,
        name: Option<&str>,
        password: Option<String>,
    ) -> i32 {
        report(self.run_single(email, name, password).await)
    }

    /// 依樣板 email 批次建立帳號，所有帳號共用同一組密碼
    pub async fn create_users_from_template(
        &self,
        template: &str,
        start: u64,
        end: Option<u64>,
        password: Option<String>,
    ) -> i32 {
        report(self.run_template(template, start, end, password).await)
    }

    /// 從 TSV 檔案批次建立帳號，已存在的帳號會被略過
    pub async fn create_batch_of_users(&self, path: &Path) -> i32 {
        println!("Reading data from file '{}'", path.display());
        match std::fs::File::open(path) {
            Ok(file) => self.create_batch_from_reader(file).await,
            Err(e) => report(Err(ProvisionError::Io(e))),
        }
    }

    pub async fn create_batch_from_reader<R: Read>(&self, reader: R) -> i32 {
        report(self.run_batch(reader).await)
    }

    async fn run_single(
        &self,
        email: &str,
        name: Option<&str>,
        password: Option<String>,
    ) -> Result<ProvisionSummary> {
        let request = self.single_request(email, name, password)?;
        println!("Email : {}", request.email);
        println!("Name  : {}", request.name);
        self.execute(std::iter::once(request), CollisionPolicy::Abort).await
    }

    async fn run_template(
        &self,
        template: &str,
        start: u64,
        end: Option<u64>,
        password: Option<String>,
    ) -> Result<ProvisionSummary> {
        let emails = expand_template(&normalize_email(template), start, end)?;

        let password = match password {
            Some(password) => Some(Self::checked_password(password)?),
            None if self.check_only => None,
            None => Some(self.prompt_password()?),
        };

        let requests = emails.map(|email| AccountRequest {
            name: derive_username_from_email(&email),
            email,
            password: password.clone(),
        });

        println!("Checking availability");
        self.execute(requests, CollisionPolicy::Abort).await
    }

    async fn run_batch<R: Read>(&self, reader: R) -> Result<ProvisionSummary> {
        let requests = prepare_requests(read_records(reader)?)?;
        self.execute(requests.into_iter(), CollisionPolicy::Skip).await
    }

    fn single_request(
        &self,
        email: &str,
        name: Option<&str>,
        password: Option<String>,
    ) -> Result<AccountRequest> {
        let email = normalize_email(email);
        if !validate_email_format(&email) {
            return Err(ProvisionError::malformed_input(format!(
                "Invalid email address: '{}'",
                email
            )));
        }

        let name = match name {
            Some(name) if !validate_username_format(name) => {
                return Err(ProvisionError::policy(
                    "Invalid name: must contain only lower-case letters, numbers and '-'",
                ));
            }
            Some(name) => name.to_string(),
            None => derive_username_from_email(&email),
        };

        let password = password.map(Self::checked_password).transpose()?;

        Ok(AccountRequest {
            email,
            name,
            password,
        })
    }

    fn checked_password(password: String) -> Result<String> {
        if !validate_password(&password) {
            return Err(ProvisionError::policy(
                "Invalid password: must be 6 or more characters",
            ));
        }
        Ok(password)
    }

    /// 互動輸入密碼並再輸入一次確認
    fn prompt_password(&self) -> Result<String> {
        let password = self.prompt.read_password("Enter password for new user: ")?;
        let password = Self::checked_password(password)?;
        let confirmation = self.prompt.read_password("Confirm password: ")?;
        if confirmation != password {
            return Err(ProvisionError::ConfirmationMismatch);
        }
        Ok(password)
    }

    /// 三種模式共用的流程：先全部檢查，再依序建立。
    ///
    /// `candidates` 會被走訪兩次（檢查、建立），不會整批放進記憶體。
    async fn execute<I>(&self, candidates: I, policy: CollisionPolicy) -> Result<ProvisionSummary>
    where
        I: Iterator<Item = AccountRequest> + Clone,
    {
        let checker = AvailabilityChecker::new(&self.service);
        let mut summary = ProvisionSummary::default();
        let mut existing: HashSet<String> = HashSet::new();

        for request in candidates.clone() {
            summary.checked += 1;
            if checker.check(&request).await? {
                if policy == CollisionPolicy::Skip {
                    println!("{}\t*****\t{}", request.email, request.name);
                }
                continue;
            }
            match policy {
                CollisionPolicy::Skip => {
                    summary.record(ProvisioningOutcome::SkippedExisting);
                    tracing::info!("Skipping existing account {}", request.email);
                    existing.insert(request.email);
                }
                CollisionPolicy::Abort => {
                    return Err(ProvisionError::collision(format!(
                        "{}: email or username not available",
                        request.email
                    )));
                }
            }
        }

        if self.check_only {
            let accepted = summary.checked - summary.skipped;
            match policy {
                CollisionPolicy::Abort if accepted == 1 => {
                    println!("Email and username ok: not currently in use")
                }
                CollisionPolicy::Abort => {
                    println!("All emails and usernames ok: not currently in use")
                }
                CollisionPolicy::Skip => println!(
                    "{} account(s) ok to create, {} already exist",
                    accepted, summary.skipped
                ),
            }
            return Ok(summary);
        }

        for request in candidates.filter(|request| !existing.contains(&request.email)) {
            let password = match request.password {
                Some(password) => password,
                None => self.prompt_password()?,
            };

            tracing::debug!("Creating account {} ({})", request.email, request.name);
            if !self
                .service
                .create_account(&request.email, &request.name, &password)
                .await?
            {
                return Err(ProvisionError::RemoteFailure {
                    email: request.email,
                });
            }
            summary.record(ProvisioningOutcome::Created);
            println!("Created new account for {}", request.email);
        }

        tracing::info!(
            "Provisioning finished: {} checked, {} skipped, {} created",
            summary.checked,
            summary.skipped,
            summary.created
        );
        Ok(summary)
    }
}

/// 把執行結果轉成 exit status，失敗時輸出一行診斷訊息
fn report(result: Result<ProvisionSummary>) -> i32 {
    match result {
        Ok(_) => EXIT_SUCCESS,
        Err(e) => {
            tracing::debug!("Provisioning aborted ({:?}): {:?}", e.outcome(), e);
            eprintln!("{}", e);
            EXIT_FAILURE
        }
    }
}
