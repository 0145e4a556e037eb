//! In-memory collaborators for unit tests.

use crate::domain::model::ExistingClaims;
use crate::domain::ports::{AccountService, PasswordPrompt};
use crate::utils::error::{ProvisionError, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeAccountService {
    accounts: Mutex<Vec<(String, String)>>,
    created: Mutex<Vec<String>>,
    lookups: Mutex<usize>,
    refuse_email: Option<String>,
    fail_lookups: bool,
}

impl FakeAccountService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accounts(accounts: &[(&str, &str)]) -> Self {
        let service = Self::new();
        *service.accounts.lock().unwrap() = accounts
            .iter()
            .map(|(email, name)| (email.to_string(), name.to_string()))
            .collect();
        service
    }

    pub fn refusing(mut self, email: &str) -> Self {
        self.refuse_email = Some(email.to_string());
        self
    }

    pub fn failing_lookups(mut self) -> Self {
        self.fail_lookups = true;
        self
    }

    pub fn created(&self) -> Vec<String> {
        self.created.lock().unwrap().clone()
    }

    pub fn lookups(&self) -> usize {
        *self.lookups.lock().unwrap()
    }
}

#[async_trait]
impl AccountService for FakeAccountService {
    async fn account_exists(&self, email: &str, name: &str) -> Result<ExistingClaims> {
        *self.lookups.lock().unwrap() += 1;
        if self.fail_lookups {
            return Err(ProvisionError::Io(std::io::Error::other("lookup failed")));
        }
        let accounts = self.accounts.lock().unwrap();
        Ok(ExistingClaims {
            email_taken: accounts.iter().any(|(e, _)| e == email),
            name_taken: accounts.iter().any(|(_, n)| n == name),
        })
    }

    async fn create_account(&self, email: &str, name: &str, _password: &str) -> Result<bool> {
        if self.refuse_email.as_deref() == Some(email) {
            return Ok(false);
        }
        self.accounts
            .lock()
            .unwrap()
            .push((email.to_string(), name.to_string()));
        self.created.lock().unwrap().push(email.to_string());
        Ok(true)
    }
}

/// 依序回傳預先排好的輸入
#[derive(Default)]
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<String>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().map(|a| a.to_string()).collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

impl PasswordPrompt for ScriptedPrompt {
    fn read_password(&self, label: &str) -> Result<String> {
        self.asked.lock().unwrap().push(label.to_string());
        self.answers.lock().unwrap().pop_front().ok_or_else(|| {
            ProvisionError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "no scripted answer left",
            ))
        })
    }
}
