use crate::domain::model::ExistingClaims;
use crate::domain::ports::AccountService;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_url};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Clone, Deserialize)]
pub struct GalaxyUser {
    #[serde(default)]
    pub id: Option<String>,
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Serialize)]
struct NewUser<'a> {
    email: &'a str,
    username: &'a str,
    password: &'a str,
}

/// Galaxy 管理 API 的帳號服務
pub struct GalaxyClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl GalaxyClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        validate_url("service_url", base_url)?;
        validate_non_empty_string("api_key", api_key)?;

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
        })
    }

    fn users_endpoint(&self) -> String {
        format!("{}/api/users", self.base_url)
    }

    pub async fn list_users(&self) -> Result<Vec<GalaxyUser>> {
        let endpoint = self.users_endpoint();
        tracing::debug!("Fetching user list from: {}", endpoint);

        let response = self
            .client
            .get(&endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?
            .error_for_status()?;

        let users: Vec<GalaxyUser> = response.json().await?;
        tracing::debug!("Galaxy returned {} users", users.len());
        Ok(users)
    }
}

#[async_trait]
impl AccountService for GalaxyClient {
    async fn account_exists(&self, email: &str, name: &str) -> Result<ExistingClaims> {
        let users = self.list_users().await?;

        let mut claims = ExistingClaims::default();
        for user in &users {
            if user.email.eq_ignore_ascii_case(email) {
                claims.email_taken = true;
            }
            if user
                .username
                .as_deref()
                .is_some_and(|username| username.eq_ignore_ascii_case(name))
            {
                claims.name_taken = true;
            }
        }
        Ok(claims)
    }

    async fn create_account(&self, email: &str, name: &str, password: &str) -> Result<bool> {
        let endpoint = self.users_endpoint();
        tracing::debug!("Creating user {} via {}", email, endpoint);

        let response = self
            .client
            .post(&endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&NewUser {
                email,
                username: name,
                password,
            })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(true);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::error!("Galaxy refused to create {}: {} {}", email, status, body);
        Ok(false)
    }
}
