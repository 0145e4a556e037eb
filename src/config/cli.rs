use crate::config::Mode;
use crate::utils::error::{ProvisionError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, Validate,
};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "galaxy-bootstrap", version)]
#[command(about = "Create new user(s) in the specified Galaxy instance")]
#[command(override_usage = "galaxy-bootstrap [OPTIONS] GALAXY_URL API_KEY EMAIL [PUBLIC_NAME]
       galaxy-bootstrap --template [OPTIONS] GALAXY_URL API_KEY TEMPLATE START [END]
       galaxy-bootstrap --batch [OPTIONS] GALAXY_URL API_KEY FILE")]
pub struct CliConfig {
    /// Base URL of the Galaxy instance
    pub service_url: String,

    /// Admin API key
    pub api_key: String,

    /// Email, template email (--template) or TSV file (--batch)
    pub target: String,

    /// PUBLIC_NAME, or START [END] with --template
    #[arg(num_args = 0..=2)]
    pub extra: Vec<String>,

    #[arg(
        short = 'p',
        long,
        help = "Password for the new account(s) (otherwise prompt for it)"
    )]
    pub password: Option<String>,

    #[arg(short = 'c', long, help = "Check details but don't create any account")]
    pub check: bool,

    #[arg(
        short = 't',
        long,
        conflicts_with = "batch",
        help = "TARGET is a template email with '#' where an integer index is substituted"
    )]
    pub template: bool,

    #[arg(
        short = 'b',
        long,
        help = "Read email<TAB>password[<TAB>public_name] lines from the TSV file TARGET"
    )]
    pub batch: bool,

    #[arg(long, default_value = "30")]
    pub timeout_seconds: u64,

    #[arg(short = 'v', long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// 依旗標決定模式並解析對應的位置參數
    pub fn mode(&self) -> Result<Mode> {
        if self.template {
            let start = self.extra.first().ok_or_else(|| {
                ProvisionError::malformed_input("Template mode requires a START index")
            })?;
            let start = parse_index("start", start)?;
            let end = self
                .extra
                .get(1)
                .map(|end| parse_index("end", end))
                .transpose()?;
            return Ok(Mode::Template {
                template: self.target.clone(),
                start,
                end,
            });
        }

        if self.batch {
            if !self.extra.is_empty() {
                return Err(ProvisionError::malformed_input(
                    "Batch mode takes a single FILE argument",
                ));
            }
            return Ok(Mode::Batch {
                file: PathBuf::from(&self.target),
            });
        }

        if self.extra.len() > 1 {
            return Err(ProvisionError::malformed_input(
                "Single mode takes EMAIL and an optional PUBLIC_NAME",
            ));
        }
        Ok(Mode::Single {
            email: self.target.clone(),
            name: self.extra.first().cloned(),
        })
    }
}

/// `--help` / `--version` 以 0 結束，其他用法錯誤一律以 1 結束
pub fn usage_exit_code(error: &clap::Error) -> i32 {
    if error.use_stderr() {
        1
    } else {
        0
    }
}

fn parse_index(field: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|e| ProvisionError::InvalidConfigValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: format!("not a non-negative integer: {}", e),
        })
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("service_url", &self.service_url)?;
        validate_non_empty_string("api_key", &self.api_key)?;
        validate_non_empty_string("target", &self.target)?;
        validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        self.mode().map(|_| ())
    }
}
