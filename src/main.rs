use anyhow::Context;
use clap::Parser;
use galaxy_bootstrap::config::cli::usage_exit_code;
use galaxy_bootstrap::utils::{logger, validation::Validate};
use galaxy_bootstrap::{CliConfig, GalaxyClient, Mode, Provisioner, TerminalPrompt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match CliConfig::try_parse() {
        Ok(config) => config,
        Err(e) => {
            let _ = e.print();
            std::process::exit(usage_exit_code(&e));
        }
    };

    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: service_url={} check={}", config.service_url, config.check);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
    let mode = config.mode().context("resolving mode of operation")?;

    let client = GalaxyClient::new(&config.service_url, &config.api_key, config.timeout())
        .context("setting up Galaxy API client")?;
    let provisioner = Provisioner::new(client, TerminalPrompt).check_only(config.check);

    println!("Create new users in Galaxy instance at {}", config.service_url);
    let status = match mode {
        Mode::Single { email, name } => {
            provisioner
                .create_user(&email, name.as_deref(), config.password.clone())
                .await
        }
        Mode::Template {
            template,
            start,
            end,
        } => {
            provisioner
                .create_users_from_template(&template, start, end, config.password.clone())
                .await
        }
        Mode::Batch { file } => {
            if config.password.is_some() {
                tracing::warn!("--password is ignored in batch mode");
            }
            provisioner.create_batch_of_users(&file).await
        }
    };

    std::process::exit(status);
}
