use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use authn::AuthNModule;
use authn::config::AuthNConfig;
use authn::infra::Argon2Verifier;
use authn_sdk::{AuthNError, LoginRequest};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use corebank_security::{Authority, Principal, build_principal};
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

/// Log users in against the configured account directory.
#[derive(Parser)]
#[command(name = "authn-cli", version)]
struct Cli {
    /// YAML configuration file; `COREBANK_AUTHN_*` variables override it.
    #[arg(long, env = "AUTHN_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Authenticate and print the resulting principal.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "AUTHN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Print the principal derived from a configured account, without
    /// checking a password.
    Principal {
        #[arg(long)]
        username: String,
    },
    /// Hash a password for use in the `accounts` configuration.
    /// Reads the password from stdin when `--password` is omitted.
    HashPassword {
        #[arg(long, env = "AUTHN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("authn-cli failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if json {
        builder.json().with_current_span(false).init();
    } else {
        builder.init();
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let cfg = AuthNConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Login { username, password } => {
            let client = AuthNModule::from_config(&cfg)?.client();
            match client
                .authenticate(&LoginRequest::new(username, password))
                .await
            {
                Ok(result) => {
                    tracing::info!(username = result.principal.username(), "login accepted");
                    println!("{}", render_principal(&result.principal));
                    Ok(ExitCode::SUCCESS)
                }
                Err(AuthNError::Unauthorized) => {
                    tracing::warn!("login failed: {}", AuthNError::Unauthorized);
                    Ok(ExitCode::FAILURE)
                }
                Err(e) => Err(e).context("login could not be completed"),
            }
        }
        Command::Principal { username } => {
            let account = cfg
                .accounts
                .iter()
                .find(|a| a.username.as_deref() == Some(username.as_str()))
                .with_context(|| format!("no configured account named '{username}'"))?
                .to_account();
            let principal = build_principal(&account)?;
            println!("{}", render_principal(&principal));
            Ok(ExitCode::SUCCESS)
        }
        Command::HashPassword { password } => {
            let password = match password {
                Some(p) => p,
                None => read_password_line()?,
            };
            anyhow::ensure!(!password.is_empty(), "password must not be empty");

            let verifier = Argon2Verifier::new(&cfg.argon2)?;
            tracing::debug!(
                memory_cost = cfg.argon2.memory_cost,
                time_cost = cfg.argon2.time_cost,
                "hashing password"
            );
            println!("{}", verifier.hash_password(&SecretString::from(password))?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn read_password_line() -> anyhow::Result<String> {
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}

fn render_principal(principal: &Principal) -> String {
    let authorities = principal
        .authorities()
        .iter()
        .map(Authority::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    let status = principal.status();

    [
        format!("username:    {}", principal.username()),
        format!("name:        {}", principal.display_name()),
        format!("authorities: {authorities}"),
        format!("enabled:     {}", status.enabled),
        format!("locked:      {}", status.locked),
        format!("expires:     {}", instant(status.expires_at)),
        format!("credentials: {}", instant(status.credentials_expire_at)),
    ]
    .join("\n")
}

fn instant(at: Option<DateTime<Utc>>) -> String {
    at.map_or_else(|| "never".to_owned(), |at| at.to_rfc3339())
}
