//! Quickstart sample: annotate a settings type, validate it, report.

use anyhow::Context as _;
use clap::Parser;
use fieldcheck::{ValidatableExt, ValidatableOptions, validate};
use fieldcheck_derive::Validatable;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::info;

/// Mail-relay settings with declarative validity constraints.
#[derive(Debug, Default, Deserialize, Validatable)]
struct RelayOptions {
    /// Host name of the relay; always required.
    #[check(required)]
    host: Option<String>,
    /// Whether alert mail is enabled.
    #[serde(default)]
    alerts_enabled: bool,
    /// Recipients for alerts; required only when alerts are on.
    #[check(required_when(other = "alerts_enabled"), email_list)]
    alert_recipients: Option<String>,
    /// On-call phone numbers, `;`-separated entries.
    #[serde(default)]
    #[check(phone_list)]
    oncall_phones: Vec<String>,
    /// Credentials block, validated recursively.
    #[check(nested)]
    credentials: Option<CredentialOptions>,
}

impl ValidatableOptions for RelayOptions {}

/// Relay credential settings.
#[derive(Debug, Default, Deserialize, Validatable)]
struct CredentialOptions {
    /// Account user name.
    #[check(required)]
    user: Option<String>,
    /// Account password; must carry a digit, an upper-case letter, and a
    /// symbol.
    #[check(required, one_or_more_digits, one_or_more_upper_case, one_or_more_non_alpha)]
    password: Option<String>,
}

#[derive(Debug, Parser)]
#[command(
    name = "fieldcheck-quickstart",
    version,
    about = "Validate relay settings with declarative field checks",
    long_about = None
)]
struct Cli {
    /// Settings file (TOML). Without it, a deliberately invalid built-in
    /// sample is validated instead.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Exit with an error on the first invalid settings object instead of
    /// printing the full report.
    #[arg(long)]
    strict: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let options = load_options(cli.config.as_deref())?;

    if cli.strict {
        // Throwing path: one aggregated error naming the type, every
        // violation message, and every implicated member.
        options.ensure_valid()?;
        info!("settings are valid");
        return Ok(());
    }

    let report = validate(&options);
    if report.is_empty() {
        info!("settings are valid");
    } else {
        info!(violations = report.len(), "settings are invalid");
    }
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn load_options(path: Option<&std::path::Path>) -> anyhow::Result<RelayOptions> {
    let Some(path) = path else {
        // Invalid on purpose: alerts are on but no recipient is set, and
        // the password violates every format rule.
        return Ok(RelayOptions {
            host: Some("smtp.example.com".to_string()),
            alerts_enabled: true,
            alert_recipients: None,
            oncall_phones: vec!["+1 (555) 123-4567".to_string()],
            credentials: Some(CredentialOptions {
                user: Some("relay".to_string()),
                password: Some("password".to_string()),
            }),
        });
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading settings from {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parsing settings from {}", path.display()))
}
