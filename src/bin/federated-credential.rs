use std::path::Path;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::info;
use workload_identity::config::loader;
use workload_identity::config::settings::SettingsConfig;
use workload_identity::utils::logging::{self, LogLevel};
use workload_identity::{TokenRequestOptions, WorkloadIdentityCredential};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML settings file
    #[arg(short, long, env = "FEDERATED_CREDENTIAL_CONFIG")]
    config: Option<String>,
    /// Overrides AZURE_CLIENT_ID and the settings file
    #[arg(long)]
    client_id: Option<String>,
    /// Overrides AZURE_TENANT_ID and the settings file
    #[arg(long)]
    tenant_id: Option<String>,
    /// Scope to request, repeatable
    #[arg(long = "scope")]
    scopes: Vec<String>,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    /// Print the client assertion instead of exchanging it
    #[arg(long)]
    print_assertion: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Load settings, start logging
    // -------------------------------

    let args = Args::parse();
    let settings = match &args.config {
        Some(path) => loader::file_to_settings(Path::new(path)).await?,
        None => SettingsConfig::default(),
    };
    logging::run(&settings, args.log_level);

    // -------------------------------
    // 2. Build the credential
    // -------------------------------

    let mut options = settings.to_credential_options();
    if args.client_id.is_some() {
        options.client_id = args.client_id.clone();
    }
    if args.tenant_id.is_some() {
        options.tenant_id = args.tenant_id.clone();
    }
    let credential = WorkloadIdentityCredential::new(Some(options))?;

    if args.print_assertion {
        println!("{}", credential.assertion().await?);
        return Ok(());
    }

    // -------------------------------
    // 3. Exchange the assertion
    // -------------------------------

    let scopes = if args.scopes.is_empty() {
        settings.scopes.clone()
    } else {
        args.scopes.clone()
    };
    if scopes.is_empty() {
        bail!("no scopes given: pass --scope or set 'scopes' in the settings file");
    }

    let token = credential.get_token(&TokenRequestOptions::new(scopes)).await?;
    info!(expires_on = %token.expires_on, "token acquired");
    println!("{}", serde_json::to_string_pretty(&token)?);

    Ok(())
}
