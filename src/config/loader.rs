use anyhow::{anyhow, bail, Result};
use regex::Regex;
use std::path::Path;
use tracing::{debug, error};

use crate::config::settings::{LoggingConfig, SettingsConfig};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Load and validate settings from a YAML file
pub async fn file_to_settings(path: &Path) -> Result<SettingsConfig> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| anyhow!("failed to read settings {}: {}", path.display(), e))?;
    parse_settings(&content)
}

pub fn parse_settings(content: &str) -> Result<SettingsConfig> {
    let expanded = expand_env_vars(content)?;
    let mut settings: SettingsConfig = serde_yaml::from_str(&expanded)
        .inspect_err(|e| error!("parse settings error: {}", e))?;

    // Apply defaults
    if settings.logging.is_none() {
        settings.logging = Some(LoggingConfig::default());
    }

    debug!("validating settings ...");
    validate_settings(&settings)?;
    Ok(settings)
}

fn validate_settings(settings: &SettingsConfig) -> Result<()> {
    if let Some(retry) = &settings.retry {
        if retry.attempts == Some(0) {
            bail!("settings.retry.attempts must be >= 1");
        }
        if let (Some(base), Some(max)) = (retry.base_delay_ms, retry.max_delay_ms) {
            if max < base {
                bail!("settings.retry.max_delay_ms ({max}) must be >= base_delay_ms ({base})");
            }
        }
    }
    if let Some(logging) = &settings.logging {
        if !LOG_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
            bail!("settings.logging.level '{}' must be one of {:?}", logging.level, LOG_LEVELS);
        }
    }
    if settings.timeout_ms == Some(0) {
        bail!("settings.timeout_ms must be > 0");
    }
    Ok(())
}

/// Replaces `${VAR}` and `${VAR:default}` with environment values.
fn expand_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]+))?\}")?;
    let expanded = re.replace_all(input, |caps: &regex::Captures| {
        let var = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        std::env::var(var).unwrap_or_else(|_| default.to_string())
    });
    Ok(expanded.into_owned())
}
