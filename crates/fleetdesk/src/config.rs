//! Resolves the effective configuration (file, env, flags) and builds the
//! session `Console` from it.

use clap::ValueEnum;
use tracing::debug;

use fleetdesk_config::Config;
use fleetdesk_core::{ApiClient, Console};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Load the config file and apply flag overrides on top.
pub fn resolve(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = fleetdesk_config::load_config()?;

    if let Some(ref url) = global.api_url {
        cfg.api_url.clone_from(url);
    }
    if let Some(timeout) = global.timeout {
        cfg.timeout = timeout;
    }
    if global.insecure {
        cfg.insecure = true;
    }

    cfg.validate()?;
    debug!(api_url = %cfg.api_url, storage = %cfg.token_storage, "effective config");
    Ok(cfg)
}

/// Output format: flag, then config, then table.
pub fn output_format(global: &GlobalOpts, cfg: &Config) -> OutputFormat {
    global
        .output
        .or_else(|| OutputFormat::from_str(&cfg.output, true).ok())
        .unwrap_or(OutputFormat::Table)
}

/// Wire the API client to the configured token store.
pub fn build_console(cfg: &Config) -> Result<Console, CliError> {
    let api = ApiClient::new(&cfg.api_url, &cfg.transport(), cfg.token_store())?;
    Ok(Console::new(api))
}
