//! Config subcommand handlers. These run without a backend or session.

use clap::ValueEnum;
use dialoguer::{Input, Select};

use fleetdesk_config::{Config, TokenStorage};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// TOML-style listing of every key, in `Config::KEYS` order.
fn format_config(cfg: &Config) -> String {
    Config::KEYS
        .iter()
        .filter_map(|key| {
            let value = cfg.get(key).ok()?;
            Some(match *key {
                "timeout" | "insecure" | "page_size" => format!("{key} = {value}"),
                _ => format!("{key} = \"{value}\""),
            })
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Map a dialoguer failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// `output` must name a format the CLI can render.
fn check_output(value: &str) -> Result<(), CliError> {
    OutputFormat::from_str(value, true)
        .map(|_| ())
        .map_err(|_| CliError::Validation {
            field: "output".into(),
            reason: "must be one of: table, json, json-compact, yaml, plain".into(),
        })
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => {
            crate::commands::util::require_interactive("config init", false)?;
            let path = fleetdesk_config::config_path();
            eprintln!("fleetdesk configuration");
            eprintln!("   Config path: {}\n", path.display());

            let mut cfg = fleetdesk_config::load_config().unwrap_or_default();

            let api_url: String = Input::new()
                .with_prompt("API base URL")
                .default(cfg.api_url.clone())
                .validate_with(|input: &String| -> Result<(), String> {
                    let mut candidate = Config::default();
                    candidate.set("api_url", input).map_err(|e| e.to_string())
                })
                .interact_text()
                .map_err(prompt_err)?;
            cfg.api_url = api_url;

            let storages = [TokenStorage::File, TokenStorage::Keyring, TokenStorage::Memory];
            let choices = &[
                "File in the data directory",
                "System keyring",
                "Nowhere (sign in on every run)",
            ];
            let current = storages
                .iter()
                .position(|s| *s == cfg.token_storage)
                .unwrap_or(0);
            let selection = Select::new()
                .with_prompt("Where should the session token be kept?")
                .items(choices)
                .default(current)
                .interact()
                .map_err(prompt_err)?;
            cfg.token_storage = storages.get(selection).copied().unwrap_or_default();

            let page_size: u32 = Input::new()
                .with_prompt("Rows per page")
                .default(cfg.page_size)
                .interact_text()
                .map_err(prompt_err)?;
            cfg.page_size = page_size;

            cfg.validate()?;
            let written = fleetdesk_config::save_config(&cfg)?;
            eprintln!("\n✓ Configuration written to {}", written.display());
            eprintln!("\n  Next: fleetdesk auth login");
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::resolve(global)?;
            let format = config::output_format(global, &cfg);
            let out = output::render_single(format, &cfg, format_config, |c| c.api_url.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            println!("{}", fleetdesk_config::config_path().display());
            Ok(())
        }

        ConfigCommand::Get { key } => {
            let cfg = fleetdesk_config::load_config()?;
            println!("{}", cfg.get(&key)?);
            Ok(())
        }

        ConfigCommand::Set { key, value } => {
            if key == "output" {
                check_output(&value)?;
            }
            let mut cfg = fleetdesk_config::load_config()?;
            cfg.set(&key, &value)?;
            let written = fleetdesk_config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Set {key} in {}", written.display());
            }
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn listing_quotes_strings_only() {
        let out = format_config(&Config::default());
        assert!(out.contains("timeout = 10"));
        assert!(out.contains("token_storage = \"file\""));
        assert!(out.lines().next().unwrap().starts_with("api_url = \""));
    }

    #[test]
    fn output_must_be_renderable() {
        assert!(check_output("yaml").is_ok());
        assert!(check_output("JSON").is_ok());
        assert!(check_output("xml").is_err());
    }
}
