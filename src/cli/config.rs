//! CLI commands for configuration

use clap::Subcommand;

use crate::ai::API_KEY_ENV;
use crate::config::{FinsightPaths, Settings};
use crate::error::FinsightResult;

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show configuration paths and settings
    Show,
    /// Write the default settings file
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
}

/// Handle config commands
///
/// `Show` reads the settings file; `Init` never does, so it can replace a
/// file that no longer parses.
pub fn handle_config_command(paths: &FinsightPaths, cmd: ConfigCommands) -> FinsightResult<()> {
    match cmd {
        ConfigCommands::Show => {
            let settings = Settings::load_or_create(paths)?;
            println!("finsight Configuration");
            println!("======================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            if !paths.is_initialized() {
                println!("                  (not written yet, using defaults)");
            }
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Preview rows:    {}", settings.preview_rows);
            println!();
            println!("AI:");
            println!("  Model:       {}", settings.ai.model);
            println!("  API base:    {}", settings.ai.api_base);
            println!("  Max tokens:  {}", settings.ai.max_tokens);
            println!("  Temperature: {}", settings.ai.temperature);
            println!("  Timeout:     {}s", settings.ai.timeout_secs);
            println!("  Retries:     {}", settings.ai.max_retries);
            let key_set = std::env::var(API_KEY_ENV)
                .map(|k| !k.trim().is_empty())
                .unwrap_or(false);
            let key_state = if key_set {
                "set"
            } else {
                "not set"
            };
            println!("  {}: {}", API_KEY_ENV, key_state);
        }
        ConfigCommands::Init { force } => {
            if paths.is_initialized() && !force {
                println!(
                    "Settings already exist at: {} (use --force to overwrite)",
                    paths.settings_file().display()
                );
                return Ok(());
            }
            Settings::default().save(paths)?;
            println!("Settings written to: {}", paths.settings_file().display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_defaults_once() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinsightPaths::with_base_dir(temp_dir.path().to_path_buf());

        handle_config_command(&paths, ConfigCommands::Init { force: false }).unwrap();
        assert!(paths.is_initialized());

        std::fs::write(paths.settings_file(), r#"{"currency_symbol":"€"}"#).unwrap();
        handle_config_command(&paths, ConfigCommands::Init { force: false }).unwrap();
        let kept = Settings::load_or_create(&paths).unwrap();
        assert_eq!(kept.currency_symbol, "€");

        handle_config_command(&paths, ConfigCommands::Init { force: true }).unwrap();
        let reset = Settings::load_or_create(&paths).unwrap();
        assert_eq!(reset.currency_symbol, "$");
    }

    #[test]
    fn test_init_force_replaces_unparseable_settings() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinsightPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "not json").unwrap();

        assert!(handle_config_command(&paths, ConfigCommands::Show).is_err());
        handle_config_command(&paths, ConfigCommands::Init { force: true }).unwrap();
        assert!(Settings::load_or_create(&paths).is_ok());
    }
}
