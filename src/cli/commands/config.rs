//! Config command handler

use crate::args::ConfigSubcommand;
use nu_enrollment::config::Config;
use nu_enrollment::{error, info};

use super::confirm;

/// Keys accepted by `config get/set/unset`
const KEYS: &str = "level, file, verbose, backend, db_path, exports_dir";

/// Dispatch config subcommands
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    match subcommand {
        None => handle_config_get(config, None),
        Some(ConfigSubcommand::Get { key }) => handle_config_get(config, key),
        Some(ConfigSubcommand::Set { key, value }) => handle_config_set(config, &key, &value),
        Some(ConfigSubcommand::Unset { key }) => handle_config_unset(config, defaults, &key),
        Some(ConfigSubcommand::Reset) => handle_config_reset(),
    }
}

/// Handle the config get subcommand
pub fn handle_config_get(config: &Config, key: Option<String>) {
    if let Some(k) = key {
        match config.get(&k) {
            Some(value) => println!("{value}"),
            None => {
                eprintln!("✗ Unknown config key: '{k}' (expected one of: {KEYS})");
                std::process::exit(1);
            }
        }
    } else {
        println!("\n=== Configuration ===");
        println!("# {}\n", Config::get_config_file_path().display());
        print!("{config}");
    }
}

fn save_or_exit(config: &Config) {
    if let Err(e) = config.save() {
        error!("Failed to save config: {e}");
        eprintln!("✗ Failed to save config: {e}");
        std::process::exit(1);
    }
}

/// Handle the config set subcommand
pub fn handle_config_set(config: &mut Config, key: &str, value: &str) {
    if let Err(e) = config.set(key, value) {
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
    save_or_exit(config);

    info!("Config {key} set to '{value}'");
    // `backend` is stored normalized, so echo what was saved.
    let stored = config.get(key).unwrap_or_else(|| value.to_string());
    println!("✓ Set {key} = {stored}");
}

/// Handle the config unset subcommand
pub fn handle_config_unset(config: &mut Config, defaults: &Config, key: &str) {
    if let Err(e) = config.unset(key, defaults) {
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
    save_or_exit(config);

    println!(
        "✓ Reset {key} to default ({})",
        config.get(key).unwrap_or_default()
    );
}

/// Handle the config reset subcommand
pub fn handle_config_reset() {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return;
    }

    if !confirm("Are you sure you want to reset config to defaults?") {
        println!("✗ Reset cancelled");
        return;
    }

    if let Err(e) = Config::reset() {
        error!("Failed to remove config file: {e}");
        eprintln!("✗ Failed to remove config file: {e}");
        std::process::exit(1);
    }
    println!("✓ Config reset to defaults");
}
