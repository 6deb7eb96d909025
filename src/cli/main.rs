//! Command-line interface entry point for `NuEnrollment`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use nu_enrollment::config::Config;
use nu_enrollment::info;
use nu_enrollment::logger::{
    enable_debug, enable_verbose, init_file_logging, parse_level, set_level, Level,
};
use std::path::PathBuf;

fn main() {
    let args = Cli::parse();

    // The stored config is what `config` subcommands edit; CLI overrides only
    // apply to this run.
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    let mut effective = config.clone();
    effective.apply_overrides(&args.to_config_overrides());

    let mut level = parse_level(&effective.logging.level).unwrap_or(Level::Warn);
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = effective.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    if !effective.logging.file.is_empty() {
        let log_path = PathBuf::from(&effective.logging.file);
        let display_path = log_path.to_string_lossy();
        if init_file_logging(&log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
        }
        Command::Student { subcommand } => {
            let mut store = commands::open_store(&effective.database);
            commands::student::run(subcommand, &mut store);
        }
        Command::Course { subcommand } => {
            let mut store = commands::open_store(&effective.database);
            commands::course::run(subcommand, &mut store);
        }
        Command::Enrollment { subcommand } => {
            let mut store = commands::open_store(&effective.database);
            commands::enrollment::run(subcommand, &mut store);
        }
        Command::Export { format, output } => {
            let store = commands::open_store(&effective.database);
            let output_dir = output.unwrap_or_else(|| PathBuf::from(&effective.paths.exports_dir));
            commands::export::run(&store, &format, &output_dir);
        }
    }
}
