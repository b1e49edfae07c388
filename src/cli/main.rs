//! Command-line interface entry point for `techtree`

mod args;
mod commands;

use std::time::{SystemTime, UNIX_EPOCH};

use args::{Cli, Command};
use clap::Parser;
use techtree::config::Config;
use techtree::info;
use techtree::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // Effective runtime log level: CLI flag overrides config; fallback warn
    let effective_level = args
        .log_level
        .map(std::convert::Into::into)
        .or_else(|| parse_level(&config.logging.level))
        .unwrap_or(Level::Warn);

    let mut level = effective_level;
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    // Verbose: enable if CLI flag OR config has verbose=true
    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // Initialize file logging: CLI flag wins, otherwise config logging.file
    let config_log_path: Option<std::path::PathBuf> = if config.logging.file.is_empty() {
        None
    } else {
        Some(std::path::PathBuf::from(&config.logging.file))
    };

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            info!("File logging initialized at: {display_path}");
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
        }
        Command::Import {
            input_file,
            course_id,
            output,
        } => {
            commands::import::run(
                &input_file,
                course_id.as_deref(),
                output.as_deref(),
                &config,
                now_timestamp(),
                verbose,
            );
        }
        Command::Export {
            input_file,
            output,
            language,
        } => {
            commands::export::run(
                &input_file,
                output.as_deref(),
                language.as_deref(),
                &config,
                now_timestamp(),
            );
        }
        Command::Show { course_id } => {
            commands::show::run(&course_id, &config, now_timestamp());
        }
    }
}

/// Seconds since the Unix epoch, as the timestamp string stamped onto
/// documents that carry none of their own
fn now_timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "0".to_string())
}

fn parse_level(val: &str) -> Option<Level> {
    match val.to_ascii_lowercase().as_str() {
        "error" => Some(Level::Error),
        "warn" => Some(Level::Warn),
        "info" => Some(Level::Info),
        "debug" => Some(Level::Debug),
        _ => None,
    }
}
