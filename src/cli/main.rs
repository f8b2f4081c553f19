//! Command-line interface entry point for `MODdy`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use moddy::config::Config;
use moddy::info;
use moddy::logger::{Level, Logger};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    let logger = build_logger(&args, &config);

    match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
        }
        Command::Shell => match commands::profile::open_session(&config, logger) {
            Ok(mut session) => commands::shell::run(&mut session),
            Err(e) => fail(&e),
        },
        Command::Profile(command) => match commands::profile::open_session(&config, logger) {
            Ok(mut session) => commands::profile::run(&mut session, command),
            Err(e) => fail(&e),
        },
    }
}

/// Runtime level: CLI flag, then config `logging.level`, then warn
fn build_logger(args: &Cli, config: &Config) -> Logger {
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);
    if args.debug_flag {
        level = Level::Debug;
    }

    let mut logger = Logger::new(level);
    if level == Level::Debug {
        logger.enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        logger.enable_verbose();
    }

    // File logging: CLI flag wins, otherwise config logging.file if set
    let config_log_path = if config.logging.file.is_empty() {
        None
    } else {
        Some(std::path::PathBuf::from(&config.logging.file))
    };
    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if logger.init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!(logger, "File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }
    logger
}

fn fail(err: &moddy::ModelError) -> ! {
    eprintln!("✗ {err}");
    std::process::exit(1);
}
