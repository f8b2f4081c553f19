//! Profile command handler: opens the saved session and runs one command against it

use super::render;
use crate::args::ProfileCommand;
use moddy::config::Config;
use moddy::core::catalog::Catalogs;
use moddy::core::commands::CommandResult;
use moddy::core::session::Session;
use moddy::core::storage::{JsonFileStorage, ProfileStorage};
use moddy::logger::Logger;
use moddy::{info, verbose, ModelError};

/// Load catalogs and the saved profile named by the config
///
/// # Errors
/// Returns an error if a catalog override or the data file cannot be read or parsed.
pub fn open_session(config: &Config, logger: Logger) -> Result<Session<JsonFileStorage>, ModelError> {
    let module_path = config.module_catalog_path();
    let course_path = config.course_catalog_path();
    let catalogs = Catalogs::load(module_path.as_deref(), course_path.as_deref())?;
    info!(
        logger,
        "Catalogs loaded: {} module(s), {} course(s)",
        catalogs.modules.len(),
        catalogs.courses.courses().len()
    );

    let storage = JsonFileStorage::new(config.data_file_path());
    verbose!(logger, "Using data file: {}", storage.path().display());
    Session::open(storage, catalogs, logger)
}

/// Run one command and print its outcome
///
/// # Returns
/// `true` if the session should end
///
/// # Errors
/// Returns the command's error; nothing is printed for it.
pub fn execute<S: ProfileStorage>(
    session: &mut Session<S>,
    command: ProfileCommand,
) -> Result<bool, ModelError> {
    match command.into_model_command() {
        None => {
            print!("{}", render::deadlines(session.store().deadlines()));
            println!();
            Ok(false)
        }
        Some(command) => {
            let result = session.execute(command)?;
            print_result(session, &result);
            Ok(result.exit)
        }
    }
}

/// Run one command from the command line, exiting non-zero on failure
pub fn run<S: ProfileStorage>(session: &mut Session<S>, command: ProfileCommand) {
    if let Err(e) = execute(session, command) {
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
}

/// Print feedback, then the displayed view if the command replaced it
pub fn print_result<S: ProfileStorage>(session: &Session<S>, result: &CommandResult) {
    if !result.feedback.is_empty() {
        println!("✓ {}", result.feedback.replace('\n', "\n  "));
    }
    if result.show_view {
        if let Some(view) = session.store().selection().get() {
            println!();
            print!("{}", render::view(view));
        }
    }
}
