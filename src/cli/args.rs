//! CLI argument definitions for `MODdy`

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::{builder::BoolishValueParser, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use moddy::config::ConfigOverrides;
use moddy::core::commands::{
    AddModules, Command as ModelCommand, DeleteTarget, EditModule, NewProfile, ShowTarget,
    TaskEdit, TaskSpec,
};
use moddy::core::models::deadline::{DATE_FORMAT, TIME_FORMAT};
use moddy::core::models::{Grade, ModuleCode};
use moddy::core::profile_store::ProfileEdit;
use moddy::logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `moddy::logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| format!("'{value}' is not a date in YYYY-MM-DD format"))
}

fn parse_time(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT)
        .map_err(|_| format!("'{value}' is not a time in HH:MM format"))
}

fn parse_name(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err("name must not be empty".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

/// Due date and time; both are required together
#[derive(Debug, Clone, Default, Args)]
pub struct DueArgs {
    /// Due date (YYYY-MM-DD)
    #[arg(short = 'd', long, value_name = "DATE", value_parser = parse_date, requires = "time")]
    pub date: Option<NaiveDate>,

    /// Due time (HH:MM)
    #[arg(long, value_name = "TIME", value_parser = parse_time, requires = "date")]
    pub time: Option<NaiveTime>,
}

impl DueArgs {
    /// Combined date-time when both parts are given
    #[must_use]
    pub fn due(&self) -> Option<NaiveDateTime> {
        self.date.zip(self.time).map(|(date, time)| date.and_time(time))
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `data_file`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum EditTarget {
    /// Edit the profile's name, course, semester or focus area.
    Profile {
        /// Profile to edit (defaults to the active profile)
        #[arg(value_name = "PROFILE")]
        target: Option<String>,
        /// New name
        #[arg(short, long, value_parser = parse_name)]
        name: Option<String>,
        /// New course
        #[arg(short, long)]
        course: Option<String>,
        /// New current semester
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        semester: Option<u32>,
        /// New focus area
        #[arg(short, long)]
        focus_area: Option<String>,
    },
    /// Move a module, set its grade, or change one of its tasks.
    Module {
        /// Module code
        #[arg(value_name = "CODE")]
        code: ModuleCode,
        /// Semester to move the module to
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        semester: Option<u32>,
        /// Grade to set
        #[arg(short, long)]
        grade: Option<Grade>,
        /// Task to change
        #[arg(short, long, value_name = "DESCRIPTION")]
        task: Option<String>,
        /// New description of the task
        #[arg(long, value_name = "DESCRIPTION", requires = "task")]
        rename: Option<String>,
        #[command(flatten)]
        due: DueArgs,
        /// Remove the task's due date
        #[arg(long, requires = "task", conflicts_with = "date")]
        undated: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum DeleteCmd {
    /// Delete the profile and everything in it.
    Profile {
        /// Profile name
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Remove modules (their tasks go too).
    Module {
        /// Module codes
        #[arg(value_name = "CODES", num_args = 1.., required = true)]
        codes: Vec<ModuleCode>,
    },
    /// Remove the grade of a module.
    Grade {
        /// Module code
        #[arg(value_name = "CODE")]
        code: ModuleCode,
    },
    /// Delete tasks of a module.
    Task {
        /// Module code
        #[arg(value_name = "CODE")]
        code: ModuleCode,
        /// Task descriptions
        #[arg(value_name = "DESCRIPTIONS", num_args = 1.., required = true)]
        descriptions: Vec<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ShowCmd {
    /// Show a profile with its CAP.
    Profile {
        /// Profile name (defaults to the active profile)
        #[arg(value_name = "NAME")]
        name: Option<String>,
    },
    /// Show the modules of one semester.
    Semester {
        /// Semester number
        #[arg(value_name = "SEMESTER", value_parser = clap::value_parser!(u32).range(1..))]
        semester: u32,
    },
    /// Show a module from the catalog.
    Module {
        /// Module code
        #[arg(value_name = "CODE")]
        code: ModuleCode,
    },
    /// Show a course and its requirements.
    Course {
        /// Course name (defaults to the profile's course)
        #[arg(value_name = "NAME")]
        name: Option<String>,
    },
    /// Show a focus area and its modules.
    FocusArea {
        /// Focus area name (defaults to the profile's focus area)
        #[arg(value_name = "NAME")]
        name: Option<String>,
    },
}

/// Commands that act on the saved profile; shared by the CLI and the shell
#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Create your profile.
    New {
        /// Your name
        #[arg(value_name = "NAME", value_parser = parse_name)]
        name: String,
        /// Course you are enrolled in
        #[arg(short, long)]
        course: String,
        /// Current semester
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        semester: u32,
        /// Focus area within the course
        #[arg(short, long)]
        focus_area: Option<String>,
    },
    /// Add modules to a semester, or attach a grade and tasks to them.
    Add {
        /// Module codes
        #[arg(value_name = "CODES", num_args = 1.., required = true)]
        codes: Vec<ModuleCode>,
        /// Semester to add the modules to
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        semester: Option<u32>,
        /// Grade to set
        #[arg(short, long)]
        grade: Option<Grade>,
        /// Task to attach (repeatable)
        #[arg(short, long = "task", value_name = "DESCRIPTION")]
        tasks: Vec<String>,
        #[command(flatten)]
        due: DueArgs,
    },
    /// Edit the profile or a module.
    Edit {
        #[command(subcommand)]
        target: EditTarget,
    },
    /// Delete the profile, modules, a grade or tasks.
    Delete {
        #[command(subcommand)]
        target: DeleteCmd,
    },
    /// Show a profile, semester, module, course or focus area.
    Show {
        #[command(subcommand)]
        target: ShowCmd,
    },
    /// List every task, soonest first.
    Deadlines,
    /// Remove all saved data.
    Clear,
}

impl ProfileCommand {
    /// Build the model command for this intent; `None` for read-only listings handled
    /// by the CLI itself
    #[must_use]
    pub fn into_model_command(self) -> Option<ModelCommand> {
        let command = match self {
            Self::New {
                name,
                course,
                semester,
                focus_area,
            } => ModelCommand::NewProfile(NewProfile {
                name,
                course,
                current_semester: semester,
                focus_area,
            }),
            Self::Add {
                codes,
                semester,
                grade,
                tasks,
                due,
            } => ModelCommand::Add(AddModules {
                codes,
                semester,
                grade,
                tasks: tasks
                    .into_iter()
                    .map(|description| TaskSpec {
                        description,
                        due: due.due(),
                    })
                    .collect(),
            }),
            Self::Edit { target } => match target {
                EditTarget::Profile {
                    target,
                    name,
                    course,
                    semester,
                    focus_area,
                } => ModelCommand::EditProfile {
                    target,
                    edit: ProfileEdit {
                        name,
                        course,
                        current_semester: semester,
                        focus_area,
                    },
                },
                EditTarget::Module {
                    code,
                    semester,
                    grade,
                    task,
                    rename,
                    due,
                    undated,
                } => ModelCommand::EditModule(EditModule {
                    code,
                    semester,
                    grade,
                    task: task.map(|description| TaskEdit {
                        description,
                        new_description: rename,
                        new_due: if undated { Some(None) } else { due.due().map(Some) },
                    }),
                }),
            },
            Self::Delete { target } => ModelCommand::Delete(match target {
                DeleteCmd::Profile { name } => DeleteTarget::Profile(name),
                DeleteCmd::Module { codes } => DeleteTarget::Modules(codes),
                DeleteCmd::Grade { code } => DeleteTarget::Grade(code),
                DeleteCmd::Task { code, descriptions } => {
                    DeleteTarget::Tasks { code, descriptions }
                }
            }),
            Self::Show { target } => ModelCommand::Show(match target {
                ShowCmd::Profile { name } => ShowTarget::Profile(name),
                ShowCmd::Semester { semester } => ShowTarget::Semester(semester),
                ShowCmd::Module { code } => ShowTarget::Module(code),
                ShowCmd::Course { name } => ShowTarget::Course(name),
                ShowCmd::FocusArea { name } => ShowTarget::FocusArea(name),
            }),
            Self::Deadlines => return None,
            Self::Clear => ModelCommand::Clear,
        };
        Some(command)
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Read commands line by line until `exit`.
    Shell,
    #[command(flatten)]
    Profile(ProfileCommand),
}

/// One line typed into the shell
#[derive(Parser, Debug)]
#[command(name = "moddy", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Debug, Subcommand)]
pub enum ShellCommand {
    /// Leave the shell.
    Exit,
    #[command(flatten)]
    Profile(ProfileCommand),
}

#[derive(Parser, Debug)]
#[command(
    name = "moddy",
    about = "MODdy: plan modules per semester, track grades, CAP and deadlines",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level (stored in config file)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Use this profile data file for this run
    #[arg(long = "data-file", value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string().to_lowercase()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            data_file: self
                .data_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            module_catalog: None,
            course_catalog: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("moddy").chain(args.iter().copied())).unwrap()
    }

    fn model_command(args: &[&str]) -> ModelCommand {
        match parse(args).command {
            Command::Profile(cmd) => cmd.into_model_command().unwrap(),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let cli = parse(&["config"]);
        let overrides = cli.to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.data_file.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let cli = parse(&[
            "--config-level",
            "debug",
            "--config-log-file",
            "/tmp/test.log",
            "--config-verbose",
            "true",
            "--data-file",
            "/tmp/profile.json",
            "deadlines",
        ]);

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/test.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.data_file, Some("/tmp/profile.json".to_string()));
    }

    #[test]
    fn test_add_parses_codes_and_tasks() {
        let command = model_command(&[
            "add", "cs1101s", "MA1521", "-s", "1", "-t", "Quiz", "-d", "2024-10-01", "--time",
            "23:59",
        ]);
        let ModelCommand::Add(add) = command else {
            panic!("expected add");
        };
        assert_eq!(add.codes.len(), 2);
        assert_eq!(add.codes[0].as_str(), "CS1101S");
        assert_eq!(add.semester, Some(1));
        assert_eq!(add.tasks.len(), 1);
        assert!(add.tasks[0].due.is_some());
    }

    #[test]
    fn test_date_requires_time() {
        let result = Cli::try_parse_from(["moddy", "add", "CS1101S", "-t", "Quiz", "-d", "2024-10-01"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_bad_inputs() {
        assert!(Cli::try_parse_from(["moddy", "add", "CS11", "-s", "1"]).is_err());
        assert!(Cli::try_parse_from(["moddy", "add", "CS1101S", "-s", "0"]).is_err());
        assert!(Cli::try_parse_from(["moddy", "add", "CS1101S", "-g", "Z"]).is_err());
        assert!(Cli::try_parse_from(["moddy", "new", "  ", "-c", "CS", "-s", "1"]).is_err());
    }

    #[test]
    fn test_edit_module_undated() {
        let command = model_command(&["edit", "module", "CS2103T", "-t", "Project", "--undated"]);
        let ModelCommand::EditModule(edit) = command else {
            panic!("expected edit module");
        };
        assert_eq!(edit.task.unwrap().new_due, Some(None));
    }

    #[test]
    fn test_deadlines_has_no_model_command() {
        match parse(&["deadlines"]).command {
            Command::Profile(cmd) => assert!(cmd.into_model_command().is_none()),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_shell_line_exit() {
        let line = ShellLine::try_parse_from(["exit"]).unwrap();
        assert!(matches!(line.command, ShellCommand::Exit));
        let line = ShellLine::try_parse_from(["show", "semester", "2"]).unwrap();
        assert!(matches!(line.command, ShellCommand::Profile(ProfileCommand::Show { .. })));
    }
}
