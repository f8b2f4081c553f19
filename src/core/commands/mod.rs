//! Command execution façade
//!
//! Intents arrive already parsed and type-checked (codes, semesters, grades, dates). Each
//! command validates its preconditions against the store and catalogs, mutates, updates the
//! selection when it produces a display, and returns a [`CommandResult`] whose feedback text
//! enumerates every item that succeeded or failed.

mod add;
mod delete;
mod edit;
mod new;
mod show;

use crate::core::catalog::Catalogs;
use crate::core::error::Result;
use crate::core::models::{Grade, ModuleCode};
use crate::core::profile_store::{ProfileEdit, ProfileStore};
use crate::logger::Logger;
use crate::{debug, info};
use chrono::NaiveDateTime;

/// Data for a new profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfile {
    /// Display name
    pub name: String,
    /// Course name; must exist in the course catalog
    pub course: String,
    /// Current semester
    pub current_semester: u32,
    /// Focus area; must belong to the course
    pub focus_area: Option<String>,
}

/// A task to attach, optionally dated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSpec {
    /// Description, unique per module (case-insensitive)
    pub description: String,
    /// Due date and time
    pub due: Option<NaiveDateTime>,
}

/// Enroll modules and/or attach a grade and tasks to them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddModules {
    /// Module codes, in input order
    pub codes: Vec<ModuleCode>,
    /// Semester to enroll modules that are not yet taken
    pub semester: Option<u32>,
    /// Grade to set on every listed module
    pub grade: Option<Grade>,
    /// Tasks to attach to every listed module
    pub tasks: Vec<TaskSpec>,
}

impl AddModules {
    /// Returns true if a grade or tasks are attached
    #[must_use]
    pub fn has_payload(&self) -> bool {
        self.grade.is_some() || !self.tasks.is_empty()
    }
}

/// Rename a task and/or change its due date-time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEdit {
    /// Current description (any case)
    pub description: String,
    /// New description
    pub new_description: Option<String>,
    /// New due date-time; `Some(None)` removes it
    pub new_due: Option<Option<NaiveDateTime>>,
}

/// Field-level edit of an enrolled module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditModule {
    /// Module to edit
    pub code: ModuleCode,
    /// Semester to move the module to
    pub semester: Option<u32>,
    /// Grade to set
    pub grade: Option<Grade>,
    /// Task change
    pub task: Option<TaskEdit>,
}

/// What a delete command removes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    /// The named profile and everything it owns
    Profile(String),
    /// A batch of enrolled modules (and their tasks)
    Modules(Vec<ModuleCode>),
    /// The grade of a module
    Grade(ModuleCode),
    /// Tasks of a module, by description
    Tasks {
        /// Owning module
        code: ModuleCode,
        /// Descriptions to delete
        descriptions: Vec<String>,
    },
}

/// What a show command displays
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowTarget {
    /// A profile; the active one when no name is given
    Profile(Option<String>),
    /// Modules taken in one semester
    Semester(u32),
    /// One module from the catalog
    Module(ModuleCode),
    /// A course; the active profile's course when no name is given
    Course(Option<String>),
    /// A focus area; the active profile's focus area when no name is given
    FocusArea(Option<String>),
}

/// A validated intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create the session's profile
    NewProfile(NewProfile),
    /// Enroll modules, or attach a grade and tasks
    Add(AddModules),
    /// Edit a profile; the active one when no target is given
    EditProfile {
        /// Profile to edit
        target: Option<String>,
        /// Fields to change
        edit: ProfileEdit,
    },
    /// Edit an enrolled module
    EditModule(EditModule),
    /// Delete something
    Delete(DeleteTarget),
    /// Display something
    Show(ShowTarget),
    /// Remove all data
    Clear,
    /// Stop the session
    Exit,
}

impl Command {
    /// Short name used in logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::NewProfile(_) => "new",
            Self::Add(_) => "add",
            Self::EditProfile { .. } => "edit profile",
            Self::EditModule(_) => "edit module",
            Self::Delete(_) => "delete",
            Self::Show(_) => "show",
            Self::Clear => "clear",
            Self::Exit => "exit",
        }
    }

    /// Returns true if a successful run changes the store and must be persisted
    #[must_use]
    pub const fn is_mutating(&self) -> bool {
        !matches!(self, Self::Show(_) | Self::Exit)
    }
}

/// Outcome of a successful command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    /// Human-readable feedback, one line per outcome
    pub feedback: String,
    /// True if the selection was replaced and should be rendered
    pub show_view: bool,
    /// True if the adapter should stop
    pub exit: bool,
}

impl CommandResult {
    /// Feedback only
    pub fn message(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            ..Self::default()
        }
    }

    /// Feedback plus a new displayed view
    pub fn with_view(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            show_view: true,
            exit: false,
        }
    }
}

/// Runs commands against a store with borrowed catalogs and logger
#[derive(Debug, Clone, Copy)]
pub struct CommandExecutor<'a> {
    catalogs: &'a Catalogs,
    logger: &'a Logger,
}

impl<'a> CommandExecutor<'a> {
    /// Create an executor
    #[must_use]
    pub const fn new(catalogs: &'a Catalogs, logger: &'a Logger) -> Self {
        Self { catalogs, logger }
    }

    /// Catalogs in use
    #[must_use]
    pub const fn catalogs(&self) -> &'a Catalogs {
        self.catalogs
    }

    /// Execute one command
    ///
    /// # Errors
    /// Returns the first validation failure; the store is unchanged in that case. Batch
    /// operations succeed when at least one item is applied.
    pub fn execute(&self, store: &mut ProfileStore, command: Command) -> Result<CommandResult> {
        debug!(self.logger, "Executing command: {}", command.name());
        let name = command.name();
        let result = match command {
            Command::NewProfile(data) => new::run(self, store, data),
            Command::Add(data) => add::run(self, store, &data),
            Command::EditProfile { target, edit } => {
                edit::profile(self, store, target.as_deref(), edit)
            }
            Command::EditModule(data) => edit::module(self, store, &data),
            Command::Delete(target) => delete::run(self, store, target),
            Command::Show(target) => show::run(self, store, target),
            Command::Clear => {
                store.clear();
                Ok(CommandResult::message("All data has been cleared."))
            }
            Command::Exit => Ok(CommandResult {
                feedback: "Goodbye!".to_string(),
                show_view: false,
                exit: true,
            }),
        }?;
        info!(self.logger, "Command '{name}' succeeded");
        Ok(result)
    }
}

pub(crate) fn join_codes(codes: &[ModuleCode]) -> String {
    codes
        .iter()
        .map(ModuleCode::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutating_commands() {
        assert!(Command::Clear.is_mutating());
        assert!(Command::Delete(DeleteTarget::Profile("John".into())).is_mutating());
        assert!(!Command::Show(ShowTarget::Semester(1)).is_mutating());
        assert!(!Command::Exit.is_mutating());
    }

    #[test]
    fn test_exit_sets_flag() {
        let catalogs = Catalogs::bundled().unwrap();
        let logger = Logger::quiet();
        let mut store = ProfileStore::new();
        let result = CommandExecutor::new(&catalogs, &logger)
            .execute(&mut store, Command::Exit)
            .unwrap();
        assert!(result.exit);
        assert!(!result.show_view);
    }
}
