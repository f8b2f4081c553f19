//! Student profile model

use super::{Deadline, EnrolledModule, ModuleCode};
use crate::core::error::{Entity, ModelError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Highest semester number a module can be planned for (five years of two semesters)
pub const MAX_SEMESTER: u32 = 10;

/// Check that a semester number lies in `1..=MAX_SEMESTER`
///
/// # Errors
/// Returns `InvalidArgument` for semesters out of range.
pub fn check_semester(semester: u32) -> Result<u32> {
    if (1..=MAX_SEMESTER).contains(&semester) {
        Ok(semester)
    } else {
        Err(ModelError::InvalidArgument(format!(
            "semester {semester} is out of range (1 to {MAX_SEMESTER})"
        )))
    }
}

/// One student's academic record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Display name; compared case-insensitively
    pub name: String,

    /// Enrolled course name (e.g., "Computer Science")
    pub course: String,

    /// Declared focus area, if any
    #[serde(default)]
    pub focus_area: Option<String>,

    /// Semester the student is currently in
    pub current_semester: u32,

    /// Modules taken per semester; a code appears in at most one semester
    #[serde(default)]
    semesters: BTreeMap<u32, Vec<EnrolledModule>>,
}

impl Profile {
    /// Create a profile with no modules
    #[must_use]
    pub const fn new(
        name: String,
        course: String,
        current_semester: u32,
        focus_area: Option<String>,
    ) -> Self {
        Self {
            name,
            course,
            focus_area,
            current_semester,
            semesters: BTreeMap::new(),
        }
    }

    /// Case-insensitive identity check
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }

    /// Semester in which the module is taken, if enrolled
    #[must_use]
    pub fn semester_of(&self, code: &ModuleCode) -> Option<u32> {
        self.semesters
            .iter()
            .find(|(_, modules)| modules.iter().any(|m| m.code() == code))
            .map(|(semester, _)| *semester)
    }

    /// Returns true if the module is enrolled in any semester
    #[must_use]
    pub fn is_enrolled(&self, code: &ModuleCode) -> bool {
        self.semester_of(code).is_some()
    }

    /// Enrolled module record by code
    #[must_use]
    pub fn module(&self, code: &ModuleCode) -> Option<&EnrolledModule> {
        self.semesters
            .values()
            .flatten()
            .find(|m| m.code() == code)
    }

    /// Mutable enrolled module record by code
    pub fn module_mut(&mut self, code: &ModuleCode) -> Option<&mut EnrolledModule> {
        self.semesters
            .values_mut()
            .flatten()
            .find(|m| m.code() == code)
    }

    /// Modules taken in a semester, in insertion order
    #[must_use]
    pub fn modules_in(&self, semester: u32) -> &[EnrolledModule] {
        self.semesters.get(&semester).map_or(&[], Vec::as_slice)
    }

    /// All semesters with their modules, ascending by semester
    #[must_use]
    pub const fn semesters(&self) -> &BTreeMap<u32, Vec<EnrolledModule>> {
        &self.semesters
    }

    /// Every enrolled module across semesters
    pub fn modules(&self) -> impl Iterator<Item = &EnrolledModule> {
        self.semesters.values().flatten()
    }

    /// Enroll a module in a semester
    ///
    /// # Errors
    /// Returns `DuplicateEntity` if the code is already enrolled in any semester.
    pub fn enroll(&mut self, semester: u32, module: EnrolledModule) -> Result<()> {
        if self.is_enrolled(module.code()) {
            return Err(ModelError::duplicate(
                Entity::EnrolledModule,
                module.code().to_string(),
            ));
        }
        self.semesters.entry(semester).or_default().push(module);
        Ok(())
    }

    /// Remove an enrolled module, dropping the semester entry when it becomes empty
    pub fn unenroll(&mut self, code: &ModuleCode) -> Option<EnrolledModule> {
        let semester = self.semester_of(code)?;
        let modules = self.semesters.get_mut(&semester)?;
        let idx = modules.iter().position(|m| m.code() == code)?;
        let removed = modules.remove(idx);
        if modules.is_empty() {
            self.semesters.remove(&semester);
        }
        Some(removed)
    }

    /// Snapshot of every task across all modules
    #[must_use]
    pub fn deadlines(&self) -> Vec<Deadline> {
        self.modules()
            .flat_map(|m| m.deadlines.iter().cloned())
            .collect()
    }

    /// Total number of enrolled modules
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.modules().count()
    }

    /// Check a profile read from outside the model (e.g. a data file)
    ///
    /// # Errors
    /// - `InvalidArgument` if the current semester or a semester key is out of range, or a
    ///   task names a module other than the one holding it
    /// - `DuplicateEntity` listing codes enrolled more than once, or tasks repeated within a
    ///   module (any case)
    pub fn validate(&self) -> Result<()> {
        check_semester(self.current_semester)?;
        for semester in self.semesters.keys() {
            check_semester(*semester)?;
        }

        let mut seen = HashSet::new();
        let mut repeated = Vec::new();
        for module in self.modules() {
            if !seen.insert(module.code()) && !repeated.contains(module.code()) {
                repeated.push(module.code().clone());
            }
        }
        if !repeated.is_empty() {
            return Err(ModelError::DuplicateEntity {
                entity: Entity::EnrolledModule,
                keys: repeated.iter().map(ToString::to_string).collect(),
            });
        }

        for module in self.modules() {
            let mut descriptions = HashSet::new();
            for deadline in &module.deadlines {
                if &deadline.module_code != module.code() {
                    return Err(ModelError::InvalidArgument(format!(
                        "task {} is filed under {} but belongs to {}",
                        deadline.description,
                        module.code(),
                        deadline.module_code
                    )));
                }
                if !descriptions.insert(deadline.description.to_ascii_lowercase()) {
                    return Err(ModelError::duplicate(
                        Entity::Deadline,
                        format!("{} ({})", deadline.description, module.code()),
                    ));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, semester {}",
            self.name, self.course, self.current_semester
        )?;
        if let Some(area) = &self.focus_area {
            write!(f, ", focus area: {area}")?;
        }
        write!(f, ")")
    }
}
