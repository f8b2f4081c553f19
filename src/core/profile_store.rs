//! Profile store: owns the session's profiles, the deadline index and the selection

use crate::core::cap;
use crate::core::catalog::ModuleCatalog;
use crate::core::deadline_index::DeadlineIndex;
use crate::core::error::{Entity, ModelError, Result};
use crate::core::models::{
    check_semester, Deadline, EnrolledModule, Grade, ModuleCode, Profile,
};
use crate::core::selection::{DisplayedView, Selection};
use chrono::NaiveDateTime;
use std::collections::HashSet;

/// Field-level profile update; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileEdit {
    /// New display name
    pub name: Option<String>,
    /// New course name
    pub course: Option<String>,
    /// New current semester
    pub current_semester: Option<u32>,
    /// New focus area
    pub focus_area: Option<String>,
}

impl ProfileEdit {
    /// Returns true if no field is set
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.course.is_none()
            && self.current_semester.is_none()
            && self.focus_area.is_none()
    }
}

/// Result of a batch enrollment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrollOutcome {
    /// Codes enrolled by this call
    pub added: Vec<ModuleCode>,
    /// Codes not found in the module catalog
    pub invalid: Vec<ModuleCode>,
    /// Codes already enrolled (or repeated within the batch)
    pub duplicates: Vec<ModuleCode>,
}

/// Result of a batch removal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoveOutcome {
    /// Codes removed by this call
    pub removed: Vec<ModuleCode>,
    /// Codes not found in the module catalog
    pub invalid: Vec<ModuleCode>,
    /// Catalog codes that are not enrolled
    pub not_enrolled: Vec<ModuleCode>,
    /// Deadlines dropped from the index along with the removed modules
    pub deadlines_removed: usize,
}

/// Result of attaching or deleting tasks on one module
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskOutcome {
    /// Descriptions added or removed
    pub applied: Vec<String>,
    /// Descriptions rejected (duplicates when adding, missing when deleting)
    pub rejected: Vec<String>,
}

/// In-memory model of one session
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    profiles: Vec<Profile>,
    name_filter: Option<String>,
    deadlines: DeadlineIndex,
    selection: Selection,
}

fn push_unique(codes: &mut Vec<ModuleCode>, code: &ModuleCode) {
    if !codes.contains(code) {
        codes.push(code.clone());
    }
}

fn not_taking(code: &ModuleCode) -> ModelError {
    ModelError::PreconditionFailed(format!("{code} has not been added to your profile"))
}

impl ProfileStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from loaded profiles and rebuild the deadline index
    ///
    /// # Errors
    /// - `DuplicateEntity` listing every name that appears more than once (any case)
    /// - any error of [`Profile::validate`] for a profile that breaks the model's rules
    pub fn from_profiles(profiles: Vec<Profile>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for profile in &profiles {
            if !seen.insert(profile.name.to_lowercase()) {
                duplicates.push(profile.name.clone());
            }
        }
        if !duplicates.is_empty() {
            return Err(ModelError::DuplicateEntity {
                entity: Entity::Profile,
                keys: duplicates,
            });
        }
        for profile in &profiles {
            profile.validate()?;
        }

        let mut store = Self {
            profiles,
            ..Self::default()
        };
        store.reload_deadlines();
        Ok(store)
    }

    // ================ Profile methods ==============================

    /// Every profile in the store
    #[must_use]
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    /// Profiles matching the current name filter (all profiles when no filter is set)
    #[must_use]
    pub fn filtered_profiles(&self) -> Vec<&Profile> {
        match &self.name_filter {
            Some(needle) => {
                let needle = needle.to_lowercase();
                self.profiles
                    .iter()
                    .filter(|p| p.name.to_lowercase().contains(&needle))
                    .collect()
            }
            None => self.profiles.iter().collect(),
        }
    }

    /// Narrow the filtered view to names containing `needle` (case-insensitive); `None` resets
    pub fn set_name_filter(&mut self, needle: Option<String>) {
        self.name_filter = needle.filter(|n| !n.trim().is_empty());
    }

    /// Returns true if a profile with this name exists (any case)
    #[must_use]
    pub fn has_profile(&self, name: &str) -> bool {
        self.profiles.iter().any(|p| p.is_named(name))
    }

    /// Profile by name (any case)
    ///
    /// # Errors
    /// Returns `NotFound` if no profile has this name.
    pub fn profile_by_name(&self, name: &str) -> Result<&Profile> {
        self.profiles
            .iter()
            .find(|p| p.is_named(name))
            .ok_or_else(|| ModelError::not_found(Entity::Profile, name.trim()))
    }

    /// The session's profile
    ///
    /// # Errors
    /// Returns `PreconditionFailed` if no profile exists.
    pub fn active_profile(&self) -> Result<&Profile> {
        self.profiles.first().ok_or_else(ModelError::no_profile)
    }

    fn active_in(profiles: &mut [Profile]) -> Result<&mut Profile> {
        profiles.first_mut().ok_or_else(ModelError::no_profile)
    }

    /// Add the session's profile
    ///
    /// # Errors
    /// Returns `DuplicateEntity` if a profile with the same name exists, or if any profile
    /// exists at all (one profile per session).
    pub fn add_profile(&mut self, profile: Profile) -> Result<()> {
        if let Some(existing) = self
            .profiles
            .iter()
            .find(|p| p.is_named(&profile.name))
            .or_else(|| self.profiles.first())
        {
            return Err(ModelError::duplicate(Entity::Profile, existing.name.clone()));
        }
        self.deadlines.reload(&profile);
        self.profiles.push(profile);
        Ok(())
    }

    /// Delete the named profile; cascades to the deadline index and selection
    ///
    /// # Errors
    /// Returns `NotFound` if no profile has this name.
    pub fn delete_profile(&mut self, name: &str) -> Result<Profile> {
        let idx = self
            .profiles
            .iter()
            .position(|p| p.is_named(name))
            .ok_or_else(|| ModelError::not_found(Entity::Profile, name.trim()))?;
        let removed = self.profiles.remove(idx);
        self.clear();
        Ok(removed)
    }

    /// Remove every profile, deadline and the selection
    pub fn clear(&mut self) {
        self.profiles.clear();
        self.deadlines.clear();
        self.selection.clear();
    }

    /// Apply a field-level edit to the named profile
    ///
    /// # Errors
    /// - `NotFound` if the target does not exist
    /// - `DuplicateEntity` if the new name belongs to another profile
    /// - `InvalidArgument` if the new semester is out of range
    pub fn edit_profile(&mut self, target: &str, edit: &ProfileEdit) -> Result<&Profile> {
        let idx = self
            .profiles
            .iter()
            .position(|p| p.is_named(target))
            .ok_or_else(|| ModelError::not_found(Entity::Profile, target.trim()))?;

        if let Some(new_name) = &edit.name {
            let clash = self
                .profiles
                .iter()
                .enumerate()
                .any(|(other, p)| other != idx && p.is_named(new_name));
            if clash {
                return Err(ModelError::duplicate(Entity::Profile, new_name.trim()));
            }
        }
        if let Some(semester) = edit.current_semester {
            check_semester(semester)?;
        }

        let profile = &mut self.profiles[idx];
        if let Some(name) = &edit.name {
            profile.name = name.trim().to_string();
        }
        if let Some(course) = &edit.course {
            profile.course = course.trim().to_string();
        }
        if let Some(semester) = edit.current_semester {
            profile.current_semester = semester;
        }
        if let Some(area) = &edit.focus_area {
            profile.focus_area = Some(area.trim().to_string());
        }
        Ok(&self.profiles[idx])
    }

    // ================ Module methods ==============================

    /// Enroll a batch of modules in one semester
    ///
    /// Codes missing from the catalog are reported as invalid and are not checked for
    /// duplication. Codes already enrolled in any semester, or repeated in the batch, are
    /// reported as duplicates. Every remaining code is enrolled.
    ///
    /// # Errors
    /// - `InvalidArgument` for an empty batch or an out-of-range semester
    /// - `PreconditionFailed` if no profile exists
    /// - `NotFound` (listing invalid codes) or `DuplicateEntity` (listing duplicates) when no
    ///   code can be enrolled; nothing is changed in that case
    pub fn add_modules_to_semester(
        &mut self,
        semester: u32,
        codes: &[ModuleCode],
        catalog: &ModuleCatalog,
    ) -> Result<EnrollOutcome> {
        if codes.is_empty() {
            return Err(ModelError::InvalidArgument("no module codes given".to_string()));
        }
        check_semester(semester)?;
        let profile = Self::active_in(&mut self.profiles)?;

        let mut outcome = EnrollOutcome::default();
        for code in codes {
            if !catalog.exists(code) {
                push_unique(&mut outcome.invalid, code);
            } else if profile.is_enrolled(code) || outcome.added.contains(code) {
                push_unique(&mut outcome.duplicates, code);
            } else {
                outcome.added.push(code.clone());
            }
        }

        if outcome.added.is_empty() {
            return Err(if outcome.invalid.is_empty() {
                ModelError::DuplicateEntity {
                    entity: Entity::EnrolledModule,
                    keys: outcome.duplicates.iter().map(ToString::to_string).collect(),
                }
            } else {
                ModelError::NotFound {
                    entity: Entity::Module,
                    keys: outcome.invalid.iter().map(ToString::to_string).collect(),
                }
            });
        }

        let batch = outcome
            .added
            .iter()
            .map(|code| catalog.get(code).map(|info| EnrolledModule::new(info.clone())))
            .collect::<Result<Vec<_>>>()?;
        for module in batch {
            profile.enroll(semester, module)?;
        }
        Ok(outcome)
    }

    /// Remove a batch of modules; their deadlines leave the index too
    ///
    /// Enrolled codes are removed even if the catalog no longer lists them. Codes that are
    /// not enrolled are reported as invalid when the catalog does not know them, otherwise
    /// as not enrolled.
    ///
    /// # Errors
    /// - `InvalidArgument` for an empty batch
    /// - `PreconditionFailed` if no profile exists
    /// - `NotFound` when nothing can be removed (invalid codes take precedence)
    pub fn remove_modules(
        &mut self,
        codes: &[ModuleCode],
        catalog: &ModuleCatalog,
    ) -> Result<RemoveOutcome> {
        if codes.is_empty() {
            return Err(ModelError::InvalidArgument("no module codes given".to_string()));
        }
        let profile = Self::active_in(&mut self.profiles)?;

        let mut outcome = RemoveOutcome::default();
        for code in codes {
            if profile.is_enrolled(code) {
                push_unique(&mut outcome.removed, code);
            } else if !catalog.exists(code) {
                push_unique(&mut outcome.invalid, code);
            } else {
                push_unique(&mut outcome.not_enrolled, code);
            }
        }

        if outcome.removed.is_empty() {
            let (entity, keys) = if outcome.invalid.is_empty() {
                (Entity::EnrolledModule, &outcome.not_enrolled)
            } else {
                (Entity::Module, &outcome.invalid)
            };
            return Err(ModelError::NotFound {
                entity,
                keys: keys.iter().map(ToString::to_string).collect(),
            });
        }

        for code in &outcome.removed {
            profile.unenroll(code);
            outcome.deadlines_removed += self.deadlines.remove_module(code);
        }
        Ok(outcome)
    }

    /// Move an enrolled module to another semester
    ///
    /// # Errors
    /// `InvalidArgument` for an out-of-range semester, `PreconditionFailed` if no profile
    /// exists or the module is not enrolled.
    pub fn move_module(&mut self, code: &ModuleCode, semester: u32) -> Result<u32> {
        check_semester(semester)?;
        let profile = Self::active_in(&mut self.profiles)?;
        let from = profile.semester_of(code).ok_or_else(|| not_taking(code))?;
        if from != semester {
            let module = profile.unenroll(code).ok_or_else(|| not_taking(code))?;
            profile.enroll(semester, module)?;
        }
        Ok(from)
    }

    /// Set the grade of an enrolled module (any semester)
    ///
    /// # Errors
    /// `PreconditionFailed` if no profile exists or the module is not enrolled.
    pub fn set_grade(&mut self, code: &ModuleCode, grade: Grade) -> Result<Option<Grade>> {
        let profile = Self::active_in(&mut self.profiles)?;
        let module = profile.module_mut(code).ok_or_else(|| not_taking(code))?;
        Ok(module.grade.replace(grade))
    }

    /// Clear the grade of an enrolled module
    ///
    /// # Errors
    /// `PreconditionFailed` if no profile exists or the module is not enrolled.
    pub fn clear_grade(&mut self, code: &ModuleCode) -> Result<Option<Grade>> {
        let profile = Self::active_in(&mut self.profiles)?;
        let module = profile.module_mut(code).ok_or_else(|| not_taking(code))?;
        Ok(module.grade.take())
    }

    // ================ Deadline methods ==============================

    /// Attach tasks to an enrolled module of the current semester
    ///
    /// Tasks whose description already exists on the module (any case) are rejected and
    /// listed in the outcome; the others are added to the module and the index.
    ///
    /// # Errors
    /// `PreconditionFailed` if no profile exists, the module is not enrolled, or it is not
    /// taken in the current semester.
    pub fn add_deadlines(
        &mut self,
        code: &ModuleCode,
        deadlines: Vec<Deadline>,
    ) -> Result<TaskOutcome> {
        let profile = Self::active_in(&mut self.profiles)?;
        let semester = profile.semester_of(code).ok_or_else(|| not_taking(code))?;
        if semester != profile.current_semester {
            return Err(ModelError::PreconditionFailed(format!(
                "Tasks can only be added to modules of the current semester ({}); {code} is in semester {semester}",
                profile.current_semester
            )));
        }
        let module = profile.module_mut(code).ok_or_else(|| not_taking(code))?;

        let mut outcome = TaskOutcome::default();
        for mut deadline in deadlines {
            deadline.module_code = code.clone();
            let description = deadline.description.clone();
            if module.add_deadline(deadline.clone()) {
                self.deadlines.add(deadline);
                outcome.applied.push(description);
            } else {
                outcome.rejected.push(description);
            }
        }
        Ok(outcome)
    }

    /// Delete tasks from an enrolled module by description (any case)
    ///
    /// # Errors
    /// - `PreconditionFailed` if no profile exists or the module is not enrolled
    /// - `NotFound` listing the descriptions when none of them exists
    pub fn remove_deadlines(
        &mut self,
        code: &ModuleCode,
        descriptions: &[String],
    ) -> Result<TaskOutcome> {
        let profile = Self::active_in(&mut self.profiles)?;
        let module = profile.module_mut(code).ok_or_else(|| not_taking(code))?;

        let mut outcome = TaskOutcome::default();
        for description in descriptions {
            if module.has_deadline(description) {
                outcome.applied.push(description.clone());
            } else {
                outcome.rejected.push(description.clone());
            }
        }
        if outcome.applied.is_empty() {
            return Err(ModelError::NotFound {
                entity: Entity::Deadline,
                keys: outcome.rejected,
            });
        }

        for description in &outcome.applied {
            module.remove_deadline(description);
            self.deadlines.remove(code, description);
        }
        Ok(outcome)
    }

    /// Rename a task and/or change its due date-time
    ///
    /// `new_due` of `Some(None)` makes the task undated.
    ///
    /// # Errors
    /// - `PreconditionFailed` if no profile exists or the module is not enrolled
    /// - `NotFound` if the task does not exist
    /// - `DuplicateEntity` if the new description belongs to another task of the module
    pub fn edit_deadline(
        &mut self,
        code: &ModuleCode,
        description: &str,
        new_description: Option<&str>,
        new_due: Option<Option<NaiveDateTime>>,
    ) -> Result<Deadline> {
        let profile = Self::active_in(&mut self.profiles)?;
        let module = profile.module_mut(code).ok_or_else(|| not_taking(code))?;

        if let Some(new_description) = new_description {
            if !new_description.eq_ignore_ascii_case(description)
                && module.has_deadline(new_description)
            {
                return Err(ModelError::duplicate(Entity::Deadline, new_description));
            }
        }

        let deadline = module
            .deadline_mut(description)
            .ok_or_else(|| ModelError::not_found(Entity::Deadline, description))?;
        let old = deadline.clone();
        if let Some(new_description) = new_description {
            deadline.description = new_description.trim().to_string();
        }
        if let Some(due) = new_due {
            deadline.due = due;
        }
        let updated = deadline.clone();

        self.deadlines.replace(&old, updated.clone());
        Ok(updated)
    }

    /// Sorted deadlines of the active profile
    #[must_use]
    pub const fn deadlines(&self) -> &DeadlineIndex {
        &self.deadlines
    }

    /// Rebuild the deadline index from the active profile
    pub fn reload_deadlines(&mut self) {
        match self.profiles.first() {
            Some(profile) => self.deadlines.reload(profile),
            None => self.deadlines.clear(),
        }
    }

    // ================ Selection and CAP ==============================

    /// Current selection
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Replace the displayed view
    pub fn set_displayed_view(&mut self, view: DisplayedView) {
        self.selection.set(view);
    }

    /// CAP of the active profile (`Ok(None)` if nothing CAP-counted is graded)
    ///
    /// # Errors
    /// `PreconditionFailed` if no profile exists.
    pub fn cap(&self) -> Result<Option<f64>> {
        self.active_profile().map(cap::profile_cap)
    }
}
