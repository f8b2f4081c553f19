//! `edit profile` and `edit module`

use super::{CommandExecutor, CommandResult, EditModule};
use crate::core::cap;
use crate::core::error::{Entity, ModelError, Result};
use crate::core::models::check_semester;
use crate::core::profile_store::{ProfileEdit, ProfileStore};
use crate::core::selection::{DisplayedView, ProfileView};

/// Edit a profile's name, course, semester or focus area
///
/// Course and focus area are checked against the course catalog and stored with their
/// catalog spelling. Changing course while keeping a focus area the new course does not offer
/// is rejected.
pub(super) fn profile(
    exec: &CommandExecutor<'_>,
    store: &mut ProfileStore,
    target: Option<&str>,
    mut edit: ProfileEdit,
) -> Result<CommandResult> {
    if edit.is_empty() {
        return Err(ModelError::InvalidArgument(
            "at least one field to edit must be provided".to_string(),
        ));
    }
    let current = match target {
        Some(name) => store.profile_by_name(name)?,
        None => store.active_profile()?,
    };
    let target_name = current.name.clone();

    let course_name = edit.course.as_deref().unwrap_or(&current.course);
    let course = exec.catalogs().courses.get(course_name)?;
    if edit.course.is_some() {
        edit.course = Some(course.name.clone());
    }

    if let Some(wanted) = edit.focus_area.take() {
        let area = course.focus_area(&wanted).ok_or_else(|| {
            ModelError::not_found(
                Entity::FocusArea,
                format!("{} in {}", wanted.trim(), course.name),
            )
        })?;
        edit.focus_area = Some(area.name.clone());
    } else if let Some(existing) = &current.focus_area {
        if course.focus_area(existing).is_none() {
            return Err(ModelError::InvalidArgument(format!(
                "focus area {existing} is not offered by {}; give a new focus area",
                course.name
            )));
        }
    }

    let edited = store.edit_profile(&target_name, &edit)?.clone();
    let feedback = format!("Edited profile: {edited}");
    store.set_displayed_view(DisplayedView::Profile(ProfileView {
        cap: cap::profile_cap(&edited),
        profile: edited,
    }));
    Ok(CommandResult::with_view(feedback))
}

/// Move a module, set its grade, or change one of its tasks
///
/// Every check runs before the first change so a failing edit leaves the profile untouched.
pub(super) fn module(
    _exec: &CommandExecutor<'_>,
    store: &mut ProfileStore,
    data: &EditModule,
) -> Result<CommandResult> {
    let task_changes = data
        .task
        .as_ref()
        .is_some_and(|task| task.new_description.is_some() || task.new_due.is_some());
    if data.semester.is_none() && data.grade.is_none() && !task_changes {
        return Err(ModelError::InvalidArgument(
            "at least one field to edit must be provided".to_string(),
        ));
    }

    let code = &data.code;
    let profile = store.active_profile()?;
    let enrolled = profile.module(code).ok_or_else(|| {
        ModelError::PreconditionFailed(format!("{code} has not been added to your profile"))
    })?;
    if let Some(semester) = data.semester {
        check_semester(semester)?;
    }
    if let Some(task) = &data.task {
        if !enrolled.has_deadline(&task.description) {
            return Err(ModelError::not_found(
                Entity::Deadline,
                format!("{} ({code})", task.description.trim()),
            ));
        }
        if let Some(renamed) = &task.new_description {
            if !renamed.eq_ignore_ascii_case(&task.description) && enrolled.has_deadline(renamed)
            {
                return Err(ModelError::duplicate(
                    Entity::Deadline,
                    format!("{} ({code})", renamed.trim()),
                ));
            }
        }
    }

    let mut lines = Vec::new();
    if let Some(task) = data.task.as_ref().filter(|_| task_changes) {
        let updated = store.edit_deadline(
            code,
            &task.description,
            task.new_description.as_deref(),
            task.new_due,
        )?;
        lines.push(format!("Edited task: {updated}"));
    }
    if let Some(grade) = data.grade {
        store.set_grade(code, grade)?;
        lines.push(format!("Grade of {code} set to {grade}"));
    }
    if let Some(semester) = data.semester {
        let from = store.move_module(code, semester)?;
        lines.push(format!("Moved {code} from semester {from} to semester {semester}"));
    }
    Ok(CommandResult::message(lines.join("\n")))
}
