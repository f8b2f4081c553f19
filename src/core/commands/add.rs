//! `add`: enroll modules, or attach a grade and tasks to them
//!
//! Without a payload every code is enrolled in the given semester. With a grade or tasks,
//! modules already taken are updated in place and the rest are enrolled first (which then
//! needs a semester).

use super::{join_codes, AddModules, CommandExecutor, CommandResult};
use crate::core::error::{ModelError, Result};
use crate::core::models::{Deadline, ModuleCode};
use crate::core::profile_store::{EnrollOutcome, ProfileStore};
use crate::warn;
use std::collections::HashSet;

pub(super) fn run(
    exec: &CommandExecutor<'_>,
    store: &mut ProfileStore,
    data: &AddModules,
) -> Result<CommandResult> {
    if data.codes.is_empty() {
        return Err(ModelError::InvalidArgument("no module codes given".to_string()));
    }
    let profile = store.active_profile()?;

    if !data.has_payload() {
        let semester = data.semester.ok_or_else(|| {
            ModelError::InvalidArgument("a semester is needed to add modules".to_string())
        })?;
        let outcome =
            store.add_modules_to_semester(semester, &data.codes, &exec.catalogs().modules)?;
        let mut lines = Vec::new();
        describe_enrollment(exec, semester, &outcome, &mut lines);
        return Ok(CommandResult::message(lines.join("\n")));
    }

    let (enrolled, fresh): (Vec<ModuleCode>, Vec<ModuleCode>) = data
        .codes
        .iter()
        .cloned()
        .partition(|code| profile.is_enrolled(code));

    if !fresh.is_empty() && data.semester.is_none() {
        return Err(ModelError::PreconditionFailed(format!(
            "Module not added: {}. Give a semester to add it first.",
            join_codes(&fresh)
        )));
    }

    if !data.tasks.is_empty() {
        let current = profile.current_semester;
        let elsewhere: Vec<ModuleCode> = data
            .codes
            .iter()
            .filter(|code| profile.semester_of(code).or(data.semester) != Some(current))
            .cloned()
            .collect();
        if !elsewhere.is_empty() {
            return Err(ModelError::PreconditionFailed(format!(
                "Tasks can only be added to modules of the current semester ({current}): {}",
                join_codes(&elsewhere)
            )));
        }
    }

    let mut lines = Vec::new();
    let mut seen = HashSet::new();
    let mut targets: Vec<ModuleCode> = enrolled
        .into_iter()
        .filter(|code| seen.insert(code.clone()))
        .collect();
    if let Some(semester) = data.semester.filter(|_| !fresh.is_empty()) {
        let outcome = store.add_modules_to_semester(semester, &fresh, &exec.catalogs().modules)?;
        describe_enrollment(exec, semester, &outcome, &mut lines);
        targets.extend(outcome.added);
    }

    for code in &targets {
        if let Some(grade) = data.grade {
            store.set_grade(code, grade)?;
            lines.push(format!("Grade of {code} set to {grade}"));
        }
        if !data.tasks.is_empty() {
            let deadlines = data
                .tasks
                .iter()
                .map(|task| Deadline {
                    module_code: code.clone(),
                    description: task.description.trim().to_string(),
                    due: task.due,
                })
                .collect();
            let outcome = store.add_deadlines(code, deadlines)?;
            if !outcome.applied.is_empty() {
                lines.push(format!(
                    "Added task(s) to {code}: {}",
                    outcome.applied.join(", ")
                ));
            }
            if !outcome.rejected.is_empty() {
                lines.push(format!(
                    "Failed to add task(s) to {code}, already present: {}",
                    outcome.rejected.join(", ")
                ));
            }
        }
    }
    Ok(CommandResult::message(lines.join("\n")))
}

fn describe_enrollment(
    exec: &CommandExecutor<'_>,
    semester: u32,
    outcome: &EnrollOutcome,
    lines: &mut Vec<String>,
) {
    lines.push(format!(
        "Added to semester {semester}: {}",
        join_codes(&outcome.added)
    ));
    if !outcome.invalid.is_empty() {
        warn!(exec.logger, "Unknown module codes: {}", join_codes(&outcome.invalid));
        lines.push(format!(
            "Not found in the module catalog: {}",
            join_codes(&outcome.invalid)
        ));
    }
    if !outcome.duplicates.is_empty() {
        lines.push(format!(
            "Already added to your profile: {}",
            join_codes(&outcome.duplicates)
        ));
    }
}
