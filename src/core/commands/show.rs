//! `show`: put a profile, semester, module, course or focus area on display

use super::{CommandExecutor, CommandResult, ShowTarget};
use crate::core::cap;
use crate::core::error::{Entity, ModelError, Result};
use crate::core::models::{check_semester, ModuleCode};
use crate::core::profile_store::ProfileStore;
use crate::core::selection::{
    DisplayedView, FocusAreaView, ModuleListView, ModuleView, ProfileView,
};

pub(super) fn run(
    exec: &CommandExecutor<'_>,
    store: &mut ProfileStore,
    target: ShowTarget,
) -> Result<CommandResult> {
    let (view, feedback) = match target {
        ShowTarget::Profile(name) => {
            let profile = match name {
                Some(name) => store.profile_by_name(&name)?,
                None => store.active_profile()?,
            };
            let feedback = format!("Showing profile: {}", profile.name);
            let view = DisplayedView::Profile(ProfileView {
                cap: cap::profile_cap(profile),
                profile: profile.clone(),
            });
            (view, feedback)
        }
        ShowTarget::Semester(semester) => {
            check_semester(semester)?;
            let modules = store.active_profile()?.modules_in(semester);
            if modules.is_empty() {
                return Err(ModelError::not_found(Entity::Semester, semester.to_string()));
            }
            let feedback = format!("Showing {} module(s) of semester {semester}", modules.len());
            let view = DisplayedView::ModuleList(ModuleListView {
                semester,
                modules: modules.to_vec(),
            });
            (view, feedback)
        }
        ShowTarget::Module(code) => {
            let info = exec.catalogs().modules.get(&code)?.clone();
            let profile = store.active_profile().ok();
            let enrollment =
                profile.and_then(|p| p.semester_of(&code).zip(p.module(&code).cloned()));
            let prerequisites_met = profile.map(|p| {
                info.prerequisites.is_satisfied_by(&|raw: &str| {
                    ModuleCode::parse(raw).is_ok_and(|taken| p.is_enrolled(&taken))
                })
            });
            let feedback = format!("Showing module: {} {}", info.code, info.title);
            let view = DisplayedView::Module(ModuleView {
                info,
                enrollment,
                prerequisites_met,
            });
            (view, feedback)
        }
        ShowTarget::Course(name) => {
            let name = match name {
                Some(name) => name,
                None => store.active_profile()?.course.clone(),
            };
            let course = exec.catalogs().courses.get(&name)?.clone();
            let feedback = format!("Showing course: {}", course.name);
            (DisplayedView::Course(course), feedback)
        }
        ShowTarget::FocusArea(name) => {
            let active = store.active_profile().ok();
            let name = match name {
                Some(name) => name,
                None => active
                    .ok_or_else(ModelError::no_profile)?
                    .focus_area
                    .clone()
                    .ok_or_else(|| {
                        ModelError::PreconditionFailed(
                            "Your profile has no focus area. Name one to show it.".to_string(),
                        )
                    })?,
            };
            let (course, area) = exec
                .catalogs()
                .courses
                .find_focus_area(&name, active.map(|p| p.course.as_str()))?;
            let modules = area
                .module_codes()
                .filter_map(|raw| exec.catalogs().modules.find(raw).cloned())
                .collect();
            let feedback = format!("Showing focus area: {} ({})", area.name, course.name);
            let view = DisplayedView::FocusArea(FocusAreaView {
                course: course.name.clone(),
                area: area.clone(),
                modules,
            });
            (view, feedback)
        }
    };
    store.set_displayed_view(view);
    Ok(CommandResult::with_view(feedback))
}
