//! `new`: create the session's profile

use super::{CommandExecutor, CommandResult, NewProfile};
use crate::core::cap;
use crate::core::error::{Entity, ModelError, Result};
use crate::core::models::{check_semester, Profile};
use crate::core::profile_store::ProfileStore;
use crate::core::selection::{DisplayedView, ProfileView};

pub(super) fn run(
    exec: &CommandExecutor<'_>,
    store: &mut ProfileStore,
    data: NewProfile,
) -> Result<CommandResult> {
    if data.name.trim().is_empty() {
        return Err(ModelError::InvalidArgument("profile name is empty".to_string()));
    }
    check_semester(data.current_semester)?;
    let course = exec.catalogs().courses.get(&data.course)?;
    let focus_area = data
        .focus_area
        .as_deref()
        .map(|name| {
            course
                .focus_area(name)
                .map(|area| area.name.clone())
                .ok_or_else(|| ModelError::not_found(Entity::FocusArea, name.trim()))
        })
        .transpose()?;

    let profile = Profile::new(
        data.name.trim().to_string(),
        course.name.clone(),
        data.current_semester,
        focus_area,
    );
    let feedback = format!("New profile added: {profile}");
    store.add_profile(profile.clone())?;
    store.set_displayed_view(DisplayedView::Profile(ProfileView {
        cap: cap::profile_cap(&profile),
        profile,
    }));
    Ok(CommandResult::with_view(feedback))
}
