//! `delete`: profile, modules, grade or tasks

use super::{join_codes, CommandExecutor, CommandResult, DeleteTarget};
use crate::core::error::Result;
use crate::core::profile_store::ProfileStore;
use crate::info;

pub(super) fn run(
    exec: &CommandExecutor<'_>,
    store: &mut ProfileStore,
    target: DeleteTarget,
) -> Result<CommandResult> {
    match target {
        DeleteTarget::Profile(name) => {
            let removed = store.delete_profile(&name)?;
            Ok(CommandResult::message(format!("Deleted profile: {}", removed.name)))
        }
        DeleteTarget::Modules(codes) => {
            let outcome = store.remove_modules(&codes, &exec.catalogs().modules)?;
            if outcome.deadlines_removed > 0 {
                info!(
                    exec.logger,
                    "Removed {} deadline(s) with modules {}",
                    outcome.deadlines_removed,
                    join_codes(&outcome.removed)
                );
            }
            let mut lines = vec![format!("Removed: {}", join_codes(&outcome.removed))];
            if !outcome.invalid.is_empty() {
                lines.push(format!(
                    "Not found in the module catalog: {}",
                    join_codes(&outcome.invalid)
                ));
            }
            if !outcome.not_enrolled.is_empty() {
                lines.push(format!(
                    "Not in your profile: {}",
                    join_codes(&outcome.not_enrolled)
                ));
            }
            Ok(CommandResult::message(lines.join("\n")))
        }
        DeleteTarget::Grade(code) => {
            let feedback = match store.clear_grade(&code)? {
                Some(old) => format!("Removed grade {old} from {code}"),
                None => format!("{code} has no grade to remove"),
            };
            Ok(CommandResult::message(feedback))
        }
        DeleteTarget::Tasks { code, descriptions } => {
            let outcome = store.remove_deadlines(&code, &descriptions)?;
            let mut lines = vec![format!(
                "Deleted task(s) from {code}: {}",
                outcome.applied.join(", ")
            )];
            if !outcome.rejected.is_empty() {
                lines.push(format!(
                    "Task(s) not found in {code}: {}",
                    outcome.rejected.join(", ")
                ));
            }
            Ok(CommandResult::message(lines.join("\n")))
        }
    }
}
