//! Cumulative Average Point (CAP) calculation
//!
//! CAP = sum(grade point x modular credits) / sum(modular credits), taken over every module
//! with a grade that counts towards CAP. Ungraded modules and S/U/CS/CU grades are left out
//! of both sums.

use crate::core::models::{EnrolledModule, Profile};
use std::collections::BTreeMap;

/// Compute CAP over a semester-to-modules mapping
///
/// # Returns
/// `None` when no module carries a CAP-counted grade (the credit total would be zero).
#[must_use]
pub fn compute_cap(semesters: &BTreeMap<u32, Vec<EnrolledModule>>) -> Option<f64> {
    cap_of(semesters.values().flatten())
}

/// CAP of every module in a profile
#[must_use]
pub fn profile_cap(profile: &Profile) -> Option<f64> {
    compute_cap(profile.semesters())
}

fn cap_of<'a>(modules: impl Iterator<Item = &'a EnrolledModule>) -> Option<f64> {
    let (weighted, credits) = modules
        .filter_map(|module| {
            let point = module.grade?.grade_point()?;
            let credits = f64::from(module.info.credits);
            Some((point * credits, credits))
        })
        .fold((0.0, 0.0), |(w_sum, c_sum), (w, c)| (w_sum + w, c_sum + c));

    if credits > 0.0 {
        Some(weighted / credits)
    } else {
        None
    }
}

/// Format a CAP for display, two decimal places
#[must_use]
pub fn format_cap(cap: Option<f64>) -> String {
    cap.map_or_else(|| "N/A (no graded modules)".to_string(), |c| format!("{c:.2}"))
}
