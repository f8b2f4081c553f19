//! Sorted view over the active profile's deadlines

use crate::core::models::{Deadline, ModuleCode, Profile};
use std::cmp::Ordering;

/// Total order used by the index
///
/// Dated deadlines come before undated ones; dated deadlines are ordered by date then time;
/// undated deadlines are ordered by module code. Remaining ties fall back to module code and
/// then description (ignoring case), so two distinct deadlines never compare equal.
#[must_use]
pub fn compare_deadlines(a: &Deadline, b: &Deadline) -> Ordering {
    let by_due = match (a.due, b.due) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_due
        .then_with(|| a.module_code.cmp(&b.module_code))
        .then_with(|| {
            a.description
                .to_ascii_lowercase()
                .cmp(&b.description.to_ascii_lowercase())
        })
}

/// Deadlines of the active profile, kept sorted by [`compare_deadlines`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeadlineIndex {
    entries: Vec<Deadline>,
}

impl DeadlineIndex {
    /// Create an empty index
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build an index from a profile's deadlines
    #[must_use]
    pub fn from_profile(profile: &Profile) -> Self {
        let mut index = Self::new();
        index.reload(profile);
        index
    }

    /// Insert a deadline at its sorted position
    pub fn add(&mut self, deadline: Deadline) {
        let pos = self
            .entries
            .partition_point(|existing| compare_deadlines(existing, &deadline) != Ordering::Greater);
        self.entries.insert(pos, deadline);
    }

    /// Remove every entry for this module whose description matches (any case)
    ///
    /// # Returns
    /// `true` if at least one entry was removed
    pub fn remove(&mut self, module_code: &ModuleCode, description: &str) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|d| !d.matches(module_code, description));
        self.entries.len() != before
    }

    /// Replace `old` with `new`; nothing is inserted when `old` has no match
    ///
    /// # Returns
    /// `true` if the replacement happened
    pub fn replace(&mut self, old: &Deadline, new: Deadline) -> bool {
        if self.remove(&old.module_code, &old.description) {
            self.add(new);
            true
        } else {
            false
        }
    }

    /// Drop every entry of a module
    ///
    /// # Returns
    /// Number of entries removed
    pub fn remove_module(&mut self, module_code: &ModuleCode) -> usize {
        let before = self.entries.len();
        self.entries.retain(|d| &d.module_code != module_code);
        before - self.entries.len()
    }

    /// Clear and repopulate from a profile's modules
    pub fn reload(&mut self, profile: &Profile) {
        self.entries = profile.deadlines();
        self.entries.sort_by(compare_deadlines);
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Sorted entries
    #[must_use]
    pub fn as_slice(&self) -> &[Deadline] {
        &self.entries
    }

    /// Iterate in sorted order
    pub fn iter(&self) -> std::slice::Iter<'_, Deadline> {
        self.entries.iter()
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries belonging to a module
    #[must_use]
    pub fn count_for(&self, module_code: &ModuleCode) -> usize {
        self.entries
            .iter()
            .filter(|d| &d.module_code == module_code)
            .count()
    }
}

impl<'a> IntoIterator for &'a DeadlineIndex {
    type Item = &'a Deadline;
    type IntoIter = std::slice::Iter<'a, Deadline>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
