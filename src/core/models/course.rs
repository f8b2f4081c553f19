//! Course and focus area models

use serde::{Deserialize, Serialize};

/// A named specialisation track within a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseFocusArea {
    /// Focus area name (e.g., "Computer Security")
    pub name: String,

    /// Primary modules - stored as module codes (e.g., "CS2107")
    #[serde(default)]
    pub primaries: Vec<String>,

    /// Elective modules - stored as module codes
    #[serde(default)]
    pub electives: Vec<String>,
}

impl CourseFocusArea {
    /// Create a focus area with no modules
    #[must_use]
    pub const fn new(name: String) -> Self {
        Self {
            name,
            primaries: Vec::new(),
            electives: Vec::new(),
        }
    }

    /// All module codes referenced by this focus area, primaries first
    pub fn module_codes(&self) -> impl Iterator<Item = &str> {
        self.primaries
            .iter()
            .chain(self.electives.iter())
            .map(String::as_str)
    }
}

/// A degree course with its graduation requirements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course name (e.g., "Computer Science")
    pub name: String,

    /// Human-readable requirement lines
    #[serde(default)]
    pub requirements: Vec<String>,

    /// Focus areas offered by the course
    #[serde(default)]
    pub focus_areas: Vec<CourseFocusArea>,
}

impl Course {
    /// Create a course with no requirements or focus areas
    #[must_use]
    pub const fn new(name: String) -> Self {
        Self {
            name,
            requirements: Vec::new(),
            focus_areas: Vec::new(),
        }
    }

    /// Case-insensitive name comparison
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }

    /// Look up a focus area by name (case-insensitive)
    #[must_use]
    pub fn focus_area(&self, name: &str) -> Option<&CourseFocusArea> {
        let name = name.trim();
        self.focus_areas
            .iter()
            .find(|area| area.name.eq_ignore_ascii_case(name))
    }

    /// Add a focus area
    pub fn add_focus_area(&mut self, area: CourseFocusArea) {
        self.focus_areas.push(area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn computing() -> Course {
        let mut course = Course::new("Computer Science".to_string());
        let mut security = CourseFocusArea::new("Computer Security".to_string());
        security.primaries.push("CS2107".to_string());
        security.electives.push("CS4238".to_string());
        course.add_focus_area(security);
        course
    }

    #[test]
    fn test_course_name_lookup_ignores_case() {
        let course = computing();
        assert!(course.is_named("computer science"));
        assert!(course.is_named("COMPUTER SCIENCE "));
        assert!(!course.is_named("Information Systems"));
    }

    #[test]
    fn test_focus_area_lookup() {
        let course = computing();
        let area = course.focus_area("computer security").unwrap();
        assert_eq!(area.name, "Computer Security");
        assert_eq!(area.module_codes().collect::<Vec<_>>(), vec!["CS2107", "CS4238"]);
        assert!(course.focus_area("Artificial Intelligence").is_none());
    }
}
