//! Read-only module and course catalogs
//!
//! Catalogs are loaded once at startup (from the bundled JSON or from files named in the
//! config) and never mutated afterwards. Everything else borrows them.

use crate::core::error::{Entity, ModelError, Result};
use crate::core::models::{Course, CourseFocusArea, ModuleCode, ModuleInfo};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const BUNDLED_MODULES: &str = include_str!("../assets/modules.json");
const BUNDLED_COURSES: &str = include_str!("../assets/courses.json");

/// Module reference data keyed by code
#[derive(Debug, Clone, Default)]
pub struct ModuleCatalog {
    modules: HashMap<ModuleCode, ModuleInfo>,
}

impl ModuleCatalog {
    /// Build a catalog from module records; later records win on duplicate codes
    #[must_use]
    pub fn new(modules: Vec<ModuleInfo>) -> Self {
        Self {
            modules: modules
                .into_iter()
                .map(|info| (info.code.clone(), info))
                .collect(),
        }
    }

    /// Parse a JSON array of module records
    ///
    /// # Errors
    /// Returns `Format` if the JSON does not match the module schema.
    pub fn from_json(json: &str) -> Result<Self> {
        let modules: Vec<ModuleInfo> = serde_json::from_str(json)?;
        Ok(Self::new(modules))
    }

    /// Load a catalog file
    ///
    /// # Errors
    /// Returns `Io` if the file cannot be read, `Format` if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Catalog compiled into the binary
    ///
    /// # Errors
    /// Returns `Format` if the bundled data is malformed.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_MODULES)
    }

    /// Returns true if the code is in the catalog
    #[must_use]
    pub fn exists(&self, code: &ModuleCode) -> bool {
        self.modules.contains_key(code)
    }

    /// Static data for a module
    ///
    /// # Errors
    /// Returns `NotFound` if the code is not in the catalog.
    pub fn get(&self, code: &ModuleCode) -> Result<&ModuleInfo> {
        self.modules
            .get(code)
            .ok_or_else(|| ModelError::not_found(Entity::Module, code.to_string()))
    }

    /// Look up a code given as plain text (as stored in course data)
    #[must_use]
    pub fn find(&self, raw_code: &str) -> Option<&ModuleInfo> {
        ModuleCode::parse(raw_code)
            .ok()
            .and_then(|code| self.modules.get(&code))
    }

    /// Number of modules
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns true if the catalog has no modules
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

/// Course reference data
#[derive(Debug, Clone, Default)]
pub struct CourseCatalog {
    courses: Vec<Course>,
}

impl CourseCatalog {
    /// Build a catalog from course records
    #[must_use]
    pub const fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    /// Parse a JSON array of course records
    ///
    /// # Errors
    /// Returns `Format` if the JSON does not match the course schema.
    pub fn from_json(json: &str) -> Result<Self> {
        let courses: Vec<Course> = serde_json::from_str(json)?;
        Ok(Self::new(courses))
    }

    /// Load a catalog file
    ///
    /// # Errors
    /// Returns `Io` if the file cannot be read, `Format` if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Catalog compiled into the binary
    ///
    /// # Errors
    /// Returns `Format` if the bundled data is malformed.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_COURSES)
    }

    /// Course by name (case-insensitive)
    ///
    /// # Errors
    /// Returns `NotFound` if no course has that name.
    pub fn get(&self, name: &str) -> Result<&Course> {
        self.courses
            .iter()
            .find(|course| course.is_named(name))
            .ok_or_else(|| ModelError::not_found(Entity::Course, name.trim()))
    }

    /// Find a focus area by name, searching `preferred_course` first and then every course
    ///
    /// # Errors
    /// Returns `NotFound` if no course offers a focus area with that name.
    pub fn find_focus_area(
        &self,
        name: &str,
        preferred_course: Option<&str>,
    ) -> Result<(&Course, &CourseFocusArea)> {
        let preferred = preferred_course.and_then(|course| self.get(course).ok());
        preferred
            .into_iter()
            .chain(self.courses.iter())
            .find_map(|course| course.focus_area(name).map(|area| (course, area)))
            .ok_or_else(|| ModelError::not_found(Entity::FocusArea, name.trim()))
    }

    /// All courses in catalog order
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }
}

/// Both catalogs, loaded together
#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    /// Module reference data
    pub modules: ModuleCatalog,
    /// Course reference data
    pub courses: CourseCatalog,
}

impl Catalogs {
    /// Catalogs compiled into the binary
    ///
    /// # Errors
    /// Returns `Format` if the bundled data is malformed.
    pub fn bundled() -> Result<Self> {
        Ok(Self {
            modules: ModuleCatalog::bundled()?,
            courses: CourseCatalog::bundled()?,
        })
    }

    /// Load catalogs from files, falling back to the bundled data for any path that is `None`
    ///
    /// # Errors
    /// Returns `Io` or `Format` if a given file cannot be read or parsed.
    pub fn load(module_path: Option<&Path>, course_path: Option<&Path>) -> Result<Self> {
        let modules = match module_path {
            Some(path) => ModuleCatalog::load(path)?,
            None => ModuleCatalog::bundled()?,
        };
        let courses = match course_path {
            Some(path) => CourseCatalog::load(path)?,
            None => CourseCatalog::bundled()?,
        };
        Ok(Self { modules, courses })
    }
}
