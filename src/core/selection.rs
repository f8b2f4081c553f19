//! "Currently displayed" selection consumed by the presentation layer

use crate::core::models::{Course, CourseFocusArea, EnrolledModule, ModuleInfo, Profile};

/// Profile overview with its CAP
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    /// Snapshot of the profile
    pub profile: Profile,
    /// CAP at the time of display (`None` if nothing is graded)
    pub cap: Option<f64>,
}

/// Catalog data for one module, plus the student's record when the module is taken
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleView {
    /// Catalog data
    pub info: ModuleInfo,
    /// Semester and enrollment record, if the active profile takes the module
    pub enrollment: Option<(u32, EnrolledModule)>,
    /// Whether modules taken so far satisfy the prerequisites (`None` without a profile)
    pub prerequisites_met: Option<bool>,
}

/// Modules taken in one semester
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleListView {
    /// Semester number
    pub semester: u32,
    /// Modules in insertion order
    pub modules: Vec<EnrolledModule>,
}

/// A focus area with its module codes resolved against the module catalog
#[derive(Debug, Clone, PartialEq)]
pub struct FocusAreaView {
    /// Name of the course offering the focus area
    pub course: String,
    /// The focus area
    pub area: CourseFocusArea,
    /// Catalog data for every referenced module that exists in the catalog
    pub modules: Vec<ModuleInfo>,
}

/// The single entity (or module list) chosen for display
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayedView {
    /// A profile overview
    Profile(ProfileView),
    /// One module
    Module(ModuleView),
    /// Modules of one semester
    ModuleList(ModuleListView),
    /// A course and its requirements
    Course(Course),
    /// A focus area and its modules
    FocusArea(FocusAreaView),
}

impl DisplayedView {
    /// Short label of the variant, used in logs
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Profile(_) => "profile",
            Self::Module(_) => "module",
            Self::ModuleList(_) => "module list",
            Self::Course(_) => "course",
            Self::FocusArea(_) => "focus area",
        }
    }
}

/// Holds at most one displayed view; the last write wins
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    current: Option<DisplayedView>,
}

impl Selection {
    /// Replace the displayed view
    pub fn set(&mut self, view: DisplayedView) {
        self.current = Some(view);
    }

    /// Remove the displayed view
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Currently displayed view
    #[must_use]
    pub const fn get(&self) -> Option<&DisplayedView> {
        self.current.as_ref()
    }
}
