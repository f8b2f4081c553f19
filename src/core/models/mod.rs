//! Data models for `MODdy`

pub mod course;
pub mod deadline;
pub mod grade;
pub mod module;
pub mod profile;

pub use course::{Course, CourseFocusArea};
pub use deadline::Deadline;
pub use grade::Grade;
pub use module::{EnrolledModule, ModuleCode, ModuleInfo, PrereqTree};
pub use profile::{check_semester, Profile, MAX_SEMESTER};
