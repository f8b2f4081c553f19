//! Module model: codes, catalog data and enrollment records

use super::{Deadline, Grade};
use crate::core::error::ModelError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static MODULE_CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2,3}[0-9]{4}[A-Z]?$").expect("valid module code regex"));

/// Canonical (uppercase) module code, e.g. "CS1101S"
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModuleCode(String);

impl ModuleCode {
    /// Parse and canonicalise a module code
    ///
    /// # Errors
    /// Returns `InvalidArgument` if the code does not match the code pattern
    /// (2-3 letters, 4 digits, optional trailing letter).
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        let upper = raw.trim().to_ascii_uppercase();
        if MODULE_CODE_PATTERN.is_match(&upper) {
            Ok(Self(upper))
        } else {
            Err(ModelError::InvalidArgument(format!(
                "'{raw}' is not a valid module code"
            )))
        }
    }

    /// Returns true if `raw` would parse as a module code
    #[must_use]
    pub fn is_valid(raw: &str) -> bool {
        MODULE_CODE_PATTERN.is_match(&raw.trim().to_ascii_uppercase())
    }

    /// The code as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl FromStr for ModuleCode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ModuleCode {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ModuleCode> for String {
    fn from(code: ModuleCode) -> Self {
        code.0
    }
}

/// Prerequisite expression tree
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrereqTree {
    /// No prerequisites
    #[default]
    None,
    /// A single required module
    Module(String),
    /// Every child must be satisfied
    All(Vec<PrereqTree>),
    /// At least one child must be satisfied
    Any(Vec<PrereqTree>),
}

impl PrereqTree {
    /// Returns true if this tree is satisfied by the given set of taken codes
    pub fn is_satisfied_by(&self, taken: &dyn Fn(&str) -> bool) -> bool {
        match self {
            Self::None => true,
            Self::Module(code) => taken(code),
            Self::All(children) => children.iter().all(|c| c.is_satisfied_by(taken)),
            Self::Any(children) => children.iter().any(|c| c.is_satisfied_by(taken)),
        }
    }
}

impl fmt::Display for PrereqTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, children: &[PrereqTree], sep: &str) -> fmt::Result {
            write!(f, "(")?;
            for (idx, child) in children.iter().enumerate() {
                if idx > 0 {
                    write!(f, " {sep} ")?;
                }
                write!(f, "{child}")?;
            }
            write!(f, ")")
        }

        match self {
            Self::None => write!(f, "None"),
            Self::Module(code) => write!(f, "{code}"),
            Self::All(children) => join(f, children, "and"),
            Self::Any(children) => join(f, children, "or"),
        }
    }
}

/// Static module data from the module catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleInfo {
    /// Module code
    pub code: ModuleCode,

    /// Module title (e.g., "Programming Methodology")
    pub title: String,

    /// Modular credits
    pub credits: u32,

    /// Catalog description
    #[serde(default)]
    pub description: String,

    /// Prerequisite tree
    #[serde(default)]
    pub prerequisites: PrereqTree,

    /// Codes of modules that preclude this one
    #[serde(default)]
    pub preclusions: Vec<String>,
}

impl ModuleInfo {
    /// Create catalog data with no prerequisites or preclusions
    #[must_use]
    pub const fn new(code: ModuleCode, title: String, credits: u32) -> Self {
        Self {
            code,
            title,
            credits,
            description: String::new(),
            prerequisites: PrereqTree::None,
            preclusions: Vec::new(),
        }
    }
}

/// A module taken by a student: catalog data plus personal grade and tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrolledModule {
    /// Catalog data joined in by code
    pub info: ModuleInfo,

    /// Grade, once awarded
    #[serde(default)]
    pub grade: Option<Grade>,

    /// Personal tasks and deadlines
    #[serde(default)]
    pub deadlines: Vec<Deadline>,
}

impl EnrolledModule {
    /// Enroll a module with no grade and no tasks
    #[must_use]
    pub const fn new(info: ModuleInfo) -> Self {
        Self {
            info,
            grade: None,
            deadlines: Vec::new(),
        }
    }

    /// Module code
    #[must_use]
    pub const fn code(&self) -> &ModuleCode {
        &self.info.code
    }

    /// Returns true if a task with this description (any case) exists
    #[must_use]
    pub fn has_deadline(&self, description: &str) -> bool {
        self.deadlines
            .iter()
            .any(|d| d.matches(&self.info.code, description))
    }

    /// Attach a task
    ///
    /// # Returns
    /// `true` if the task was added, `false` if one with the same description exists
    pub fn add_deadline(&mut self, deadline: Deadline) -> bool {
        if self.has_deadline(&deadline.description) {
            return false;
        }
        self.deadlines.push(deadline);
        true
    }

    /// Remove every task with this description
    ///
    /// # Returns
    /// `true` if at least one task was removed
    pub fn remove_deadline(&mut self, description: &str) -> bool {
        let before = self.deadlines.len();
        let code = self.info.code.clone();
        self.deadlines.retain(|d| !d.matches(&code, description));
        self.deadlines.len() != before
    }

    /// Mutable access to the task with this description
    pub fn deadline_mut(&mut self, description: &str) -> Option<&mut Deadline> {
        let code = self.info.code.clone();
        self.deadlines
            .iter_mut()
            .find(|d| d.matches(&code, description))
    }
}
