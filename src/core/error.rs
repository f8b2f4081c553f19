//! Error types for the model layer

use std::fmt;
use thiserror::Error;

/// Kind of entity an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    /// A student profile
    Profile,
    /// A module in the module catalog
    Module,
    /// A module enrolled in the active profile
    EnrolledModule,
    /// A course in the course catalog
    Course,
    /// A focus area of a course
    FocusArea,
    /// A task or deadline attached to a module
    Deadline,
    /// A semester of the active profile
    Semester,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Profile => "profile",
            Self::Module => "module",
            Self::EnrolledModule => "enrolled module",
            Self::Course => "course",
            Self::FocusArea => "focus area",
            Self::Deadline => "task",
            Self::Semester => "semester",
        };
        f.write_str(name)
    }
}

/// Errors produced by the profile store, catalogs, commands and storage
#[derive(Debug, Error)]
pub enum ModelError {
    /// One or more referenced entities do not exist
    #[error("{entity} not found: {}", .keys.join(", "))]
    NotFound {
        /// Kind of the missing entities
        entity: Entity,
        /// Every offending key
        keys: Vec<String>,
    },

    /// One or more entities already exist
    #[error("duplicate {entity}: {}", .keys.join(", "))]
    DuplicateEntity {
        /// Kind of the duplicated entities
        entity: Entity,
        /// Every offending key
        keys: Vec<String>,
    },

    /// A value is out of range or malformed
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The current state does not allow the operation
    #[error("{0}")]
    PreconditionFailed(String),

    /// Reading or writing the data file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The data file or a catalog could not be (de)serialized
    #[error("data format error: {0}")]
    Format(#[from] serde_json::Error),
}

impl ModelError {
    /// Build a `NotFound` error for a single key
    pub fn not_found(entity: Entity, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            keys: vec![key.into()],
        }
    }

    /// Build a `DuplicateEntity` error for a single key
    pub fn duplicate(entity: Entity, key: impl Into<String>) -> Self {
        Self::DuplicateEntity {
            entity,
            keys: vec![key.into()],
        }
    }

    /// Error returned by every command that needs a profile when none exists
    #[must_use]
    pub fn no_profile() -> Self {
        Self::PreconditionFailed(
            "No profile exists yet. Create one with `new` first.".to_string(),
        )
    }
}

/// Result alias for model operations
pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_lists_every_key() {
        let err = ModelError::NotFound {
            entity: Entity::Module,
            keys: vec!["CS1111".to_string(), "IS4000".to_string()],
        };
        assert_eq!(err.to_string(), "module not found: CS1111, IS4000");
    }

    #[test]
    fn test_duplicate_single_key() {
        let err = ModelError::duplicate(Entity::Profile, "John");
        assert_eq!(err.to_string(), "duplicate profile: John");
    }
}
