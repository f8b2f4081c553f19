//! Letter grade model

use crate::core::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A letter grade awarded for a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Grade {
    /// A+
    APlus,
    /// A
    A,
    /// A-
    AMinus,
    /// B+
    BPlus,
    /// B
    B,
    /// B-
    BMinus,
    /// C+
    CPlus,
    /// C
    C,
    /// D+
    DPlus,
    /// D
    D,
    /// F
    F,
    /// Satisfactory (not counted towards CAP)
    S,
    /// Unsatisfactory (not counted towards CAP)
    U,
    /// Completed satisfactorily (not counted towards CAP)
    CS,
    /// Completed unsatisfactorily (not counted towards CAP)
    CU,
}

impl Grade {
    /// Every accepted grade in display order
    pub const ALL: [Self; 15] = [
        Self::APlus,
        Self::A,
        Self::AMinus,
        Self::BPlus,
        Self::B,
        Self::BMinus,
        Self::CPlus,
        Self::C,
        Self::DPlus,
        Self::D,
        Self::F,
        Self::S,
        Self::U,
        Self::CS,
        Self::CU,
    ];

    /// Grade point used for CAP, or `None` for grades that are not counted
    #[must_use]
    pub const fn grade_point(self) -> Option<f64> {
        match self {
            Self::APlus | Self::A => Some(5.0),
            Self::AMinus => Some(4.5),
            Self::BPlus => Some(4.0),
            Self::B => Some(3.5),
            Self::BMinus => Some(3.0),
            Self::CPlus => Some(2.5),
            Self::C => Some(2.0),
            Self::DPlus => Some(1.5),
            Self::D => Some(1.0),
            Self::F => Some(0.0),
            Self::S | Self::U | Self::CS | Self::CU => None,
        }
    }

    /// Whether this grade contributes to CAP
    #[must_use]
    pub const fn counts_towards_cap(self) -> bool {
        self.grade_point().is_some()
    }

    /// Letter form of the grade (e.g. "A-")
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::DPlus => "D+",
            Self::D => "D",
            Self::F => "F",
            Self::S => "S",
            Self::U => "U",
            Self::CS => "CS",
            Self::CU => "CU",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|grade| grade.as_str() == wanted)
            .ok_or_else(|| {
                ModelError::InvalidArgument(format!(
                    "'{s}' is not a valid grade (expected one of A+, A, A-, B+, B, B-, C+, C, D+, D, F, S, U, CS, CU)"
                ))
            })
    }
}

impl TryFrom<String> for Grade {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Grade> for String {
    fn from(grade: Grade) -> Self {
        grade.as_str().to_string()
    }
}
