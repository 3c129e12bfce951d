use std::{fmt, str::FromStr};

use crate::RuleError;

/// The five canonical data-quality dimensions.
///
/// The declaration order is the reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    Accuracy,
    Completeness,
    Uniqueness,
    Timeliness,
    Consistency,
}

impl Dimension {
    /// Every dimension, in canonical order.
    pub const ALL: [Dimension; 5] = [
        Dimension::Accuracy,
        Dimension::Completeness,
        Dimension::Uniqueness,
        Dimension::Timeliness,
        Dimension::Consistency,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Accuracy => "Accuracy",
            Dimension::Completeness => "Completeness",
            Dimension::Uniqueness => "Uniqueness",
            Dimension::Timeliness => "Timeliness",
            Dimension::Consistency => "Consistency",
        }
    }

    /// Position in the canonical order.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<&str> for Dimension {
    type Error = RuleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Accuracy" => Ok(Dimension::Accuracy),
            "Completeness" => Ok(Dimension::Completeness),
            "Uniqueness" => Ok(Dimension::Uniqueness),
            "Timeliness" => Ok(Dimension::Timeliness),
            "Consistency" => Ok(Dimension::Consistency),
            _ => Err(RuleError::InvalidDimension(value.to_string())),
        }
    }
}

impl FromStr for Dimension {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dimension::try_from(s)
    }
}
