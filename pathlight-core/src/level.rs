//! Ordinal scales for skill proficiency and education.
//!
//! Both enums derive `Ord`, so "at or above" checks are plain comparisons.
//!
//! # Examples
//! ```
//! use pathlight_core::{EducationLevel, ProficiencyLevel};
//!
//! assert!(ProficiencyLevel::Advanced >= ProficiencyLevel::Intermediate);
//! assert_eq!(EducationLevel::Bachelor.as_str(), "bachelor");
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How well a learner knows a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ProficiencyLevel {
    /// Just getting started.
    Beginner,
    /// Comfortable with everyday use.
    Intermediate,
    /// Deep working knowledge.
    Advanced,
    /// Authoritative command of the skill.
    Expert,
}

impl ProficiencyLevel {
    /// Return the level as a lowercase `&str`.
    ///
    /// # Examples
    /// ```
    /// use pathlight_core::ProficiencyLevel;
    ///
    /// assert_eq!(ProficiencyLevel::Expert.as_str(), "expert");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }

    /// Report whether this level satisfies `minimum`.
    #[must_use]
    pub fn meets(self, minimum: Self) -> bool {
        self >= minimum
    }
}

impl std::fmt::Display for ProficiencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProficiencyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            "expert" => Ok(Self::Expert),
            _ => Err(format!("unknown proficiency level '{s}'")),
        }
    }
}

/// Highest education attained by a learner, or required by an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EducationLevel {
    /// Secondary education.
    HighSchool,
    /// Associate degree.
    Associate,
    /// Bachelor's degree.
    Bachelor,
    /// Master's degree.
    Master,
    /// Doctorate.
    Phd,
}

impl EducationLevel {
    /// Return the level as a lowercase `&str`.
    ///
    /// # Examples
    /// ```
    /// use pathlight_core::EducationLevel;
    ///
    /// assert_eq!(EducationLevel::HighSchool.as_str(), "high_school");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HighSchool => "high_school",
            Self::Associate => "associate",
            Self::Bachelor => "bachelor",
            Self::Master => "master",
            Self::Phd => "phd",
        }
    }
}

impl std::fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EducationLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high_school" => Ok(Self::HighSchool),
            "associate" => Ok(Self::Associate),
            "bachelor" => Ok(Self::Bachelor),
            "master" => Ok(Self::Master),
            "phd" => Ok(Self::Phd),
            _ => Err(format!("unknown education level '{s}'")),
        }
    }
}
