//! Candidate items: the courses and internships the engine ranks.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{EducationLevel, ProficiencyLevel, Timestamp};

/// Whether an item is a course or an internship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ItemKind {
    /// A course in the learning catalogue.
    Course,
    /// An internship posting.
    Internship,
}

impl ItemKind {
    /// Return the kind as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Course => "course",
            Self::Internship => "internship",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "course" => Ok(Self::Course),
            "internship" => Ok(Self::Internship),
            _ => Err(format!("unknown item kind '{s}'")),
        }
    }
}

/// Lifecycle state of a catalogue item.
///
/// Only [`ItemStatus::Open`] items can ever be recommended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ItemStatus {
    /// Being authored; not yet visible.
    Draft,
    /// Accepting enrolments or applications.
    Open,
    /// No longer accepting enrolments or applications.
    Closed,
    /// Retired from the catalogue.
    Archived,
}

impl ItemStatus {
    /// Return the status as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Archived => "archived",
        }
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            "archived" => Ok(Self::Archived),
            _ => Err(format!("unknown item status '{s}'")),
        }
    }
}

/// A course or internship eligible for ranking.
///
/// Fields the catalogue may omit (deadline, location, compensation, required
/// education) are optional; the scoring layer defines explicit fallbacks for
/// each absence.
///
/// # Examples
/// ```
/// use pathlight_core::{CandidateItem, ItemKind, ItemStatus};
///
/// let item = CandidateItem::new(7, ItemKind::Internship, "Backend intern")
///     .with_required_skills(["rust", "sql"])
///     .with_status(ItemStatus::Open);
/// assert_eq!(item.id, 7);
/// assert_eq!(item.required_skills.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CandidateItem {
    /// Unique identifier within the catalogue.
    pub id: u64,
    /// Course or internship.
    pub kind: ItemKind,
    /// Display title.
    pub title: String,
    /// Free-text description; feeds content similarity.
    pub description: String,
    /// Optional catalogue category.
    pub category: Option<String>,
    /// Skills the item expects from applicants or enrolees.
    pub required_skills: Vec<String>,
    /// Difficulty pitched by the item.
    pub difficulty: ProficiencyLevel,
    /// Minimum education the item asks for, when it asks at all.
    pub required_education: Option<EducationLevel>,
    /// Location of the item, when location-bound.
    pub location: Option<String>,
    /// Offered compensation (internships) or price (courses).
    pub compensation: Option<f32>,
    /// Application deadline; internships only.
    pub deadline: Option<Timestamp>,
    /// Lifecycle state.
    pub status: ItemStatus,
    /// Aggregate rating in `0.0..=5.0`.
    pub rating: f32,
    /// Enrolments or applications recorded so far.
    pub enrolment_count: u32,
}

impl CandidateItem {
    /// Construct an item with empty optional fields and `Draft` status.
    #[must_use]
    pub fn new(id: u64, kind: ItemKind, title: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            title: title.into(),
            description: String::new(),
            category: None,
            required_skills: Vec::new(),
            difficulty: ProficiencyLevel::Beginner,
            required_education: None,
            location: None,
            compensation: None,
            deadline: None,
            status: ItemStatus::Draft,
            rating: 0.0,
            enrolment_count: 0,
        }
    }

    /// Replace the required-skill list while returning `self` for chaining.
    #[must_use]
    pub fn with_required_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_skills = skills.into_iter().map(Into::into).collect();
        self
    }

    /// Set the lifecycle status while returning `self` for chaining.
    #[must_use]
    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the application deadline while returning `self` for chaining.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Timestamp) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set the description while returning `self` for chaining.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the category while returning `self` for chaining.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the location while returning `self` for chaining.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the offered compensation while returning `self` for chaining.
    #[must_use]
    pub fn with_compensation(mut self, compensation: f32) -> Self {
        self.compensation = Some(compensation);
        self
    }

    /// Set the pitched difficulty while returning `self` for chaining.
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: ProficiencyLevel) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Set the education requirement while returning `self` for chaining.
    #[must_use]
    pub fn with_required_education(mut self, level: EducationLevel) -> Self {
        self.required_education = Some(level);
        self
    }

    /// Set the aggregate rating while returning `self` for chaining.
    #[must_use]
    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = rating;
        self
    }

    /// Set the enrolment count while returning `self` for chaining.
    #[must_use]
    pub fn with_enrolment_count(mut self, count: u32) -> Self {
        self.enrolment_count = count;
        self
    }

    /// Report whether the item accepts enrolments or applications.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == ItemStatus::Open
    }
}
