//! Learner profiles: skills, preferences, and completion history.
//!
//! Profiles are owned by the identity subsystem and read-only to the
//! engine; nothing here mutates persisted state.

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{EducationLevel, ProficiencyLevel, Timestamp};

/// A finished course or internship in a learner's history.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompletedItem {
    /// Identifier of the completed item.
    pub item_id: u64,
    /// Final score achieved, in `0.0..=1.0`.
    pub score: f32,
    /// When the item was completed.
    pub completed_at: Timestamp,
}

/// A learner's skills, preferences, and completion history.
///
/// # Examples
/// ```
/// use pathlight_core::{LearnerProfile, ProficiencyLevel};
///
/// let learner = LearnerProfile::new(9)
///     .with_skill("react", ProficiencyLevel::Advanced)
///     .with_skill("node.js", ProficiencyLevel::Intermediate);
/// assert_eq!(learner.skill("react"), Some(ProficiencyLevel::Advanced));
/// assert!(learner.skill("mongodb").is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LearnerProfile {
    /// Unique learner identifier.
    pub id: u64,
    /// Highest education attained, when known.
    pub education: Option<EducationLevel>,
    /// Preferred work or study location.
    pub preferred_location: Option<String>,
    /// Expected compensation for internships.
    pub expected_compensation: Option<f32>,
    skills: HashMap<String, ProficiencyLevel>,
    completed: Vec<CompletedItem>,
}

impl LearnerProfile {
    /// Construct an empty profile for the given learner.
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self {
            id,
            education: None,
            preferred_location: None,
            expected_compensation: None,
            skills: HashMap::new(),
            completed: Vec::new(),
        }
    }

    /// Return the proficiency for a skill, if the learner holds it.
    #[must_use]
    pub fn skill(&self, name: &str) -> Option<ProficiencyLevel> {
        self.skills.get(name).copied()
    }

    /// Insert or update a skill.
    pub fn set_skill(&mut self, name: impl Into<String>, level: ProficiencyLevel) {
        self.skills.insert(name.into(), level);
    }

    /// Add a skill while returning `self` for chaining.
    #[must_use]
    pub fn with_skill(mut self, name: impl Into<String>, level: ProficiencyLevel) -> Self {
        self.set_skill(name, level);
        self
    }

    /// Iterate over skill names and proficiencies.
    pub fn skills(&self) -> impl Iterator<Item = (&str, ProficiencyLevel)> {
        self.skills.iter().map(|(name, level)| (name.as_str(), *level))
    }

    /// Number of skills on the profile.
    #[must_use]
    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }

    /// Set the education level while returning `self` for chaining.
    #[must_use]
    pub fn with_education(mut self, level: EducationLevel) -> Self {
        self.education = Some(level);
        self
    }

    /// Set the preferred location while returning `self` for chaining.
    #[must_use]
    pub fn with_preferred_location(mut self, location: impl Into<String>) -> Self {
        self.preferred_location = Some(location.into());
        self
    }

    /// Set the expected compensation while returning `self` for chaining.
    #[must_use]
    pub fn with_expected_compensation(mut self, compensation: f32) -> Self {
        self.expected_compensation = Some(compensation);
        self
    }

    /// Record a completion.
    pub fn record_completion(&mut self, completion: CompletedItem) {
        self.completed.push(completion);
    }

    /// Record a completion while returning `self` for chaining.
    #[must_use]
    pub fn with_completion(mut self, completion: CompletedItem) -> Self {
        self.record_completion(completion);
        self
    }

    /// The learner's completion history, in recorded order.
    #[must_use]
    pub fn completed(&self) -> &[CompletedItem] {
        &self.completed
    }

    /// Report whether the learner has completed the given item.
    #[must_use]
    pub fn has_completed(&self, item_id: u64) -> bool {
        self.completed.iter().any(|entry| entry.item_id == item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn completion(item_id: u64) -> CompletedItem {
        CompletedItem {
            item_id,
            score: 0.9,
            completed_at: Timestamp::from_unix_seconds(100),
        }
    }

    #[rstest]
    fn skill_lookup() {
        let learner = LearnerProfile::new(1)
            .with_skill("rust", ProficiencyLevel::Expert)
            .with_skill("sql", ProficiencyLevel::Beginner);
        assert_eq!(learner.skill("rust"), Some(ProficiencyLevel::Expert));
        assert!(learner.skill("go").is_none());
        assert_eq!(learner.skill_count(), 2);
    }

    #[rstest]
    fn set_skill_overwrites() {
        let mut learner = LearnerProfile::new(1);
        learner.set_skill("rust", ProficiencyLevel::Beginner);
        learner.set_skill("rust", ProficiencyLevel::Advanced);
        assert_eq!(learner.skill("rust"), Some(ProficiencyLevel::Advanced));
        assert_eq!(learner.skill_count(), 1);
    }

    #[rstest]
    fn completion_history_is_queryable() {
        let learner = LearnerProfile::new(2)
            .with_completion(completion(10))
            .with_completion(completion(11));
        assert!(learner.has_completed(10));
        assert!(!learner.has_completed(12));
        assert_eq!(learner.completed().len(), 2);
    }
}
