//! Hard eligibility constraints evaluated independently of ranking.
//!
//! Every check runs even after one fails, so callers can report the full
//! set of reasons rather than only the first.

use pathlight_core::{CandidateItem, ItemStatus, LearnerProfile, Timestamp};

use crate::metrics::skill_match_score;

/// Minimum skill-match ratio required for eligibility.
pub const SKILL_MATCH_THRESHOLD: f32 = 0.6;

/// Why a candidate failed an eligibility check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IneligibilityReason {
    /// The item is not accepting enrolments or applications.
    NotOpen {
        /// The item's actual status.
        status: ItemStatus,
    },
    /// The application deadline is not in the future.
    DeadlinePassed,
    /// The learner's skill match fell below [`SKILL_MATCH_THRESHOLD`].
    InsufficientSkillMatch {
        /// The measured skill-match ratio.
        score: f32,
    },
}

impl std::fmt::Display for IneligibilityReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotOpen { status } => {
                write!(f, "item is not currently open (status: {status})")
            }
            Self::DeadlinePassed => f.write_str("application deadline has passed"),
            Self::InsufficientSkillMatch { score } => {
                write!(f, "insufficient skill match ({score:.2})")
            }
        }
    }
}

/// Outcome of evaluating every eligibility check for one candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct EligibilityReport {
    /// Whether every check passed.
    pub eligible: bool,
    /// The measured skill-match ratio, kept for annotation and logging.
    pub skill_match: f32,
    /// Every failed check, in evaluation order. Empty when eligible.
    pub failures: Vec<IneligibilityReason>,
}

/// Evaluate all eligibility checks for `item` against `learner` at `now`.
///
/// The checks are independent: an item must be open, its deadline (when
/// present) must be strictly after `now`, and the learner's skill match
/// must reach [`SKILL_MATCH_THRESHOLD`].
///
/// # Examples
/// ```
/// use pathlight_core::{CandidateItem, ItemKind, ItemStatus, LearnerProfile, Timestamp};
/// use pathlight_scorer::check_eligibility;
///
/// let item = CandidateItem::new(1, ItemKind::Internship, "Closed role")
///     .with_status(ItemStatus::Closed);
/// let learner = LearnerProfile::new(1);
/// let report = check_eligibility(&item, &learner, Timestamp::from_unix_seconds(0));
/// assert!(!report.eligible);
/// ```
#[must_use]
pub fn check_eligibility(
    item: &CandidateItem,
    learner: &LearnerProfile,
    now: Timestamp,
) -> EligibilityReport {
    let skill_match = skill_match_score(&item.required_skills, learner);
    let mut failures = Vec::new();

    if !item.is_open() {
        failures.push(IneligibilityReason::NotOpen {
            status: item.status,
        });
    }
    if item.deadline.is_some_and(|deadline| deadline <= now) {
        failures.push(IneligibilityReason::DeadlinePassed);
    }
    if skill_match < SKILL_MATCH_THRESHOLD {
        failures.push(IneligibilityReason::InsufficientSkillMatch { score: skill_match });
    }

    EligibilityReport {
        eligible: failures.is_empty(),
        skill_match,
        failures,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathlight_core::{ItemKind, ProficiencyLevel};
    use rstest::{fixture, rstest};

    #[fixture]
    fn learner() -> LearnerProfile {
        LearnerProfile::new(1)
            .with_skill("react", ProficiencyLevel::Advanced)
            .with_skill("node.js", ProficiencyLevel::Intermediate)
    }

    fn internship(status: ItemStatus) -> CandidateItem {
        CandidateItem::new(1, ItemKind::Internship, "Frontend intern")
            .with_status(status)
            .with_required_skills(["react", "node.js"])
    }

    const NOW: Timestamp = Timestamp::from_unix_seconds(1_000);

    #[rstest]
    fn open_future_match_is_eligible(learner: LearnerProfile) {
        let item = internship(ItemStatus::Open).with_deadline(Timestamp::from_unix_seconds(2_000));
        let report = check_eligibility(&item, &learner, NOW);
        assert!(report.eligible);
        assert!(report.failures.is_empty());
    }

    #[rstest]
    #[case(ItemStatus::Draft)]
    #[case(ItemStatus::Closed)]
    #[case(ItemStatus::Archived)]
    fn non_open_statuses_are_never_eligible(
        learner: LearnerProfile,
        #[case] status: ItemStatus,
    ) {
        let report = check_eligibility(&internship(status), &learner, NOW);
        assert!(!report.eligible);
        assert!(report
            .failures
            .iter()
            .any(|reason| matches!(reason, IneligibilityReason::NotOpen { .. })));
    }

    #[rstest]
    fn past_deadline_fails_regardless_of_skills(learner: LearnerProfile) {
        let item = internship(ItemStatus::Open).with_deadline(Timestamp::from_unix_seconds(500));
        let report = check_eligibility(&item, &learner, NOW);
        assert!(!report.eligible);
        assert_eq!(report.failures, vec![IneligibilityReason::DeadlinePassed]);
    }

    #[rstest]
    fn deadline_at_now_counts_as_passed(learner: LearnerProfile) {
        let item = internship(ItemStatus::Open).with_deadline(NOW);
        let report = check_eligibility(&item, &learner, NOW);
        assert!(!report.eligible);
    }

    #[rstest]
    #[expect(clippy::float_arithmetic, reason = "tests compare floating point values")]
    fn two_of_three_skills_meets_threshold(learner: LearnerProfile) {
        let item = CandidateItem::new(2, ItemKind::Internship, "Full-stack intern")
            .with_status(ItemStatus::Open)
            .with_required_skills(["react", "node.js", "mongodb"])
            .with_deadline(Timestamp::from_unix_seconds(9_000));
        let report = check_eligibility(&item, &learner, NOW);
        assert!(report.eligible);
        assert!((report.skill_match - 2.0 / 3.0).abs() < 1e-3);
    }

    #[rstest]
    fn all_failures_are_collected(learner: LearnerProfile) {
        let item = CandidateItem::new(3, ItemKind::Internship, "Compiler intern")
            .with_status(ItemStatus::Closed)
            .with_required_skills(["llvm", "mlir"])
            .with_deadline(Timestamp::from_unix_seconds(500));
        let report = check_eligibility(&item, &learner, NOW);
        assert_eq!(report.failures.len(), 3);
    }

    #[rstest]
    fn failure_messages_are_stable(learner: LearnerProfile) {
        let item = internship(ItemStatus::Closed);
        let report = check_eligibility(&item, &learner, NOW);
        let messages: Vec<_> = report
            .failures
            .iter()
            .map(IneligibilityReason::to_string)
            .collect();
        assert_eq!(
            messages,
            vec!["item is not currently open (status: closed)".to_owned()]
        );
    }
}
