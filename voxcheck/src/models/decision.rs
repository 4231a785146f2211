//! The engine's output.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::scores::ScoreSet;
use crate::reference::ReferenceOutcome;
use crate::tolerance::ToleranceReport;

/// Final disposition of a validation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    /// Accepted without human involvement
    AutoPass,
    /// Routed to a human reviewer
    NeedsReview,
    /// Rejected without human involvement
    AutoFail,
}

impl ReviewStatus {
    /// Snake-case name, as serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AutoPass => "auto_pass",
            Self::NeedsReview => "needs_review",
            Self::AutoFail => "auto_fail",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Matched versus missing criteria, reported next to the binary outcome.
///
/// This never changes the review status.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartialSuccess {
    /// Some but not all criteria were met
    pub is_partial: bool,
    /// Criteria that passed
    pub matched_criteria: Vec<String>,
    /// Criteria that failed
    pub missing_criteria: Vec<String>,
}

impl PartialSuccess {
    /// The default report: no partial match.
    pub fn none() -> Self {
        Self::default()
    }
}

/// The judgment for one validation input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Decision {
    /// Final review status
    pub review_status: ReviewStatus,

    /// Scores that produced the status
    pub scores: ScoreSet,

    /// Tolerance check results
    pub tolerance: ToleranceReport,

    /// Conversational reference outcome, when one was attempted
    pub reference: Option<ReferenceOutcome>,

    /// Partial success report
    pub partial_success: PartialSuccess,

    /// Which signals drove the outcome
    pub rationale: String,
}

impl Decision {
    /// Whether a human reviewer should look at this result.
    pub fn needs_review(&self) -> bool {
        self.review_status == ReviewStatus::NeedsReview
    }
}
