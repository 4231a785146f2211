//! Decision policy: maps scores and check results to a review status.

use std::sync::Arc;

use crate::config::DecisionConfig;
use crate::models::{Decision, PartialSuccess, ReviewStatus, ScoreSet};
use crate::reference::ReferenceOutcome;
use crate::tolerance::ToleranceReport;

/// Applies the threshold bands and the escalation rules.
///
/// The policy never auto-passes or auto-fails on missing information. A
/// failed tolerance check or a reference mismatch caps an auto-pass at
/// needs-review; it never turns a result into an auto-fail on its own.
#[derive(Debug, Clone)]
pub struct DecisionPolicy {
    config: Arc<DecisionConfig>,
}

impl DecisionPolicy {
    /// Create a policy over validated thresholds.
    pub fn new(config: Arc<DecisionConfig>) -> Self {
        Self { config }
    }

    /// Band a confidence value. `None` always needs review.
    pub fn determine_review_status(&self, confidence: Option<f64>) -> ReviewStatus {
        match confidence {
            Some(c) if c >= self.config.auto_pass_threshold => ReviewStatus::AutoPass,
            Some(c) if c >= self.config.review_threshold => ReviewStatus::NeedsReview,
            Some(_) => ReviewStatus::AutoFail,
            None => ReviewStatus::NeedsReview,
        }
    }

    /// Matched versus missing criteria from the tolerance report.
    ///
    /// Reports no partial match unless enabled in configuration. The result
    /// is informational and does not influence the review status.
    pub fn evaluate_partial_success(&self, tolerance: &ToleranceReport) -> PartialSuccess {
        if !self.config.report_partial_success {
            return PartialSuccess::none();
        }

        let (matched, missing): (Vec<_>, Vec<_>) =
            tolerance.outcomes().into_iter().partition(|(_, passed)| *passed);

        PartialSuccess {
            is_partial: !matched.is_empty() && !missing.is_empty(),
            matched_criteria: matched.into_iter().map(|(check, _)| check.to_string()).collect(),
            missing_criteria: missing.into_iter().map(|(check, _)| check.to_string()).collect(),
        }
    }

    /// Fold everything into the final decision.
    pub fn decide(
        &self,
        scores: ScoreSet,
        tolerance: ToleranceReport,
        reference: Option<ReferenceOutcome>,
    ) -> Decision {
        let mut rationale = Vec::new();
        let mut status = self.determine_review_status(scores.confidence);

        match scores.confidence {
            Some(c) if c >= self.config.auto_pass_threshold => rationale.push(format!(
                "confidence {:.2} meets auto-pass threshold {:.2}",
                c, self.config.auto_pass_threshold
            )),
            Some(c) if c >= self.config.review_threshold => rationale.push(format!(
                "confidence {:.2} below auto-pass threshold {:.2}",
                c, self.config.auto_pass_threshold
            )),
            Some(c) => rationale.push(format!(
                "confidence {:.2} below review threshold {:.2}",
                c, self.config.review_threshold
            )),
            None => rationale.push("confidence unavailable".to_string()),
        }

        if let Some(accuracy) = scores.accuracy {
            rationale.push(format!("accuracy {:.2}", accuracy));
        }

        if !scores.missing.is_empty() {
            status = ReviewStatus::NeedsReview;
            let missing: Vec<String> = scores.missing.iter().map(ToString::to_string).collect();
            rationale.push(format!("missing signals: {}", missing.join(", ")));
        }

        if !tolerance.overall_passed {
            status = cap(status);
            rationale.extend(tolerance.failures());
        }

        if let Some(outcome) = &reference
            && outcome.matched == Some(false)
        {
            status = cap(status);
            rationale.push(match &outcome.phrase {
                Some(phrase) => format!("reference '{}' resolved to an unexpected item", phrase),
                None => "expected reference could not be resolved".to_string(),
            });
        }

        let partial_success = self.evaluate_partial_success(&tolerance);

        Decision {
            review_status: status,
            scores,
            tolerance,
            reference,
            partial_success,
            rationale: rationale.join("; "),
        }
    }
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self::new(Arc::new(DecisionConfig::default()))
    }
}

fn cap(status: ReviewStatus) -> ReviewStatus {
    match status {
        ReviewStatus::AutoPass => ReviewStatus::NeedsReview,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MissingReason, MissingSignal, Signal};
    use crate::tolerance::{ForbiddenContentResult, LengthResult};
    use serde_json::json;

    fn scores(confidence: Option<f64>) -> ScoreSet {
        ScoreSet {
            confidence,
            ..Default::default()
        }
    }

    #[test]
    fn test_review_status_bands() {
        let policy = DecisionPolicy::default();
        assert_eq!(policy.determine_review_status(Some(0.75)), ReviewStatus::AutoPass);
        assert_eq!(policy.determine_review_status(Some(0.74)), ReviewStatus::NeedsReview);
        assert_eq!(policy.determine_review_status(Some(0.40)), ReviewStatus::NeedsReview);
        assert_eq!(policy.determine_review_status(Some(0.39)), ReviewStatus::AutoFail);
        assert_eq!(policy.determine_review_status(None), ReviewStatus::NeedsReview);
        assert_eq!(policy.determine_review_status(Some(1.0)), ReviewStatus::AutoPass);
        assert_eq!(policy.determine_review_status(Some(0.0)), ReviewStatus::AutoFail);
    }

    #[test]
    fn test_decide_rationale_names_driving_signals() {
        let policy = DecisionPolicy::default();
        let tolerance = ToleranceReport {
            forbidden_content: Some(ForbiddenContentResult {
                passed: false,
                found_phrases: vec!["sorry".to_string()],
            }),
            ..Default::default()
        }
        .fold();

        let decision = policy.decide(scores(Some(0.62)), tolerance, None);
        assert_eq!(decision.review_status, ReviewStatus::NeedsReview);
        assert_eq!(
            decision.rationale,
            "confidence 0.62 below auto-pass threshold 0.75; forbidden phrase 'sorry' detected"
        );
    }

    #[test]
    fn test_missing_signal_forces_review() {
        let policy = DecisionPolicy::default();

        let mut low = scores(Some(0.1));
        low.missing.push(MissingSignal::new(
            Signal::EntityMatch,
            MissingReason::NoEntities,
        ));
        let decision = policy.decide(low, ToleranceReport::default(), None);
        assert_eq!(decision.review_status, ReviewStatus::NeedsReview);
        assert!(decision.rationale.contains("entity match (no entities captured)"));

        let decision = policy.decide(scores(None), ToleranceReport::default(), None);
        assert_eq!(decision.review_status, ReviewStatus::NeedsReview);
        assert_eq!(decision.rationale, "confidence unavailable");
    }

    #[test]
    fn test_tolerance_failure_caps_auto_pass_only() {
        let policy = DecisionPolicy::default();
        let failing = ToleranceReport {
            length: Some(LengthResult {
                passed: false,
                actual_length: 12,
                max_length: 5,
            }),
            ..Default::default()
        }
        .fold();

        let decision = policy.decide(scores(Some(0.9)), failing.clone(), None);
        assert_eq!(decision.review_status, ReviewStatus::NeedsReview);

        let decision = policy.decide(scores(Some(0.2)), failing, None);
        assert_eq!(decision.review_status, ReviewStatus::AutoFail);
    }

    #[test]
    fn test_reference_mismatch_caps_auto_pass() {
        let policy = DecisionPolicy::default();
        let reference = ReferenceOutcome {
            phrase: Some("the second".to_string()),
            resolved: Some(json!("B")),
            expected: Some(json!("C")),
            matched: Some(false),
        };
        let decision = policy.decide(
            scores(Some(0.95)),
            ToleranceReport::default(),
            Some(reference),
        );
        assert_eq!(decision.review_status, ReviewStatus::NeedsReview);
        assert!(decision.rationale.contains("reference 'the second'"));
    }

    #[test]
    fn test_clean_auto_pass() {
        let policy = DecisionPolicy::default();
        let decision = policy.decide(scores(Some(0.8)), ToleranceReport::default(), None);
        assert_eq!(decision.review_status, ReviewStatus::AutoPass);
        assert_eq!(decision.partial_success, PartialSuccess::none());
    }

    #[test]
    fn test_partial_success_reporting() {
        let tolerance = ToleranceReport {
            forbidden_content: Some(ForbiddenContentResult {
                passed: true,
                found_phrases: Vec::new(),
            }),
            length: Some(LengthResult {
                passed: false,
                actual_length: 12,
                max_length: 5,
            }),
            ..Default::default()
        }
        .fold();

        let policy = DecisionPolicy::default();
        assert_eq!(policy.evaluate_partial_success(&tolerance), PartialSuccess::none());

        let policy = DecisionPolicy::new(Arc::new(DecisionConfig {
            report_partial_success: true,
            ..Default::default()
        }));
        let partial = policy.evaluate_partial_success(&tolerance);
        assert!(partial.is_partial);
        assert_eq!(partial.matched_criteria, vec!["forbidden_content"]);
        assert_eq!(partial.missing_criteria, vec!["length"]);
    }
}
