//! Validation input: what the assistant did and what the test case expected.
//!
//! Every field deserializes with a default so a partially filled test case
//! never fails to load. Gaps are handled downstream as missing signals.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Structured entities keyed by name.
pub type EntityMap = BTreeMap<String, Value>;

/// One validation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ValidationInput {
    /// The assistant's response text
    #[serde(alias = "actual_response_text")]
    pub actual_response: String,

    /// Structured entities reported alongside the response. May carry the
    /// assistant's own NLU output under the `intent` and `confidence` keys.
    /// `None` means no entity map was captured at all.
    pub actual_entities: Option<EntityMap>,

    /// What the test case expects
    #[serde(alias = "expected_outcome")]
    pub expected: ExpectedOutcome,

    /// Locale the test case was run in
    pub locale: Option<String>,

    /// The user utterance sent to the assistant, if recorded
    pub utterance: Option<String>,

    /// Per-test-case rules
    #[serde(alias = "validation_rules")]
    pub rules: ValidationRules,

    /// Conversational context, e.g. `{"items": [...]}` holding prior search
    /// results that ordinal references point into
    pub context: Value,
}

/// The expected outcome of a test case.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExpectedOutcome {
    /// Expected intent label
    #[serde(alias = "expected_intent")]
    pub intent: Option<String>,

    /// Expected entity values
    #[serde(alias = "expected_entities")]
    pub entities: EntityMap,

    /// Expected response text
    #[serde(alias = "expected_response")]
    pub response: Option<String>,

    /// Context item the utterance is expected to refer to
    #[serde(alias = "expected_reference")]
    pub reference: Option<Value>,
}

/// Candidate intent labels, either one flat list or keyed by locale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum IntentLabels {
    /// Same labels for every locale
    Flat(Vec<String>),

    /// Labels per locale, with an optional `"default"` entry
    ByLocale(BTreeMap<String, Vec<String>>),
}

/// Rules attached to a single test case.
///
/// Anything left unset is skipped by the tolerance checks, not failed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ValidationRules {
    /// Candidate intent labels
    pub intent_labels: Option<IntentLabels>,

    /// Locale declared by the test case rules
    pub locale: Option<String>,

    /// Strings that must appear in the response
    pub required_entities: Vec<String>,

    /// Phrases that must not appear in the response
    pub forbidden_phrases: Vec<String>,

    /// Required tone class, e.g. `"polite"`
    #[serde(alias = "tone_requirement")]
    pub tone: Option<String>,

    /// Overrides the configured tone strictness for this case
    pub tone_strict: Option<bool>,

    /// Maximum response length in characters
    pub max_length: Option<i64>,

    /// Expected confirmation: `"affirmative"` or `"negative"`
    #[serde(alias = "confirmation_mode")]
    pub confirmation: Option<String>,

    /// Exact phrasings that are accepted as a perfect match
    pub alternates: Vec<String>,

    /// Threshold for the lexical similarity check; the check only runs
    /// when this is set
    pub similarity_threshold: Option<f64>,
}

/// Builder for [`ValidationInput`].
#[derive(Debug, Clone, Default)]
pub struct ValidationInputBuilder {
    input: ValidationInput,
}

impl ValidationInputBuilder {
    /// Start a new input with the assistant's response text.
    pub fn new(actual_response: impl Into<String>) -> Self {
        Self {
            input: ValidationInput {
                actual_response: actual_response.into(),
                ..Default::default()
            },
        }
    }

    /// Set one actual entity, creating the entity map if needed.
    pub fn actual_entity(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.input
            .actual_entities
            .get_or_insert_with(EntityMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Replace the actual entity map.
    pub fn actual_entities(mut self, entities: EntityMap) -> Self {
        self.input.actual_entities = Some(entities);
        self
    }

    /// Set the expected intent.
    pub fn expected_intent(mut self, intent: impl Into<String>) -> Self {
        self.input.expected.intent = Some(intent.into());
        self
    }

    /// Set one expected entity.
    pub fn expected_entity(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.input.expected.entities.insert(name.into(), value.into());
        self
    }

    /// Set the expected response text.
    pub fn expected_response(mut self, response: impl Into<String>) -> Self {
        self.input.expected.response = Some(response.into());
        self
    }

    /// Set the expected reference target.
    pub fn expected_reference(mut self, item: impl Into<Value>) -> Self {
        self.input.expected.reference = Some(item.into());
        self
    }

    /// Set the locale.
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.input.locale = Some(locale.into());
        self
    }

    /// Set the user utterance.
    pub fn utterance(mut self, utterance: impl Into<String>) -> Self {
        self.input.utterance = Some(utterance.into());
        self
    }

    /// Replace the validation rules.
    pub fn rules(mut self, rules: ValidationRules) -> Self {
        self.input.rules = rules;
        self
    }

    /// Set the conversational context.
    pub fn context(mut self, context: Value) -> Self {
        self.input.context = context;
        self
    }

    /// Finish building.
    pub fn build(self) -> ValidationInput {
        self.input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_json_deserializes() {
        let input: ValidationInput = serde_json::from_str("{}").unwrap();
        assert_eq!(input, ValidationInput::default());
        assert!(input.actual_entities.is_none());
        assert!(input.context.is_null());
    }

    #[test]
    fn test_aliases_and_locale_keyed_labels() {
        let input: ValidationInput = serde_json::from_value(json!({
            "actual_response_text": "It is 75 degrees in NY",
            "expected_outcome": {
                "expected_intent": "get_weather",
                "expected_entities": {"city": "NY"}
            },
            "validation_rules": {
                "intent_labels": {"en-US": ["get_weather"], "default": ["greeting"]},
                "confirmation_mode": "affirmative"
            }
        }))
        .unwrap();

        assert_eq!(input.actual_response, "It is 75 degrees in NY");
        assert_eq!(input.expected.intent.as_deref(), Some("get_weather"));
        assert_eq!(input.expected.entities["city"], json!("NY"));
        assert!(matches!(
            input.rules.intent_labels,
            Some(IntentLabels::ByLocale(_))
        ));
        assert_eq!(input.rules.confirmation.as_deref(), Some("affirmative"));
    }

    #[test]
    fn test_flat_labels() {
        let rules: ValidationRules =
            serde_json::from_value(json!({"intent_labels": ["a", "b"]})).unwrap();
        assert_eq!(
            rules.intent_labels,
            Some(IntentLabels::Flat(vec!["a".to_string(), "b".to_string()]))
        );
    }

    #[test]
    fn test_builder() {
        let input = ValidationInputBuilder::new("hello")
            .actual_entity("city", "NY")
            .expected_intent("greet")
            .expected_entity("city", "NY")
            .locale("en-US")
            .build();

        assert_eq!(input.actual_response, "hello");
        assert_eq!(input.actual_entities.unwrap()["city"], json!("NY"));
        assert_eq!(input.expected.intent.as_deref(), Some("greet"));
        assert_eq!(input.locale.as_deref(), Some("en-US"));
    }
}
