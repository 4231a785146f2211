//! Signal extraction: transcript, locale and candidate intents.
//!
//! Every accessor has an explicit default. Nothing here fails on a malformed
//! or partially empty input.

use serde_json::Value;
use std::collections::BTreeSet;

use crate::models::{EntityMap, IntentLabels, ValidationInput, ValidationRules};

/// Entity keys consulted for a transcript, in priority order.
pub const TRANSCRIPT_KEYS: &[&str] = &[
    "transcript",
    "formatted_transcription",
    "raw_transcription",
];

/// Key under which a locale may be reported in the actual entities.
pub const LOCALE_KEY: &str = "locale";

/// Locale entry merged into every locale-keyed label set.
pub const DEFAULT_LOCALE_KEY: &str = "default";

/// Label used when no candidate intents are known.
pub const UNKNOWN_INTENT: &str = "unknown_intent";

/// Signals resolved from one validation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedSignals {
    /// Text that scoring and tolerance checks run against. Empty when
    /// neither a transcript nor response text exists.
    pub text: String,
    /// Resolved locale
    pub locale: Option<String>,
    /// Candidate intents for classification, never empty
    pub candidate_intents: BTreeSet<String>,
}

/// Resolves the inputs shared by all downstream components.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalExtractor;

impl SignalExtractor {
    /// Resolve all signals for an input.
    ///
    /// The text is the transcript found in the actual entities, falling back
    /// to the response text. The locale comes from the actual entities, then
    /// the input itself, then the rules.
    pub fn extract(input: &ValidationInput) -> ExtractedSignals {
        let text = Self::usable_text(input);

        let empty = EntityMap::new();
        let entities = input.actual_entities.as_ref().unwrap_or(&empty);
        let locale = locale_from_entities(entities)
            .or_else(|| non_empty(input.locale.as_deref()))
            .or_else(|| non_empty(input.rules.locale.as_deref()));

        let candidate_intents = Self::collect_candidate_intents(
            input.expected.intent.as_deref(),
            &input.rules,
            locale.as_deref(),
        );

        ExtractedSignals {
            text,
            locale,
            candidate_intents,
        }
    }

    /// Transcript from the actual entities, else the trimmed response text.
    pub fn usable_text(input: &ValidationInput) -> String {
        let transcript = input
            .actual_entities
            .as_ref()
            .map(Self::resolve_transcript)
            .unwrap_or_default();
        if transcript.trim().is_empty() {
            input.actual_response.trim().to_string()
        } else {
            transcript
        }
    }

    /// First non-empty transcript field, or an empty string.
    pub fn resolve_transcript(entities: &EntityMap) -> String {
        TRANSCRIPT_KEYS
            .iter()
            .filter_map(|key| entities.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .find(|value| !value.is_empty())
            .unwrap_or_default()
            .to_string()
    }

    /// Locale from the actual entities, else from the rules.
    pub fn resolve_locale(actual_entities: &EntityMap, rules: &ValidationRules) -> Option<String> {
        locale_from_entities(actual_entities).or_else(|| non_empty(rules.locale.as_deref()))
    }

    /// Candidate intent labels for classification.
    ///
    /// Merges the configured labels (flat, or the resolved locale's entry plus
    /// the `"default"` entry) with the expected intent. Falls back to
    /// [`UNKNOWN_INTENT`] so there is always at least one candidate.
    pub fn collect_candidate_intents(
        expected_intent: Option<&str>,
        rules: &ValidationRules,
        locale: Option<&str>,
    ) -> BTreeSet<String> {
        let mut labels: BTreeSet<String> = match &rules.intent_labels {
            Some(IntentLabels::Flat(labels)) => labels.iter().cloned().collect(),
            Some(IntentLabels::ByLocale(by_locale)) => {
                let mut merged = BTreeSet::new();
                if let Some(locale) = locale
                    && let Some(labels) = by_locale.get(locale)
                {
                    merged.extend(labels.iter().cloned());
                }
                if let Some(labels) = by_locale.get(DEFAULT_LOCALE_KEY) {
                    merged.extend(labels.iter().cloned());
                }
                merged
            }
            None => BTreeSet::new(),
        };

        labels.retain(|label| !label.trim().is_empty());

        if let Some(expected) = non_empty(expected_intent) {
            labels.insert(expected);
        }

        if labels.is_empty() {
            labels.insert(UNKNOWN_INTENT.to_string());
        }

        labels
    }
}

fn locale_from_entities(entities: &EntityMap) -> Option<String> {
    non_empty(entities.get(LOCALE_KEY).and_then(Value::as_str))
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ValidationInputBuilder;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn entities(value: Value) -> EntityMap {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_transcript_priority() {
        let map = entities(json!({
            "raw_transcription": "raw",
            "formatted_transcription": "formatted",
            "transcript": "explicit"
        }));
        assert_eq!(SignalExtractor::resolve_transcript(&map), "explicit");

        let map = entities(json!({
            "transcript": "  ",
            "formatted_transcription": "formatted",
            "raw_transcription": "raw"
        }));
        assert_eq!(SignalExtractor::resolve_transcript(&map), "formatted");

        let map = entities(json!({"raw_transcription": "raw"}));
        assert_eq!(SignalExtractor::resolve_transcript(&map), "raw");
    }

    #[test]
    fn test_transcript_defaults_to_empty() {
        assert_eq!(SignalExtractor::resolve_transcript(&EntityMap::new()), "");
        let map = entities(json!({"transcript": 42}));
        assert_eq!(SignalExtractor::resolve_transcript(&map), "");
    }

    #[test]
    fn test_locale_resolution() {
        let rules = ValidationRules {
            locale: Some("fr-FR".to_string()),
            ..Default::default()
        };
        let map = entities(json!({"locale": "en-US"}));
        assert_eq!(
            SignalExtractor::resolve_locale(&map, &rules).as_deref(),
            Some("en-US")
        );
        assert_eq!(
            SignalExtractor::resolve_locale(&EntityMap::new(), &rules).as_deref(),
            Some("fr-FR")
        );
        assert_eq!(
            SignalExtractor::resolve_locale(&EntityMap::new(), &ValidationRules::default()),
            None
        );
    }

    #[test]
    fn test_flat_candidate_intents_include_expected() {
        let rules = ValidationRules {
            intent_labels: Some(IntentLabels::Flat(vec![
                "get_weather".to_string(),
                "set_timer".to_string(),
            ])),
            ..Default::default()
        };
        let labels = SignalExtractor::collect_candidate_intents(Some("play_music"), &rules, None);
        assert_eq!(labels.len(), 3);
        assert!(labels.contains("play_music"));
    }

    #[test]
    fn test_locale_keyed_candidate_intents() {
        let mut by_locale = BTreeMap::new();
        by_locale.insert("en-US".to_string(), vec!["get_weather".to_string()]);
        by_locale.insert("de-DE".to_string(), vec!["wetter".to_string()]);
        by_locale.insert("default".to_string(), vec!["greeting".to_string()]);
        let rules = ValidationRules {
            intent_labels: Some(IntentLabels::ByLocale(by_locale)),
            ..Default::default()
        };

        let labels = SignalExtractor::collect_candidate_intents(None, &rules, Some("en-US"));
        let expected: BTreeSet<String> = ["get_weather", "greeting"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(labels, expected);

        let labels = SignalExtractor::collect_candidate_intents(None, &rules, None);
        assert_eq!(labels.len(), 1);
        assert!(labels.contains("greeting"));
    }

    #[test]
    fn test_candidate_intents_fall_back_to_unknown() {
        let labels =
            SignalExtractor::collect_candidate_intents(None, &ValidationRules::default(), None);
        assert_eq!(labels.len(), 1);
        assert!(labels.contains(UNKNOWN_INTENT));

        let labels = SignalExtractor::collect_candidate_intents(
            Some("  "),
            &ValidationRules::default(),
            None,
        );
        assert!(labels.contains(UNKNOWN_INTENT));
    }

    #[test]
    fn test_extract_falls_back_to_response_text() {
        let input = ValidationInputBuilder::new("  It is sunny  ")
            .actual_entity("city", "NY")
            .locale("en-GB")
            .build();
        let signals = SignalExtractor::extract(&input);
        assert_eq!(signals.text, "It is sunny");
        assert_eq!(signals.locale.as_deref(), Some("en-GB"));
        assert!(signals.candidate_intents.contains(UNKNOWN_INTENT));
    }

    #[test]
    fn test_extract_prefers_transcript_and_entity_locale() {
        let input = ValidationInputBuilder::new("response text")
            .actual_entity("transcript", "spoken text")
            .actual_entity("locale", "en-US")
            .locale("en-GB")
            .expected_intent("get_weather")
            .build();
        let signals = SignalExtractor::extract(&input);
        assert_eq!(signals.text, "spoken text");
        assert_eq!(signals.locale.as_deref(), Some("en-US"));
        assert!(signals.candidate_intents.contains("get_weather"));
    }

    #[test]
    fn test_usable_text_empty_when_nothing_spoken() {
        let input = ValidationInputBuilder::new("   ")
            .actual_entity("transcript", "")
            .build();
        assert_eq!(SignalExtractor::usable_text(&input), "");
    }
}
