//! Conversational reference resolution.
//!
//! Maps phrases like "the second one" to an item of an ordered list held in
//! the per-conversation context, e.g. the results of a previous search.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ReferenceConfig;
use crate::text::{contains_word, find_word, normalize};

/// Result of resolving a reference in one evaluation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReferenceOutcome {
    /// Phrase that was recognised, if any
    pub phrase: Option<String>,
    /// Context item the phrase resolved to
    pub resolved: Option<Value>,
    /// Item the test case expected, if any
    pub expected: Option<Value>,
    /// Whether `resolved` equals `expected`; `None` when nothing was expected
    pub matched: Option<bool>,
}

/// Resolves ordinal and demonstrative references.
#[derive(Debug, Clone)]
pub struct ReferenceResolver {
    context_key: String,
    // (normalized phrase, index)
    ordinals: Vec<(String, usize)>,
    demonstratives: Vec<String>,
}

impl ReferenceResolver {
    /// Create a resolver from configuration.
    pub fn new(config: &ReferenceConfig) -> Self {
        Self {
            context_key: config.context_key.clone(),
            ordinals: config
                .ordinals
                .iter()
                .map(|o| (normalize(o.phrase.trim()), o.index))
                .collect(),
            demonstratives: config
                .demonstratives
                .iter()
                .map(|d| normalize(d.trim()))
                .filter(|d| !d.is_empty())
                .collect(),
        }
    }

    /// Resolve a reference in `text` against the ordered list in `context`.
    ///
    /// Returns `None` when the context has no list under the configured key,
    /// when no known phrase occurs in the text, or when the index is out of
    /// range. When several phrases occur, the earliest wins, and the longest
    /// among phrases starting at the same position.
    pub fn resolve_dynamic_reference(&self, text: &str, context: &Value) -> Option<Value> {
        self.resolve_with_phrase(text, context).map(|(_, item)| item)
    }

    /// Resolve `text` and compare against the expected item.
    ///
    /// Returns `None` when nothing was expected and nothing resolved.
    pub fn resolve_against(
        &self,
        text: &str,
        context: &Value,
        expected: Option<&Value>,
    ) -> Option<ReferenceOutcome> {
        let resolved = self.resolve_with_phrase(text, context);
        if resolved.is_none() && expected.is_none() {
            return None;
        }

        let (phrase, resolved) = match resolved {
            Some((phrase, item)) => (Some(phrase), Some(item)),
            None => (None, None),
        };
        let matched = expected.map(|expected| resolved.as_ref() == Some(expected));

        Some(ReferenceOutcome {
            phrase,
            resolved,
            expected: expected.cloned(),
            matched,
        })
    }

    fn resolve_with_phrase(&self, text: &str, context: &Value) -> Option<(String, Value)> {
        let items = context.get(&self.context_key)?.as_array()?;
        let text = normalize(text);

        let ordinal = self
            .ordinals
            .iter()
            .filter_map(|(phrase, index)| find_word(&text, phrase).map(|pos| (pos, phrase, *index)))
            .min_by(|a, b| a.0.cmp(&b.0).then(b.1.len().cmp(&a.1.len())));

        if let Some((_, phrase, index)) = ordinal {
            let item = items.get(index)?;
            tracing::debug!(phrase = %phrase, index, "Resolved ordinal reference");
            return Some((phrase.clone(), item.clone()));
        }

        // A demonstrative is only unambiguous against a single candidate
        let demonstrative = self
            .demonstratives
            .iter()
            .find(|phrase| contains_word(&text, phrase))?;
        match items.as_slice() {
            [only] => Some((demonstrative.clone(), only.clone())),
            _ => {
                tracing::debug!(
                    phrase = %demonstrative,
                    candidates = items.len(),
                    "Demonstrative reference is ambiguous"
                );
                None
            }
        }
    }
}

impl Default for ReferenceResolver {
    fn default() -> Self {
        Self::new(&ReferenceConfig::default())
    }
}
