//! Value types exchanged between the engine's components.

pub mod decision;
pub mod input;
pub mod scores;

pub use decision::{Decision, PartialSuccess, ReviewStatus};
pub use input::{
    EntityMap, ExpectedOutcome, IntentLabels, ValidationInput, ValidationInputBuilder,
    ValidationRules,
};
pub use scores::{MissingReason, MissingSignal, ScoreSet, Signal};
