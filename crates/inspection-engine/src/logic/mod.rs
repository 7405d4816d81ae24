//! Conditional question branching
//!
//! A conditional question is shown only while the question it depends on
//! holds one of the rule's trigger values. Evaluation never mutates the
//! response map and always fails closed: a question whose rule cannot be
//! evaluated is hidden and a diagnostic is returned alongside.

pub mod evaluator;
pub mod graph;
pub mod options;
pub mod validation;

pub use evaluator::{
    ChecklistVisibility, ConditionalLogicEvaluator, QuestionVisibility, Visibility,
};
pub use options::{available_trigger_options, rule_candidates};
pub use validation::validate_checklist;
