//! Checklist questions, their conditional rules, and live responses.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub type QuestionId = u64;

/// Input widget of a checklist question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Text,
    Textarea,
    Radio,
    Checkbox,
    Select,
}

impl QuestionType {
    /// Radio, checkbox and select questions offer a fixed option list
    pub fn is_choice(self) -> bool {
        matches!(self, Self::Radio | Self::Checkbox | Self::Select)
    }

    /// Only checkbox questions accept several values at once
    pub fn is_multi_valued(self) -> bool {
        matches!(self, Self::Checkbox)
    }
}

/// How an answer option reflects on the establishment being inspected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub text: String,
    #[serde(rename = "type", alias = "sentiment", default)]
    pub sentiment: Sentiment,
}

impl QuestionOption {
    pub fn new(text: impl Into<String>, sentiment: Sentiment) -> Self {
        Self {
            text: text.into(),
            sentiment,
        }
    }
}

/// Matching rule for set-valued (checkbox) controlling responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// At least one trigger value is selected
    #[default]
    Any,
    /// Every trigger value is selected
    All,
}

/// Gating rule attached to a conditional question.
///
/// Every field is optional on the wire. Incomplete rules are reported by the
/// evaluator, not at load time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalLogic {
    /// Question whose answer controls visibility
    #[serde(
        default,
        alias = "question_id",
        alias = "depends_on_question_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub depends_on: Option<QuestionId>,
    /// Option values that open this question
    #[serde(
        default,
        alias = "depends_on_option_value",
        alias = "depends_on_option_values",
        alias = "values",
        deserialize_with = "one_or_many"
    )]
    pub trigger_values: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_mode: Option<MatchMode>,
}

impl ConditionalLogic {
    pub fn new<I, S>(depends_on: QuestionId, trigger_values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            depends_on: Some(depends_on),
            trigger_values: trigger_values.into_iter().map(Into::into).collect(),
            match_mode: None,
        }
    }

    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = Some(mode);
        self
    }

    /// Trigger values with surrounding whitespace removed, blanks dropped
    pub fn effective_triggers(&self) -> BTreeSet<&str> {
        self.trigger_values
            .iter()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    #[serde(rename = "question", alias = "text")]
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_conditional: bool,
    #[serde(default)]
    pub conditional_logic: Option<ConditionalLogic>,
}

impl Question {
    pub fn new(id: QuestionId, text: impl Into<String>, question_type: QuestionType) -> Self {
        Self {
            id,
            text: text.into(),
            question_type,
            options: Vec::new(),
            is_conditional: false,
            conditional_logic: None,
        }
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = (S, Sentiment)>,
        S: Into<String>,
    {
        self.options = options
            .into_iter()
            .map(|(text, sentiment)| QuestionOption::new(text, sentiment))
            .collect();
        self
    }

    /// Mark the question conditional on `logic`
    pub fn gated_by(mut self, logic: ConditionalLogic) -> Self {
        self.is_conditional = true;
        self.conditional_logic = Some(logic);
        self
    }
}

/// A single answer as captured by the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ResponseValue {
    /// Text, textarea, radio and select answers
    Scalar(String),
    /// Checkbox answers
    Multi(BTreeSet<String>),
}

impl ResponseValue {
    pub fn scalar(value: impl Into<String>) -> Self {
        Self::Scalar(value.into())
    }

    pub fn multi<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Multi(values.into_iter().map(Into::into).collect())
    }

    /// Blank strings and empty selections count as no answer
    pub fn is_unset(&self) -> bool {
        match self {
            Self::Scalar(v) => v.trim().is_empty(),
            Self::Multi(values) => values.iter().all(|v| v.trim().is_empty()),
        }
    }

    /// Selected values, trimmed, blanks dropped
    pub fn selected(&self) -> BTreeSet<&str> {
        match self {
            Self::Scalar(v) => std::iter::once(v.as_str())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .collect(),
            Self::Multi(values) => values
                .iter()
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .collect(),
        }
    }
}

/// Current answers keyed by question id. Owned and mutated by the form layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseMap(BTreeMap<QuestionId, ResponseValue>);

impl ResponseMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: QuestionId, value: ResponseValue) -> Option<ResponseValue> {
        self.0.insert(id, value)
    }

    pub fn remove(&mut self, id: QuestionId) -> Option<ResponseValue> {
        self.0.remove(&id)
    }

    pub fn get(&self, id: QuestionId) -> Option<&ResponseValue> {
        self.0.get(&id)
    }

    /// Response for `id` unless it is missing or blank
    pub fn answered(&self, id: QuestionId) -> Option<&ResponseValue> {
        self.get(id).filter(|v| !v.is_unset())
    }

    pub fn with_scalar(mut self, id: QuestionId, value: impl Into<String>) -> Self {
        self.insert(id, ResponseValue::scalar(value));
        self
    }

    pub fn with_multi<I, S>(mut self, id: QuestionId, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(id, ResponseValue::multi(values));
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &ResponseValue)> {
        self.0.iter()
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
        None => Vec::new(),
    })
}

// The admin server stores flags as tinyint, so 0/1 shows up next to true/false
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(b)) => b,
        Some(Flag::Int(n)) => n != 0,
        None => false,
    })
}
