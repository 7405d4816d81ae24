use inspection_types::QuestionId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Conditional rule of question {question_id} is malformed: {reason}")]
    Configuration {
        question_id: QuestionId,
        reason: String,
    },

    #[error("Question {question_id} depends on unknown question {references}")]
    UnresolvedReference {
        question_id: QuestionId,
        references: QuestionId,
    },

    #[error("Invalid value for {field}: {found}")]
    InvalidData { field: String, found: String },
}

impl EngineError {
    pub fn configuration(question_id: QuestionId, reason: impl Into<String>) -> Self {
        Self::Configuration {
            question_id,
            reason: reason.into(),
        }
    }

    pub fn invalid_data(field: impl Into<String>, found: impl ToString) -> Self {
        Self::InvalidData {
            field: field.into(),
            found: found.to_string(),
        }
    }

    /// Question the diagnostic is about, if any
    pub fn question_id(&self) -> Option<QuestionId> {
        match self {
            Self::Configuration { question_id, .. }
            | Self::UnresolvedReference { question_id, .. } => Some(*question_id),
            Self::InvalidData { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
