use crate::checklist::QuestionId;

/// A problem found while validating a checklist definition
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChecklistIssue {
    pub question_id: QuestionId,
    pub severity: Severity,
    pub code: IssueCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    DuplicateId,
    DuplicateQuestion,
    DuplicateOption,
    MissingOptions,
    UnexpectedOptions,
    MissingRule,
    UnusedRule,
    MissingController,
    UnresolvedController,
    SelfReference,
    NonChoiceController,
    EmptyTriggerSet,
    UnknownTriggerValue,
    DependencyCycle,
}
