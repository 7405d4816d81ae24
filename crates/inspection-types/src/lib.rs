//! Shared data model for inspection checklists and inspection reports.
//!
//! These types mirror the page-load payloads delivered by the admin server and
//! carry no evaluation logic; see `inspection-engine` for that.

pub mod checklist;
pub mod issue;
pub mod report;

pub use checklist::{
    ConditionalLogic, MatchMode, Question, QuestionId, QuestionOption, QuestionType,
    ResponseMap, ResponseValue, Sentiment,
};
pub use issue::{ChecklistIssue, IssueCode, Severity};
pub use report::{
    ChartData, ChartDataset, InspectionCountRecord, Metric, Quarter, ReportKind, ReportSnapshot,
    SeriesPoint,
};
