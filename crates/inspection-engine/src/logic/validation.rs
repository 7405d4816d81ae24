//! Static checks on a checklist definition before it is saved.
//!
//! Findings are returned, never raised, so the category editor can show them
//! all at once.

use crate::logic::graph::{dependency_cycles, question_index};
use crate::logic::options::available_trigger_options;
use inspection_types::{ChecklistIssue, IssueCode, Question, QuestionId, Severity};
use std::collections::{HashMap, HashSet};

/// Validate question texts, option lists and conditional rules
pub fn validate_checklist(questions: &[Question]) -> Vec<ChecklistIssue> {
    let mut issues = Vec::new();

    issues.extend(check_duplicate_ids(questions));
    issues.extend(check_duplicate_questions(questions));
    for question in questions {
        issues.extend(check_options(question));
    }

    let index = question_index(questions);
    for question in questions {
        issues.extend(check_rule(question, &index));
    }
    issues.extend(check_cycles(questions, &index));

    issues
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

fn issue(
    question_id: QuestionId,
    severity: Severity,
    code: IssueCode,
    message: String,
) -> ChecklistIssue {
    ChecklistIssue {
        question_id,
        severity,
        code,
        message,
    }
}

fn check_duplicate_ids(questions: &[Question]) -> Vec<ChecklistIssue> {
    let mut seen = HashSet::new();
    questions
        .iter()
        .filter(|q| !seen.insert(q.id))
        .map(|q| {
            issue(
                q.id,
                Severity::Critical,
                IssueCode::DuplicateId,
                format!(
                    "Question \"{}\" reuses id {}; rules resolve to the first question with it",
                    q.text.trim(),
                    q.id
                ),
            )
        })
        .collect()
}

fn check_duplicate_questions(questions: &[Question]) -> Vec<ChecklistIssue> {
    let mut issues = Vec::new();
    let mut seen: HashMap<String, QuestionId> = HashMap::new();

    for question in questions {
        let key = normalize(&question.text);
        if key.is_empty() {
            continue;
        }
        if let Some(first) = seen.get(&key) {
            issues.push(issue(
                question.id,
                Severity::Critical,
                IssueCode::DuplicateQuestion,
                format!(
                    "Question \"{}\" duplicates question {}",
                    question.text.trim(),
                    first
                ),
            ));
        } else {
            seen.insert(key, question.id);
        }
    }

    issues
}

fn check_options(question: &Question) -> Vec<ChecklistIssue> {
    let mut issues = Vec::new();

    if !question.question_type.is_choice() {
        if !question.options.is_empty() {
            issues.push(issue(
                question.id,
                Severity::Warning,
                IssueCode::UnexpectedOptions,
                format!(
                    "{:?} question carries {} option(s) that will be ignored",
                    question.question_type,
                    question.options.len()
                ),
            ));
        }
        return issues;
    }

    if available_trigger_options(question).is_empty() {
        issues.push(issue(
            question.id,
            Severity::Critical,
            IssueCode::MissingOptions,
            format!(
                "{:?} question needs at least one option",
                question.question_type
            ),
        ));
    }

    let mut seen = HashSet::new();
    for option in &question.options {
        let key = normalize(&option.text);
        if !key.is_empty() && !seen.insert(key) {
            issues.push(issue(
                question.id,
                Severity::Critical,
                IssueCode::DuplicateOption,
                format!("Option \"{}\" is listed more than once", option.text.trim()),
            ));
        }
    }

    issues
}

fn check_rule(question: &Question, index: &HashMap<QuestionId, &Question>) -> Vec<ChecklistIssue> {
    let mut issues = Vec::new();

    let Some(logic) = question.conditional_logic.as_ref() else {
        if question.is_conditional {
            issues.push(issue(
                question.id,
                Severity::Critical,
                IssueCode::MissingRule,
                "Conditional question has no rule".to_string(),
            ));
        }
        return issues;
    };

    if !question.is_conditional {
        issues.push(issue(
            question.id,
            Severity::Warning,
            IssueCode::UnusedRule,
            "Rule is ignored because the question is not conditional".to_string(),
        ));
        return issues;
    }

    let triggers = logic.effective_triggers();
    if triggers.is_empty() {
        issues.push(issue(
            question.id,
            Severity::Critical,
            IssueCode::EmptyTriggerSet,
            "Rule has no trigger values".to_string(),
        ));
    }

    let Some(depends_on) = logic.depends_on else {
        issues.push(issue(
            question.id,
            Severity::Critical,
            IssueCode::MissingController,
            "Rule names no controlling question".to_string(),
        ));
        return issues;
    };

    if depends_on == question.id {
        issues.push(issue(
            question.id,
            Severity::Warning,
            IssueCode::SelfReference,
            "Rule depends on the question's own answer".to_string(),
        ));
    }

    let Some(controller) = index.get(&depends_on) else {
        issues.push(issue(
            question.id,
            Severity::Critical,
            IssueCode::UnresolvedController,
            format!("Rule depends on unknown question {}", depends_on),
        ));
        return issues;
    };

    if !controller.question_type.is_choice() {
        issues.push(issue(
            question.id,
            Severity::Critical,
            IssueCode::NonChoiceController,
            format!(
                "Controlling question {} is a {:?} question without options",
                controller.id, controller.question_type
            ),
        ));
        return issues;
    }

    let offered: HashSet<&str> = available_trigger_options(controller)
        .into_iter()
        .map(str::trim)
        .collect();
    for value in triggers {
        if !offered.contains(value) {
            issues.push(issue(
                question.id,
                Severity::Warning,
                IssueCode::UnknownTriggerValue,
                format!(
                    "Trigger value \"{}\" is not an option of question {}",
                    value, controller.id
                ),
            ));
        }
    }

    issues
}

fn check_cycles(
    questions: &[Question],
    index: &HashMap<QuestionId, &Question>,
) -> Vec<ChecklistIssue> {
    dependency_cycles(questions, index)
        .into_iter()
        .map(|(question_id, chain)| {
            let chain: Vec<String> = chain.iter().map(|id| id.to_string()).collect();
            issue(
                question_id,
                Severity::Critical,
                IssueCode::DependencyCycle,
                format!("Question is part of dependency cycle {}", chain.join(" -> ")),
            )
        })
        .collect()
}
