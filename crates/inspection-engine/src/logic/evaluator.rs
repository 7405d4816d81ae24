use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::logic::graph::{controller_of, dependency_cycles, question_index};
use crate::notify::Notifier;
use inspection_types::{
    ConditionalLogic, MatchMode, Question, QuestionId, QuestionType, ResponseMap,
};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Outcome of a fail-closed visibility check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visibility {
    pub active: bool,
    /// Why the question was hidden, when its rule could not be evaluated
    pub diagnostic: Option<EngineError>,
}

impl Visibility {
    fn evaluated(active: bool) -> Self {
        Self {
            active,
            diagnostic: None,
        }
    }

    fn failed(error: EngineError) -> Self {
        Self {
            active: false,
            diagnostic: Some(error),
        }
    }

    pub fn into_result(self) -> Result<bool> {
        match self.diagnostic {
            Some(error) => Err(error),
            None => Ok(self.active),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionVisibility {
    pub question_id: QuestionId,
    pub active: bool,
}

/// Visibility of every question in a checklist for one response map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecklistVisibility {
    pub questions: Vec<QuestionVisibility>,
    pub diagnostics: Vec<EngineError>,
}

impl ChecklistVisibility {
    pub fn is_visible(&self, id: QuestionId) -> bool {
        self.questions
            .iter()
            .any(|q| q.question_id == id && q.active)
    }

    /// Visible question ids in checklist order
    pub fn active_ids(&self) -> Vec<QuestionId> {
        self.questions
            .iter()
            .filter(|q| q.active)
            .map(|q| q.question_id)
            .collect()
    }

    /// Visible questions still lacking an answer
    pub fn unanswered(&self, responses: &ResponseMap) -> Vec<QuestionId> {
        self.active_ids()
            .into_iter()
            .filter(|id| responses.answered(*id).is_none())
            .collect()
    }
}

/// Evaluates conditional rules against the question set they were defined in
#[derive(Debug, Clone)]
pub struct ConditionalLogicEvaluator<'a> {
    questions: &'a [Question],
    index: HashMap<QuestionId, &'a Question>,
    cycles: BTreeMap<QuestionId, Vec<QuestionId>>,
    checkbox_match: MatchMode,
    cascade_hidden: bool,
}

impl<'a> ConditionalLogicEvaluator<'a> {
    pub fn new(questions: &'a [Question], config: &EngineConfig) -> Self {
        let index = question_index(questions);
        let cycles = dependency_cycles(questions, &index);

        Self {
            questions,
            index,
            cycles,
            checkbox_match: config.checkbox_match,
            cascade_hidden: config.cascade_hidden,
        }
    }

    pub fn question(&self, id: QuestionId) -> Option<&'a Question> {
        self.index.get(&id).copied()
    }

    /// Strict visibility check. Errors on rules that cannot be evaluated.
    pub fn check_active(&self, question: &Question, responses: &ResponseMap) -> Result<bool> {
        if !question.is_conditional {
            return Ok(true);
        }

        let (controller, logic, triggers) = self.resolve_rule(question)?;

        let Some(response) = responses.answered(controller.id) else {
            return Ok(false);
        };
        let selected = response.selected();

        let active = match controller.question_type {
            QuestionType::Checkbox => {
                match logic.match_mode.unwrap_or(self.checkbox_match) {
                    MatchMode::Any => !selected.is_disjoint(&triggers),
                    MatchMode::All => triggers.is_subset(&selected),
                }
            }
            // Single-valued controllers hold one value, so membership and
            // intersection coincide
            _ => !selected.is_disjoint(&triggers),
        };

        Ok(active)
    }

    /// Fail-closed visibility check: malformed rules hide the question
    pub fn is_active(&self, question: &Question, responses: &ResponseMap) -> Visibility {
        match self.check_active(question, responses) {
            Ok(active) => Visibility::evaluated(active),
            Err(error) => Visibility::failed(error),
        }
    }

    /// Visibility of the whole checklist, reporting diagnostics to `notifier`
    pub fn evaluate_all(
        &self,
        responses: &ResponseMap,
        notifier: &dyn Notifier,
    ) -> ChecklistVisibility {
        let mut pass = Pass {
            memo: HashMap::new(),
            diagnostics: Vec::new(),
        };

        // Cycle members are hidden whatever the answers; one diagnostic per cycle
        let mut reported = BTreeSet::new();
        for question in self.questions {
            let Some(chain) = self.cycles.get(&question.id) else {
                continue;
            };
            pass.memo.insert(question.id, false);
            if reported.contains(&question.id) {
                continue;
            }
            reported.extend(chain.iter().copied());
            let chain: Vec<String> = chain.iter().map(|id| id.to_string()).collect();
            pass.diagnostics.push(EngineError::configuration(
                question.id,
                format!("dependency cycle {}", chain.join(" -> ")),
            ));
        }

        let questions: Vec<_> = self
            .questions
            .iter()
            .map(|question| QuestionVisibility {
                question_id: question.id,
                active: self.resolve(question, responses, &mut pass),
            })
            .collect();

        for diagnostic in &pass.diagnostics {
            notifier.notify(diagnostic);
        }

        tracing::debug!(
            questions = questions.len(),
            visible = questions.iter().filter(|q| q.active).count(),
            diagnostics = pass.diagnostics.len(),
            "evaluated checklist visibility"
        );

        ChecklistVisibility {
            questions,
            diagnostics: pass.diagnostics,
        }
    }

    fn resolve_rule<'q>(
        &'q self,
        question: &'q Question,
    ) -> Result<(&'q Question, &'q ConditionalLogic, BTreeSet<&'q str>)> {
        let logic = question.conditional_logic.as_ref().ok_or_else(|| {
            EngineError::configuration(question.id, "conditional question has no rule")
        })?;

        let depends_on = logic.depends_on.ok_or_else(|| {
            EngineError::configuration(question.id, "rule names no controlling question")
        })?;

        let triggers = logic.effective_triggers();
        if triggers.is_empty() {
            return Err(EngineError::configuration(
                question.id,
                "rule has no trigger values",
            ));
        }

        let controller = self
            .question(depends_on)
            .ok_or(EngineError::UnresolvedReference {
                question_id: question.id,
                references: depends_on,
            })?;

        if !controller.question_type.is_choice() {
            return Err(EngineError::configuration(
                question.id,
                format!(
                    "controlling question {} is a {:?} question without options",
                    controller.id, controller.question_type
                ),
            ));
        }

        Ok((controller, logic, triggers))
    }

    fn resolve(&self, question: &'a Question, responses: &ResponseMap, pass: &mut Pass) -> bool {
        if let Some(&active) = pass.memo.get(&question.id) {
            return active;
        }

        let direct = self.is_active(question, responses);
        let mut active = direct.active;
        if let Some(diagnostic) = direct.diagnostic {
            pass.diagnostics.push(diagnostic);
        }

        if active && self.cascade_hidden {
            // Cycle members are memoized up front, so this walk always ends
            if let Some(controller) = controller_of(question).and_then(|id| self.question(id)) {
                active = self.resolve(controller, responses, pass);
            }
        }

        pass.memo.insert(question.id, active);
        active
    }
}

struct Pass {
    memo: HashMap<QuestionId, bool>,
    diagnostics: Vec<EngineError>,
}
