//! Dependency graph shared by the evaluator and validation.

use inspection_types::{Question, QuestionId};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Index questions by id. The first definition of a repeated id wins.
pub fn question_index(questions: &[Question]) -> HashMap<QuestionId, &Question> {
    let mut index = HashMap::with_capacity(questions.len());
    for question in questions {
        index.entry(question.id).or_insert(question);
    }
    index
}

/// Controlling question of a conditional rule, ignoring self-references
pub fn controller_of(question: &Question) -> Option<QuestionId> {
    if !question.is_conditional {
        return None;
    }
    question
        .conditional_logic
        .as_ref()
        .and_then(|logic| logic.depends_on)
        .filter(|id| *id != question.id)
}

/// Every question that sits on a dependency cycle, mapped to the cycle walked
/// from that question back to itself (`[1, 2, 1]`).
///
/// Depends only on the rules, never on answers.
pub fn dependency_cycles(
    questions: &[Question],
    index: &HashMap<QuestionId, &Question>,
) -> BTreeMap<QuestionId, Vec<QuestionId>> {
    let mut cycles = BTreeMap::new();

    for question in questions {
        if cycles.contains_key(&question.id) {
            continue;
        }
        let Some(start) = index.get(&question.id) else {
            continue;
        };

        let mut chain = vec![start.id];
        let mut visited = HashSet::from([start.id]);
        let mut current = controller_of(start);

        while let Some(id) = current {
            if id == start.id {
                chain.push(id);
                cycles.insert(start.id, chain);
                break;
            }
            if !visited.insert(id) {
                // Cycle further up the chain, recorded from its own members
                break;
            }
            chain.push(id);
            current = index.get(&id).and_then(|q| controller_of(q));
        }
    }

    cycles
}
