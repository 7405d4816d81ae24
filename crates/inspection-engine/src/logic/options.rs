// Option lists offered by the rule builder
use inspection_types::Question;

/// Option values a rule may use as triggers, in display order.
///
/// Blank options are skipped. Text and textarea questions have none.
pub fn available_trigger_options(question: &Question) -> Vec<&str> {
    if !question.question_type.is_choice() {
        return Vec::new();
    }

    question
        .options
        .iter()
        .map(|option| option.text.as_str())
        .filter(|text| !text.trim().is_empty())
        .collect()
}

/// Questions that can control `target`: other choice questions with at least
/// one usable option
pub fn rule_candidates<'a>(questions: &'a [Question], target: &Question) -> Vec<&'a Question> {
    questions
        .iter()
        .filter(|q| q.id != target.id)
        .filter(|q| !available_trigger_options(q).is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use inspection_types::QuestionType;
    use inspection_types::Sentiment::{Negative, Neutral, Positive};

    #[test]
    fn test_skips_blank_options() {
        let question = Question::new(1, "Water source", QuestionType::Select).with_options([
            ("Municipal", Positive),
            ("  ", Neutral),
            ("", Neutral),
            ("Well", Negative),
        ]);
        assert_eq!(available_trigger_options(&question), vec!["Municipal", "Well"]);
    }

    #[test]
    fn test_text_questions_offer_nothing() {
        let question = Question::new(1, "Remarks", QuestionType::Textarea);
        assert!(available_trigger_options(&question).is_empty());

        // Stray options on a free-text question are still not offered
        let stray = Question::new(2, "Name", QuestionType::Text).with_options([("x", Neutral)]);
        assert!(available_trigger_options(&stray).is_empty());
    }

    #[test]
    fn test_rule_candidates_exclude_target_and_free_text() {
        let questions = vec![
            Question::new(1, "Serve food?", QuestionType::Radio)
                .with_options([("Yes", Positive), ("No", Neutral)]),
            Question::new(2, "Remarks", QuestionType::Textarea),
            Question::new(3, "Pests", QuestionType::Checkbox).with_options([("Rodents", Negative)]),
            Question::new(4, "Empty select", QuestionType::Select),
        ];
        let ids: Vec<_> = rule_candidates(&questions, &questions[2])
            .iter()
            .map(|q| q.id)
            .collect();
        assert_eq!(ids, vec![1]);
    }
}
