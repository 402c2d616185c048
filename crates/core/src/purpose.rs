//! Purpose test questionnaire and summary construction.

use crate::error::CoreError;

/// The questions shown by the purpose test, in order.
pub const QUESTIONS: &[&str] = &[
    "What problem do you most want to solve in the world?",
    "What activity makes you lose track of time?",
    "If you could teach one thing to millions, what would it be?",
    "When do you feel most alive or fulfilled?",
];

/// Separator placed between answers in the stored summary.
pub const SUMMARY_SEPARATOR: &str = " | ";

/// Return the indexes of answers that are blank after trimming.
///
/// Questions with no answer at all (a short slice) count as blank.
pub fn blank_answers(answers: &[String]) -> Vec<usize> {
    (0..QUESTIONS.len())
        .filter(|&i| answers.get(i).map_or(true, |a| a.trim().is_empty()))
        .collect()
}

/// Check that there is exactly one non-blank answer per question.
pub fn validate_answers(answers: &[String]) -> Result<(), CoreError> {
    if answers.len() != QUESTIONS.len() {
        return Err(CoreError::Validation(format!(
            "Expected {} answers, got {}",
            QUESTIONS.len(),
            answers.len()
        )));
    }

    let blank = blank_answers(answers);
    if !blank.is_empty() {
        return Err(CoreError::Validation(format!(
            "Answers required for questions {blank:?}"
        )));
    }

    Ok(())
}

/// Join validated answers into the summary stored on the user.
pub fn summarize(answers: &[String]) -> Result<String, CoreError> {
    validate_answers(answers)?;
    Ok(answers.join(SUMMARY_SEPARATOR))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn summary_joins_answers_with_pipes() {
        let summary = summarize(&answers(&["a", "b", "c", "d"])).unwrap();
        assert_eq!(summary, "a | b | c | d");
    }

    #[test]
    fn whitespace_only_answer_is_blank() {
        let blank = blank_answers(&answers(&["a", "  ", "c", ""]));
        assert_eq!(blank, vec![1, 3]);
        assert!(summarize(&answers(&["a", "  ", "c", "d"])).is_err());
    }

    #[test]
    fn missing_answers_are_blank() {
        assert_eq!(blank_answers(&answers(&["a"])), vec![1, 2, 3]);
        assert!(validate_answers(&answers(&["a"])).is_err());
    }

    #[test]
    fn too_many_answers_rejected() {
        assert!(validate_answers(&answers(&["a", "b", "c", "d", "e"])).is_err());
    }
}
