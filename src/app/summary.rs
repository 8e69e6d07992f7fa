//! Figures shown in the admin sidebar, computed from already loaded data.

use crate::models::{Question, TestAttempt, rounded_percentage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSummary<'a> {
    pub question_count: usize,
    pub total_attempts: usize,
    /// Rounded share of correct answers over every loaded attempt.
    pub accuracy: u32,
    /// The server lists attempts newest first.
    pub latest_attempt: Option<&'a TestAttempt>,
}

impl<'a> AdminSummary<'a> {
    pub fn compute(questions: &[Question], attempts: &'a [TestAttempt]) -> Self {
        let answered: u64 = attempts.iter().map(|a| a.total_questions as u64).sum();
        let correct: u64 = attempts.iter().map(|a| a.correct_answers as u64).sum();

        Self {
            question_count: questions.len(),
            total_attempts: attempts.len(),
            accuracy: rounded_percentage(correct, answered),
            latest_attempt: attempts.first(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn attempt(id: u64, correct: u32, total: u32) -> TestAttempt {
        TestAttempt {
            id,
            first_name: format!("Ism{}", id),
            last_name: "Familiya".to_string(),
            total_questions: total,
            correct_answers: correct,
            incorrect_answers: total - correct,
            created_at: Utc.with_ymd_and_hms(2025, 1, id as u32, 12, 0, 0).unwrap(),
            answers: Vec::new(),
        }
    }

    #[test]
    fn empty_lists_give_zero_accuracy() {
        let summary = AdminSummary::compute(&[], &[]);
        assert_eq!(summary.question_count, 0);
        assert_eq!(summary.total_attempts, 0);
        assert_eq!(summary.accuracy, 0);
        assert!(summary.latest_attempt.is_none());
    }

    #[test]
    fn accuracy_is_weighted_by_question_count() {
        // 3/4 and 1/6 -> 4/10, not the mean of 75% and 17%.
        let attempts = vec![attempt(2, 3, 4), attempt(1, 1, 6)];
        let summary = AdminSummary::compute(&[], &attempts);
        assert_eq!(summary.total_attempts, 2);
        assert_eq!(summary.accuracy, 40);
        assert_eq!(summary.latest_attempt.map(|a| a.id), Some(2));
    }

    #[test]
    fn accuracy_rounds_to_nearest() {
        let attempts = vec![attempt(1, 2, 3)];
        assert_eq!(AdminSummary::compute(&[], &attempts).accuracy, 67);
    }

    #[test]
    fn zero_question_attempts_do_not_divide_by_zero() {
        let attempts = vec![attempt(1, 0, 0)];
        let summary = AdminSummary::compute(&[], &attempts);
        assert_eq!(summary.accuracy, 0);
        assert_eq!(attempts[0].percentage(), 0);
    }
}
