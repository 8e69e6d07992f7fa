use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One answered question inside an attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptAnswer {
    pub id: u64,
    pub question: u64,
    pub question_text: String,
    pub selected_option: u64,
    pub option_text: String,
    pub is_correct: bool,
}

/// A scored submission, as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestAttempt {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub incorrect_answers: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub answers: Vec<AttemptAnswer>,
}

impl TestAttempt {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// `correct/total`, e.g. `7/10`.
    pub fn score_label(&self) -> String {
        format!("{}/{}", self.correct_answers, self.total_questions)
    }

    /// Rounded percentage of correct answers; 0 for an empty attempt.
    pub fn percentage(&self) -> u32 {
        rounded_percentage(self.correct_answers as u64, self.total_questions as u64)
    }
}

pub(crate) fn rounded_percentage(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

/// Body of `POST /attempts/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttemptSubmission {
    pub first_name: String,
    pub last_name: String,
    pub responses: Vec<AttemptResponse>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttemptResponse {
    pub question: u64,
    pub option: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ATTEMPT: &str = r#"{
        "id": 12,
        "first_name": "Elyor",
        "last_name": "Karimov",
        "total_questions": 3,
        "correct_answers": 2,
        "incorrect_answers": 1,
        "created_at": "2025-03-01T09:30:00.123456Z",
        "answers": [
            {"id": 1, "question": 5, "question_text": "Q", "selected_option": 9,
             "option_text": "A", "is_correct": true}
        ]
    }"#;

    #[test]
    fn parses_server_attempt() {
        let attempt: TestAttempt = serde_json::from_str(ATTEMPT).unwrap();
        assert_eq!(attempt.full_name(), "Elyor Karimov");
        assert_eq!(attempt.score_label(), "2/3");
        assert_eq!(attempt.percentage(), 67);
        assert_eq!(attempt.answers.len(), 1);
        assert!(attempt.answers[0].is_correct);
    }

    #[test]
    fn percentage_of_empty_attempt_is_zero() {
        assert_eq!(rounded_percentage(0, 0), 0);
        assert_eq!(rounded_percentage(1, 2), 50);
        assert_eq!(rounded_percentage(1, 3), 33);
    }
}
