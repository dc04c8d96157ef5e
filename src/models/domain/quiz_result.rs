use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Composite key for a quiz outcome. One student holds at most one result
/// per quiz; writing through this key makes submission an upsert rather
/// than an insert, so a second submission overwrites instead of duplicating.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResultKey {
    pub quiz_id: String,
    pub student_id: String,
}

impl ResultKey {
    pub fn new(quiz_id: &str, student_id: &str) -> Self {
        Self {
            quiz_id: quiz_id.to_string(),
            student_id: student_id.to_string(),
        }
    }

    /// The single place the composite key is rendered into a document id.
    pub fn document_id(&self) -> String {
        format!("{}:{}", self.quiz_id, self.student_id)
    }
}

impl fmt::Display for ResultKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.document_id())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizResult {
    pub id: String,
    pub quiz_id: String,
    pub student_id: String,
    /// Count of exactly-matched answers, never exceeds `total_questions`.
    pub score: u32,
    pub total_questions: u32,
    pub answers: Vec<SelectedAnswer>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SelectedAnswer {
    pub question_index: usize,
    pub selected_option: usize,
}

impl QuizResult {
    pub fn new(
        key: &ResultKey,
        score: u32,
        total_questions: u32,
        answers: &BTreeMap<usize, usize>,
    ) -> Self {
        QuizResult {
            id: key.document_id(),
            quiz_id: key.quiz_id.clone(),
            student_id: key.student_id.clone(),
            score,
            total_questions,
            answers: answers
                .iter()
                .map(|(&question_index, &selected_option)| SelectedAnswer {
                    question_index,
                    selected_option,
                })
                .collect(),
            submitted_at: Utc::now(),
        }
    }

    pub fn key(&self) -> ResultKey {
        ResultKey::new(&self.quiz_id, &self.student_id)
    }

    /// An empty quiz scores 0% rather than dividing by zero.
    pub fn percentage(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        self.score as f64 / self.total_questions as f64 * 100.0
    }

    pub fn selected_option(&self, question_index: usize) -> Option<usize> {
        self.answers
            .iter()
            .find(|a| a.question_index == question_index)
            .map(|a| a.selected_option)
    }
}
