use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A quiz is usable by students only once it carries at least one question.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub class_id: String,
    pub title: String,
    pub description: Option<String>,
    pub questions: Vec<Question>,
    pub order: i16,
    /// Countdown budget for an attempt. `None` means untimed.
    pub time_limit_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// 2 to 4 options; `correct_answer` indexes into this list.
    pub options: Vec<QuestionOption>,
    pub correct_answer: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionOption {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Quiz {
    pub fn new(class_id: &str, title: &str, questions: Vec<Question>, order: i16) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            class_id: class_id.to_string(),
            title: title.to_string(),
            description: None,
            questions,
            order,
            time_limit_minutes: None,
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        }
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

impl Question {
    /// A well-formed question has 2-4 non-empty options and an in-bounds
    /// correct-answer index.
    pub fn is_well_formed(&self) -> bool {
        (2..=4).contains(&self.options.len())
            && self.correct_answer < self.options.len()
            && self.options.iter().all(|o| !o.text.trim().is_empty())
    }
}
