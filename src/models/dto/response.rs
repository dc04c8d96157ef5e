use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{Quiz, QuizResult};

/// What a quiz-taking client sees after any session operation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionView {
    InProgress(InProgressView),
    Completed(ReviewView),
}

#[derive(Debug, Clone, Serialize)]
pub struct InProgressView {
    pub quiz_id: String,
    pub title: String,
    pub current_question: usize,
    pub total_questions: usize,
    pub question: QuestionView,
    pub selected_option: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewView {
    pub quiz_id: String,
    pub title: String,
    pub score: u32,
    pub total_questions: u32,
    pub percentage: f64,
    pub questions: Vec<ReviewQuestion>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewQuestion {
    pub text: String,
    pub correct: bool,
    pub options: Vec<ReviewOption>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewOption {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark: Option<OptionMark>,
}

/// Three disjoint visual states for the post-quiz breakdown; options that are
/// neither selected nor correct carry no mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionMark {
    SelectedCorrect,
    CorrectUnselected,
    SelectedIncorrect,
}

impl ReviewView {
    /// Builds the per-question breakdown from a stored result. Never
    /// re-scores: the persisted answers and score are authoritative.
    pub fn from_result(quiz: &Quiz, result: &QuizResult) -> Self {
        let questions = quiz
            .questions
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let selected = result.selected_option(index);
                let options = question
                    .options
                    .iter()
                    .enumerate()
                    .map(|(option_index, option)| {
                        let is_selected = selected == Some(option_index);
                        let is_correct = option_index == question.correct_answer;
                        let mark = match (is_selected, is_correct) {
                            (true, true) => Some(OptionMark::SelectedCorrect),
                            (false, true) => Some(OptionMark::CorrectUnselected),
                            (true, false) => Some(OptionMark::SelectedIncorrect),
                            (false, false) => None,
                        };
                        ReviewOption {
                            text: option.text.clone(),
                            mark,
                        }
                    })
                    .collect();

                ReviewQuestion {
                    text: question.text.clone(),
                    correct: selected == Some(question.correct_answer),
                    options,
                }
            })
            .collect();

        ReviewView {
            quiz_id: quiz.id.clone(),
            title: quiz.title.clone(),
            score: result.score,
            total_questions: result.total_questions,
            percentage: result.percentage(),
            questions,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiMessage {
    pub message: String,
}
