use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use crate::errors::{AppError, AppResult};
use crate::models::domain::{Quiz, QuizResult, ResultKey};

/// One student's in-flight pass through a quiz. Pure state: all persistence
/// and timing live in [`QuizSessionService`](super::QuizSessionService).
///
/// The question pointer is clamped to `[0, total - 1]` and never wraps;
/// selections overwrite without advancing it.
pub struct QuizSession {
    quiz: Quiz,
    student_id: String,
    current_question: usize,
    answers: BTreeMap<usize, usize>,
    deadline: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Opens a fresh attempt. Rejects quizzes without questions; with a time
    /// limit, the deadline is fixed here and never pauses or extends.
    pub fn start(quiz: Quiz, student_id: &str, now: DateTime<Utc>) -> AppResult<Self> {
        if quiz.questions.is_empty() {
            return Err(AppError::ValidationError(format!(
                "Quiz '{}' has no questions",
                quiz.id
            )));
        }

        let deadline = quiz
            .time_limit_minutes
            .map(|minutes| now + Duration::seconds(i64::from(minutes) * 60));

        Ok(QuizSession {
            quiz,
            student_id: student_id.to_string(),
            current_question: 0,
            answers: BTreeMap::new(),
            deadline,
        })
    }

    pub fn key(&self) -> ResultKey {
        ResultKey::new(&self.quiz.id, &self.student_id)
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn current_question(&self) -> usize {
        self.current_question
    }

    pub fn selected_option(&self, question_index: usize) -> Option<usize> {
        self.answers.get(&question_index).copied()
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Records a pick; overwrites any prior pick for that question and does
    /// not move the question pointer.
    pub fn select_option(&mut self, question_index: usize, option_index: usize) -> AppResult<()> {
        let question = self.quiz.questions.get(question_index).ok_or_else(|| {
            AppError::ValidationError(format!(
                "Question index {} out of range for quiz '{}'",
                question_index, self.quiz.id
            ))
        })?;

        if option_index >= question.options.len() {
            return Err(AppError::ValidationError(format!(
                "Option index {} out of range for question {}",
                option_index, question_index
            )));
        }

        self.answers.insert(question_index, option_index);
        Ok(())
    }

    pub fn next(&mut self) {
        if self.current_question + 1 < self.quiz.question_count() {
            self.current_question += 1;
        }
    }

    pub fn previous(&mut self) {
        self.current_question = self.current_question.saturating_sub(1);
    }

    /// Scores the attempt: one point per exact match against the question's
    /// correct index, unanswered counts incorrect, no partial credit.
    pub fn score(&self) -> QuizResult {
        let score = self
            .quiz
            .questions
            .iter()
            .enumerate()
            .filter(|(index, question)| {
                self.answers.get(index) == Some(&question.correct_answer)
            })
            .count() as u32;

        QuizResult::new(
            &self.key(),
            score,
            self.quiz.question_count() as u32,
            &self.answers,
        )
    }
}
