use std::collections::BTreeMap;

use crate::models::domain::{
    Assignment, Question, QuestionOption, Quiz, QuizResult, ResultKey, Student,
};

#[cfg(test)]
pub mod fixtures {
    use super::*;
    use chrono::{Duration, Utc};

    /// Builds a quiz with one three-option question per entry in
    /// `correct_answers`.
    pub fn test_quiz(id: &str, class_id: &str, correct_answers: &[usize]) -> Quiz {
        let questions = correct_answers
            .iter()
            .enumerate()
            .map(|(index, &correct)| Question {
                text: format!("Question {}", index + 1),
                image_url: None,
                options: (0..3)
                    .map(|option| QuestionOption {
                        text: format!("Option {}", option + 1),
                        image_url: None,
                    })
                    .collect(),
                correct_answer: correct,
            })
            .collect();

        let mut quiz = Quiz::new(class_id, "Test Quiz", questions, 1);
        quiz.id = id.to_string();
        quiz
    }

    /// Scores `answers` against the quiz exactly the way submission does:
    /// one point per exact match, unanswered counts incorrect.
    pub fn test_result(quiz: &Quiz, student_id: &str, answers: &[(usize, usize)]) -> QuizResult {
        let map: BTreeMap<usize, usize> = answers.iter().copied().collect();
        let score = quiz
            .questions
            .iter()
            .enumerate()
            .filter(|(index, question)| map.get(index) == Some(&question.correct_answer))
            .count() as u32;

        QuizResult::new(
            &ResultKey::new(&quiz.id, student_id),
            score,
            quiz.question_count() as u32,
            &map,
        )
    }

    pub fn test_student(id: &str, class_id: &str, first: &str, last: &str) -> Student {
        let mut student = Student::new(class_id, first, last);
        student.id = id.to_string();
        student
    }

    pub fn test_assignment(id: &str, class_id: &str, points: u32) -> Assignment {
        let mut assignment =
            Assignment::new(class_id, "Test Assignment", Utc::now() + Duration::days(7), points);
        assignment.id = id.to_string();
        assignment
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_quiz_shape() {
        let quiz = test_quiz("quiz-1", "class-1", &[0, 2]);

        assert_eq!(quiz.question_count(), 2);
        assert!(quiz.questions.iter().all(|q| q.is_well_formed()));
    }

    #[test]
    fn test_fixtures_result_scores_like_submission() {
        let quiz = test_quiz("quiz-1", "class-1", &[0, 1, 2]);
        let result = test_result(&quiz, "student-1", &[(0, 0), (1, 1), (2, 0)]);

        assert_eq!(result.score, 2);
        assert_eq!(result.total_questions, 3);
    }
}
