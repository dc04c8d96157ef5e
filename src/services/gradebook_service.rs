use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::{AppError, AppResult};
use crate::models::domain::ResultKey;
use crate::repositories::{
    AssignmentRepository, QuizRepository, QuizResultRepository, StudentRepository,
    SubmissionRepository,
};
use crate::services::gradebook::{
    GradeCell, Gradebook, GradebookView, SortDirection, StudentRow,
};

/// Builds the per-classroom aggregation and owns the one sanctioned mutation:
/// voiding a quiz result so the student can retake.
pub struct GradebookService {
    students: Arc<dyn StudentRepository>,
    assignments: Arc<dyn AssignmentRepository>,
    submissions: Arc<dyn SubmissionRepository>,
    quizzes: Arc<dyn QuizRepository>,
    results: Arc<dyn QuizResultRepository>,
}

impl GradebookService {
    pub fn new(
        students: Arc<dyn StudentRepository>,
        assignments: Arc<dyn AssignmentRepository>,
        submissions: Arc<dyn SubmissionRepository>,
        quizzes: Arc<dyn QuizRepository>,
        results: Arc<dyn QuizResultRepository>,
    ) -> Self {
        Self {
            students,
            assignments,
            submissions,
            quizzes,
            results,
        }
    }

    /// Fetches every column in one pass; any failed read aborts the whole
    /// build so a partial table is never shown.
    pub async fn build(&self, class_id: &str) -> AppResult<Gradebook> {
        let students = self.students.list_by_class(class_id).await?;
        let assignments = self.assignments.list_by_class(class_id).await?;
        let quizzes = self.quizzes.list_by_class(class_id).await?;

        let mut assignment_cells: Vec<HashMap<String, GradeCell>> = Vec::new();
        for assignment in &assignments {
            let submissions = self.submissions.list_by_assignment(&assignment.id).await?;
            let cells = submissions
                .into_iter()
                .map(|submission| {
                    let cell = match submission.grade {
                        Some(points) => GradeCell::Score(points),
                        None => GradeCell::Ungraded,
                    };
                    (submission.student_id, cell)
                })
                .collect();
            assignment_cells.push(cells);
        }

        let mut quiz_cells: Vec<HashMap<String, GradeCell>> = Vec::new();
        for quiz in &quizzes {
            let results = self.results.find_by_quiz(&quiz.id).await?;
            let cells = results
                .into_iter()
                .map(|result| (result.student_id, GradeCell::Score(result.score)))
                .collect();
            quiz_cells.push(cells);
        }

        let rows = students
            .into_iter()
            .map(|student| {
                let assignment_grades = assignment_cells
                    .iter()
                    .map(|cells| cells.get(&student.id).copied().unwrap_or(GradeCell::Ungraded))
                    .collect();
                let quiz_scores = quiz_cells
                    .iter()
                    .map(|cells| cells.get(&student.id).copied().unwrap_or(GradeCell::Ungraded))
                    .collect();
                StudentRow {
                    student,
                    assignment_grades,
                    quiz_scores,
                }
            })
            .collect();

        Ok(Gradebook {
            class_id: class_id.to_string(),
            assignments,
            quizzes,
            rows,
        })
    }

    pub async fn view(
        &self,
        class_id: &str,
        search: Option<&str>,
        sort: Option<SortDirection>,
    ) -> AppResult<GradebookView> {
        let gradebook = self.build(class_id).await?;
        Ok(gradebook.view(search, sort))
    }

    /// Deletes the stored result under its deterministic key. Destructive and
    /// non-undoable, so the caller must confirm up front; afterwards the next
    /// session for the pair opens in progress again.
    pub async fn delete_quiz_result(
        &self,
        quiz_id: &str,
        student_id: &str,
        confirm: bool,
    ) -> AppResult<()> {
        if !confirm {
            return Err(AppError::ValidationError(
                "Deleting a quiz result cannot be undone; pass confirm=true".to_string(),
            ));
        }

        let key = ResultKey::new(quiz_id, student_id);
        let deleted = self.results.delete_by_key(&key).await?;
        if !deleted {
            return Err(AppError::NotFound(format!(
                "No quiz result stored for {}",
                key
            )));
        }

        log::info!("Deleted quiz result {} to permit a retake", key);
        Ok(())
    }
}
