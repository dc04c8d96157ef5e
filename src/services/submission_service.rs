use std::sync::Arc;

use chrono::Utc;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{Submission, SubmissionStatus};
use crate::repositories::{AssignmentRepository, SubmissionRepository};

/// Student submissions and teacher grading. The at-most-one-live-submission
/// invariant is enforced by searching for the pair before choosing insert vs
/// update.
pub struct SubmissionService {
    assignments: Arc<dyn AssignmentRepository>,
    submissions: Arc<dyn SubmissionRepository>,
}

impl SubmissionService {
    pub fn new(
        assignments: Arc<dyn AssignmentRepository>,
        submissions: Arc<dyn SubmissionRepository>,
    ) -> Self {
        Self {
            assignments,
            submissions,
        }
    }

    /// Resubmission updates the existing document in place: new file/note,
    /// fresh timestamp, status back to submitted. Any prior grade is left
    /// untouched until the teacher re-grades.
    pub async fn submit(
        &self,
        assignment_id: &str,
        student_id: &str,
        file_url: Option<String>,
        note: Option<String>,
    ) -> AppResult<Submission> {
        self.assignments
            .find_by_id(assignment_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Assignment with id '{}' not found", assignment_id))
            })?;

        let existing = self
            .submissions
            .find_by_assignment_and_student(assignment_id, student_id)
            .await?;

        match existing {
            Some(mut submission) => {
                submission.file_url = file_url;
                submission.note = note;
                submission.status = SubmissionStatus::Submitted;
                submission.submitted_at = Utc::now();
                self.submissions.update(submission).await
            }
            None => {
                let submission = Submission::new(assignment_id, student_id, file_url, note);
                self.submissions.create(submission).await
            }
        }
    }

    /// Validates the grade against the assignment's point value before any
    /// write. Grade and status then land as two separate writes; a failure
    /// between them leaves the grade stored while the status still reads
    /// submitted.
    pub async fn grade(
        &self,
        submission_id: &str,
        grade: u32,
        feedback: Option<String>,
    ) -> AppResult<Submission> {
        let submission = self
            .submissions
            .find_by_id(submission_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Submission with id '{}' not found", submission_id))
            })?;

        let assignment = self
            .assignments
            .find_by_id(&submission.assignment_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Assignment with id '{}' not found",
                    submission.assignment_id
                ))
            })?;

        if grade > assignment.points {
            return Err(AppError::ValidationError(format!(
                "Grade {} exceeds the assignment's {} points",
                grade, assignment.points
            )));
        }

        self.submissions
            .set_grade(submission_id, grade, feedback)
            .await?;
        self.submissions
            .set_status(submission_id, SubmissionStatus::Graded)
            .await?;

        self.submissions
            .find_by_id(submission_id)
            .await?
            .ok_or_else(|| {
                AppError::InternalError(format!(
                    "Submission '{}' disappeared while grading",
                    submission_id
                ))
            })
    }
}
