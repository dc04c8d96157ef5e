use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Assignment {
    pub id: String,
    pub class_id: String,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub points: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Assignment {
    pub fn new(class_id: &str, title: &str, due_date: DateTime<Utc>, points: u32) -> Self {
        Assignment {
            id: Uuid::new_v4().to_string(),
            class_id: class_id.to_string(),
            title: title.to_string(),
            description: None,
            due_date,
            points,
            attachment_url: None,
            created_at: Some(Utc::now()),
        }
    }
}

/// A student's response to an assignment. At most one live submission exists
/// per (assignment, student) pair; callers search before deciding insert vs
/// update.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Submission {
    pub id: String,
    pub assignment_id: String,
    pub student_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub status: SubmissionStatus,
    /// Absent until graded; "not graded" and "graded 0" are distinct states.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Submitted,
    Graded,
    Returned,
}

impl Submission {
    pub fn new(
        assignment_id: &str,
        student_id: &str,
        file_url: Option<String>,
        note: Option<String>,
    ) -> Self {
        Submission {
            id: Uuid::new_v4().to_string(),
            assignment_id: assignment_id.to_string(),
            student_id: student_id.to_string(),
            file_url,
            note,
            status: SubmissionStatus::Submitted,
            grade: None,
            feedback: None,
            submitted_at: Utc::now(),
        }
    }
}
