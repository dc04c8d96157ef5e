use serde::Deserialize;
use validator::Validate;

use crate::services::gradebook::SortDirection;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OpenSessionRequest {
    #[validate(length(min = 1))]
    pub student_id: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SelectOptionRequest {
    #[validate(length(min = 1))]
    pub student_id: String,

    pub question_index: usize,
    pub option_index: usize,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NavigateRequest {
    #[validate(length(min = 1))]
    pub student_id: String,

    pub direction: NavDirection,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavDirection {
    Next,
    Previous,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitSessionRequest {
    #[validate(length(min = 1))]
    pub student_id: String,

    /// Explicit submissions go through a distinct confirmation step; only the
    /// countdown bypasses it.
    #[serde(default)]
    pub confirmed: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GradebookQuery {
    #[validate(length(max = 200))]
    pub search: Option<String>,

    pub sort: Option<SortDirection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteResultQuery {
    /// Voiding a result is destructive and non-undoable; the caller must
    /// acknowledge it explicitly.
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LessonViewRequest {
    #[validate(length(min = 1))]
    pub student_id: String,

    #[validate(range(max = 86400))]
    pub duration_seconds: u32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitAssignmentRequest {
    #[validate(length(min = 1))]
    pub student_id: String,

    #[validate(url)]
    pub file_url: Option<String>,

    #[validate(length(max = 2000))]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GradeSubmissionRequest {
    pub grade: u32,

    #[validate(length(max = 2000))]
    pub feedback: Option<String>,
}
