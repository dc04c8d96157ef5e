use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One engagement record per (student, class, kind, activity) per calendar
/// day. The key renders deterministically into the document id, which is what
/// enforces the per-day uniqueness.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttendanceKey {
    pub student_id: String,
    pub class_id: String,
    pub kind: ActivityKind,
    pub activity_id: String,
    pub day: NaiveDate,
}

impl AttendanceKey {
    pub fn new(
        student_id: &str,
        class_id: &str,
        kind: ActivityKind,
        activity_id: &str,
        day: NaiveDate,
    ) -> Self {
        Self {
            student_id: student_id.to_string(),
            class_id: class_id.to_string(),
            kind,
            activity_id: activity_id.to_string(),
            day,
        }
    }

    pub fn document_id(&self) -> String {
        format!(
            "{}:{}:{}:{}:{}",
            self.student_id,
            self.class_id,
            self.kind.as_str(),
            self.activity_id,
            self.day
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    LessonView,
    QuizAttempt,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::LessonView => "lesson_view",
            ActivityKind::QuizAttempt => "quiz_attempt",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AttendanceRecord {
    pub id: String,
    pub student_id: String,
    pub class_id: String,
    pub kind: ActivityKind,
    pub activity_id: String,
    pub day: NaiveDate,
    /// Cumulative seconds for lesson views; absent for quiz attempts, which
    /// are presence-only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
}

impl AttendanceRecord {
    pub fn new(key: &AttendanceKey, duration_seconds: Option<u32>) -> Self {
        AttendanceRecord {
            id: key.document_id(),
            student_id: key.student_id.clone(),
            class_id: key.class_id.clone(),
            kind: key.kind,
            activity_id: key.activity_id.clone(),
            day: key.day,
            duration_seconds,
        }
    }

    pub fn key(&self) -> AttendanceKey {
        AttendanceKey::new(
            &self.student_id,
            &self.class_id,
            self.kind,
            &self.activity_id,
            self.day,
        )
    }
}
