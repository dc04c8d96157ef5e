use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::errors::AppResult;
use crate::models::domain::{ActivityKind, AttendanceKey, AttendanceRecord};
use crate::repositories::AttendanceRepository;

/// Best-effort engagement logging. The public entry points swallow every
/// failure: recording never blocks or fails the action that triggered it.
pub struct AttendanceService {
    repository: Arc<dyn AttendanceRepository>,
}

impl AttendanceService {
    pub fn new(repository: Arc<dyn AttendanceRepository>) -> Self {
        Self { repository }
    }

    pub async fn record_lesson_view(
        &self,
        student_id: &str,
        class_id: &str,
        lesson_id: &str,
        duration_seconds: u32,
    ) {
        let day = Local::now().date_naive();
        if let Err(err) = self
            .record_lesson_view_on(student_id, class_id, lesson_id, duration_seconds, day)
            .await
        {
            log::warn!(
                "Lesson view for student {} on lesson {} not recorded: {}",
                student_id,
                lesson_id,
                err
            );
        }
    }

    pub async fn record_quiz_attempt(&self, student_id: &str, class_id: &str, quiz_id: &str) {
        let day = Local::now().date_naive();
        if let Err(err) = self
            .record_quiz_attempt_on(student_id, class_id, quiz_id, day)
            .await
        {
            log::warn!(
                "Quiz attempt for student {} on quiz {} not recorded: {}",
                student_id,
                quiz_id,
                err
            );
        }
    }

    /// Repeated views of the same lesson on the same day accumulate duration
    /// into the single per-day record.
    pub async fn record_lesson_view_on(
        &self,
        student_id: &str,
        class_id: &str,
        lesson_id: &str,
        duration_seconds: u32,
        day: NaiveDate,
    ) -> AppResult<()> {
        let key = AttendanceKey::new(student_id, class_id, ActivityKind::LessonView, lesson_id, day);

        let record = match self.repository.find_by_key(&key).await? {
            Some(mut existing) => {
                let accumulated = existing.duration_seconds.unwrap_or(0) + duration_seconds;
                existing.duration_seconds = Some(accumulated);
                existing
            }
            None => AttendanceRecord::new(&key, Some(duration_seconds)),
        };

        self.repository.upsert(record).await
    }

    /// Presence-only: a second attempt on the same day is a no-op.
    pub async fn record_quiz_attempt_on(
        &self,
        student_id: &str,
        class_id: &str,
        quiz_id: &str,
        day: NaiveDate,
    ) -> AppResult<()> {
        let key = AttendanceKey::new(student_id, class_id, ActivityKind::QuizAttempt, quiz_id, day);

        if self.repository.find_by_key(&key).await?.is_some() {
            return Ok(());
        }

        self.repository.upsert(AttendanceRecord::new(&key, None)).await
    }
}
