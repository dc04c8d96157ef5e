use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::errors::{AppError, AppResult};
use crate::models::domain::ResultKey;
use crate::models::dto::response::{InProgressView, QuestionView, ReviewView, SessionView};
use crate::repositories::{QuizRepository, QuizResultRepository};
use crate::services::attendance_service::AttendanceService;
use crate::services::quiz_session::QuizSession;

type SessionMap = HashMap<ResultKey, ActiveSession>;

/// Administers quiz attempts: one active session per (quiz, student), a
/// stored result per pair, and a countdown whose expiry submits through the
/// same path as an explicit submission.
pub struct QuizSessionService {
    quizzes: Arc<dyn QuizRepository>,
    results: Arc<dyn QuizResultRepository>,
    attendance: Arc<AttendanceService>,
    sessions: Arc<RwLock<SessionMap>>,
}

struct ActiveSession {
    session: QuizSession,
    timer: Option<SessionTimer>,
}

/// Countdown tied to a session's lifetime. Dropping or cancelling it
/// de-schedules the pending auto-submit; a fired timer is disarmed instead
/// so it never aborts itself mid-write.
pub struct SessionTimer {
    handle: Option<JoinHandle<()>>,
}

impl SessionTimer {
    fn new(handle: JoinHandle<()>) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    fn cancel(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    fn disarm(mut self) {
        self.handle.take();
    }
}

impl Drop for SessionTimer {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl QuizSessionService {
    pub fn new(
        quizzes: Arc<dyn QuizRepository>,
        results: Arc<dyn QuizResultRepository>,
        attendance: Arc<AttendanceService>,
    ) -> Self {
        Self {
            quizzes,
            results,
            attendance,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Opens a session for the pair. A stored result short-circuits straight
    /// to review with the persisted answers and score, never re-scoring;
    /// re-opening an in-flight session resumes it.
    pub async fn open_session(&self, quiz_id: &str, student_id: &str) -> AppResult<SessionView> {
        let quiz = self
            .quizzes
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))?;

        let key = ResultKey::new(quiz_id, student_id);
        if let Some(result) = self.results.find_by_key(&key).await? {
            return Ok(SessionView::Completed(ReviewView::from_result(
                &quiz, &result,
            )));
        }

        let mut sessions = self.sessions.write().await;
        if let Some(active) = sessions.get(&key) {
            return Ok(in_progress_view(&active.session));
        }

        let now = Utc::now();
        let session = QuizSession::start(quiz, student_id, now)?;
        let timer = session
            .deadline()
            .map(|deadline| self.schedule_auto_submit(&key, deadline, now));
        let view = in_progress_view(&session);
        sessions.insert(key, ActiveSession { session, timer });

        Ok(view)
    }

    pub async fn select_option(
        &self,
        quiz_id: &str,
        student_id: &str,
        question_index: usize,
        option_index: usize,
    ) -> AppResult<SessionView> {
        let key = ResultKey::new(quiz_id, student_id);
        let mut sessions = self.sessions.write().await;
        let active = active_session(&mut sessions, &key)?;

        if active.session.is_expired(Utc::now()) {
            return Err(AppError::ValidationError(
                "Time limit has elapsed".to_string(),
            ));
        }

        active.session.select_option(question_index, option_index)?;
        Ok(in_progress_view(&active.session))
    }

    pub async fn navigate_next(&self, quiz_id: &str, student_id: &str) -> AppResult<SessionView> {
        self.navigate(quiz_id, student_id, true).await
    }

    pub async fn navigate_previous(
        &self,
        quiz_id: &str,
        student_id: &str,
    ) -> AppResult<SessionView> {
        self.navigate(quiz_id, student_id, false).await
    }

    async fn navigate(
        &self,
        quiz_id: &str,
        student_id: &str,
        forward: bool,
    ) -> AppResult<SessionView> {
        let key = ResultKey::new(quiz_id, student_id);
        let mut sessions = self.sessions.write().await;
        let active = active_session(&mut sessions, &key)?;

        if active.session.is_expired(Utc::now()) {
            return Err(AppError::ValidationError(
                "Time limit has elapsed".to_string(),
            ));
        }

        if forward {
            active.session.next();
        } else {
            active.session.previous();
        }
        Ok(in_progress_view(&active.session))
    }

    /// Scores and persists the attempt. Explicit submissions require the
    /// confirmation flag; once the deadline has passed the flag is moot.
    pub async fn submit(
        &self,
        quiz_id: &str,
        student_id: &str,
        confirmed: bool,
    ) -> AppResult<SessionView> {
        let key = ResultKey::new(quiz_id, student_id);

        {
            let sessions = self.sessions.read().await;
            let active = sessions.get(&key).ok_or_else(|| {
                AppError::NotFound(format!("No active session for {}", key))
            })?;

            if !confirmed && !active.session.is_expired(Utc::now()) {
                return Err(AppError::ValidationError(
                    "Submission requires confirmation".to_string(),
                ));
            }
        }

        let review = Self::finalize(&self.sessions, &self.results, &self.attendance, &key, false)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No active session for {}", key)))?;

        Ok(SessionView::Completed(review))
    }

    /// Tears down a session without scoring it, de-scheduling any pending
    /// countdown. Used when the student navigates away.
    pub async fn close_session(&self, quiz_id: &str, student_id: &str) {
        let key = ResultKey::new(quiz_id, student_id);
        let removed = self.sessions.write().await.remove(&key);
        if let Some(active) = removed {
            if let Some(timer) = active.timer {
                timer.cancel();
            }
            log::debug!("Closed quiz session {} without submission", key);
        }
    }

    fn schedule_auto_submit(
        &self,
        key: &ResultKey,
        deadline: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> SessionTimer {
        let wait = (deadline - now).to_std().unwrap_or_default();
        let sessions = Arc::clone(&self.sessions);
        let results = Arc::clone(&self.results);
        let attendance = Arc::clone(&self.attendance);
        let key = key.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            match Self::finalize(&sessions, &results, &attendance, &key, true).await {
                Ok(Some(review)) => log::info!(
                    "Time limit elapsed for session {}; auto-submitted with score {}/{}",
                    key,
                    review.score,
                    review.total_questions
                ),
                // Session already submitted or closed.
                Ok(None) => {}
                Err(err) => log::warn!("Timed submission for session {} failed: {}", key, err),
            }
        });

        SessionTimer::new(handle)
    }

    /// Shared completion path for explicit and timer-driven submission.
    /// Returns `None` when no session is active under the key. On a failed
    /// result write the session is restored so the submission can be retried.
    async fn finalize(
        sessions: &Arc<RwLock<SessionMap>>,
        results: &Arc<dyn QuizResultRepository>,
        attendance: &Arc<AttendanceService>,
        key: &ResultKey,
        from_timer: bool,
    ) -> AppResult<Option<ReviewView>> {
        let mut active = {
            let mut map = sessions.write().await;
            match map.remove(key) {
                Some(active) => active,
                None => return Ok(None),
            }
        };

        if let Some(timer) = active.timer.take() {
            if from_timer {
                timer.disarm();
            } else {
                timer.cancel();
            }
        }

        let result = active.session.score();
        let result = match results.upsert(result).await {
            Ok(result) => result,
            Err(err) => {
                sessions.write().await.insert(key.clone(), active);
                return Err(err);
            }
        };

        attendance
            .record_quiz_attempt(
                &key.student_id,
                &active.session.quiz().class_id,
                &key.quiz_id,
            )
            .await;

        Ok(Some(ReviewView::from_result(active.session.quiz(), &result)))
    }
}

fn active_session<'a>(
    sessions: &'a mut SessionMap,
    key: &ResultKey,
) -> AppResult<&'a mut ActiveSession> {
    sessions
        .get_mut(key)
        .ok_or_else(|| AppError::NotFound(format!("No active session for {}", key)))
}

fn in_progress_view(session: &QuizSession) -> SessionView {
    let quiz = session.quiz();
    let index = session.current_question();
    let question = &quiz.questions[index];

    SessionView::InProgress(InProgressView {
        quiz_id: quiz.id.clone(),
        title: quiz.title.clone(),
        current_question: index,
        total_questions: quiz.question_count(),
        question: QuestionView {
            text: question.text.clone(),
            image_url: question.image_url.clone(),
            options: question.options.iter().map(|o| o.text.clone()).collect(),
        },
        selected_option: session.selected_option(index),
        deadline: session.deadline(),
    })
}
