use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoAssignmentRepository, MongoAttendanceRepository, MongoQuizRepository,
        MongoQuizResultRepository, MongoStudentRepository, MongoSubmissionRepository,
        QuizRepository,
    },
    services::{AttendanceService, GradebookService, QuizSessionService, SubmissionService},
};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub quiz_repository: Arc<dyn QuizRepository>,
    pub quiz_session_service: Arc<QuizSessionService>,
    pub gradebook_service: Arc<GradebookService>,
    pub attendance_service: Arc<AttendanceService>,
    pub submission_service: Arc<SubmissionService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db));
        quiz_repository.ensure_indexes().await?;

        let result_repository = Arc::new(MongoQuizResultRepository::new(&db));
        result_repository.ensure_indexes().await?;

        let assignment_repository = Arc::new(MongoAssignmentRepository::new(&db));
        assignment_repository.ensure_indexes().await?;

        let submission_repository = Arc::new(MongoSubmissionRepository::new(&db));
        submission_repository.ensure_indexes().await?;

        let attendance_repository = Arc::new(MongoAttendanceRepository::new(&db));
        attendance_repository.ensure_indexes().await?;

        let student_repository = Arc::new(MongoStudentRepository::new(&db));
        student_repository.ensure_indexes().await?;

        let attendance_service = Arc::new(AttendanceService::new(attendance_repository));

        let quiz_session_service = Arc::new(QuizSessionService::new(
            quiz_repository.clone(),
            result_repository.clone(),
            attendance_service.clone(),
        ));

        let gradebook_service = Arc::new(GradebookService::new(
            student_repository,
            assignment_repository.clone(),
            submission_repository.clone(),
            quiz_repository.clone(),
            result_repository,
        ));

        let submission_service = Arc::new(SubmissionService::new(
            assignment_repository,
            submission_repository,
        ));

        Ok(Self {
            db,
            quiz_repository,
            quiz_session_service,
            gradebook_service,
            attendance_service,
            submission_service,
            config: Arc::new(config),
        })
    }
}
