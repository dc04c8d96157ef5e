pub mod attendance_service;
pub mod gradebook;
pub mod gradebook_service;
pub mod quiz_session;
pub mod quiz_session_service;
pub mod submission_service;

pub use attendance_service::AttendanceService;
pub use gradebook_service::GradebookService;
pub use quiz_session_service::QuizSessionService;
pub use submission_service::SubmissionService;
