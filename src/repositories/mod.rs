pub mod assignment_repository;
pub mod attendance_repository;
pub mod quiz_repository;
pub mod quiz_result_repository;
pub mod student_repository;
pub mod submission_repository;

pub use assignment_repository::{AssignmentRepository, MongoAssignmentRepository};
pub use attendance_repository::{AttendanceRepository, MongoAttendanceRepository};
pub use quiz_repository::{MongoQuizRepository, QuizRepository};
pub use quiz_result_repository::{MongoQuizResultRepository, QuizResultRepository};
pub use student_repository::{MongoStudentRepository, StudentRepository};
pub use submission_repository::{MongoSubmissionRepository, SubmissionRepository};
