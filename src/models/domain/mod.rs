pub mod assignment;
pub mod attendance;
pub mod quiz;
pub mod quiz_result;
pub mod student;

pub use assignment::{Assignment, Submission, SubmissionStatus};
pub use attendance::{ActivityKind, AttendanceKey, AttendanceRecord};
pub use quiz::{Question, QuestionOption, Quiz};
pub use quiz_result::{QuizResult, ResultKey, SelectedAnswer};
pub use student::Student;
