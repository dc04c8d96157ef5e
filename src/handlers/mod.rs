pub mod assignment_handler;
pub mod gradebook_handler;
pub mod health_handler;
pub mod quiz_handler;

pub use assignment_handler::{grade_submission, submit_assignment};
pub use gradebook_handler::{delete_quiz_result, get_gradebook};
pub use health_handler::health_check;
pub use quiz_handler::{
    close_session, get_quiz, navigate_session, open_session, record_lesson_view, select_option,
    submit_session,
};
