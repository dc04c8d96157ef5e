use actix_web::{delete, get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::{AppError, AppResult},
    models::dto::request::{
        LessonViewRequest, NavDirection, NavigateRequest, OpenSessionRequest, SelectOptionRequest,
        SubmitSessionRequest,
    },
};

#[get("/api/quizzes/{id}")]
async fn get_quiz(state: web::Data<AppState>, id: web::Path<String>) -> AppResult<HttpResponse> {
    let quiz = state
        .quiz_repository
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[post("/api/quizzes/{id}/sessions")]
async fn open_session(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<OpenSessionRequest>,
) -> AppResult<HttpResponse> {
    request.validate()?;
    let view = state
        .quiz_session_service
        .open_session(&id, &request.student_id)
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

#[post("/api/quizzes/{id}/sessions/answer")]
async fn select_option(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<SelectOptionRequest>,
) -> AppResult<HttpResponse> {
    request.validate()?;
    let view = state
        .quiz_session_service
        .select_option(
            &id,
            &request.student_id,
            request.question_index,
            request.option_index,
        )
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

#[post("/api/quizzes/{id}/sessions/navigate")]
async fn navigate_session(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<NavigateRequest>,
) -> AppResult<HttpResponse> {
    request.validate()?;
    let view = match request.direction {
        NavDirection::Next => {
            state
                .quiz_session_service
                .navigate_next(&id, &request.student_id)
                .await?
        }
        NavDirection::Previous => {
            state
                .quiz_session_service
                .navigate_previous(&id, &request.student_id)
                .await?
        }
    };
    Ok(HttpResponse::Ok().json(view))
}

#[post("/api/quizzes/{id}/sessions/submit")]
async fn submit_session(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<SubmitSessionRequest>,
) -> AppResult<HttpResponse> {
    request.validate()?;
    let view = state
        .quiz_session_service
        .submit(&id, &request.student_id, request.confirmed)
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

#[delete("/api/quizzes/{id}/sessions")]
async fn close_session(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<OpenSessionRequest>,
) -> AppResult<HttpResponse> {
    request.validate()?;
    state
        .quiz_session_service
        .close_session(&id, &request.student_id)
        .await;
    Ok(HttpResponse::NoContent().finish())
}

/// Fire-and-forget engagement logging; always accepted, errors are only
/// logged server-side.
#[post("/api/classes/{class_id}/lessons/{lesson_id}/views")]
async fn record_lesson_view(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    request: web::Json<LessonViewRequest>,
) -> AppResult<HttpResponse> {
    request.validate()?;
    let (class_id, lesson_id) = path.into_inner();
    state
        .attendance_service
        .record_lesson_view(
            &request.student_id,
            &class_id,
            &lesson_id,
            request.duration_seconds,
        )
        .await;
    Ok(HttpResponse::Accepted().finish())
}
