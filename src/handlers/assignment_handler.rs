use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppResult,
    models::dto::request::{GradeSubmissionRequest, SubmitAssignmentRequest},
};

#[post("/api/assignments/{id}/submissions")]
async fn submit_assignment(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<SubmitAssignmentRequest>,
) -> AppResult<HttpResponse> {
    request.validate()?;
    let request = request.into_inner();
    let submission = state
        .submission_service
        .submit(&id, &request.student_id, request.file_url, request.note)
        .await?;
    Ok(HttpResponse::Created().json(submission))
}

#[post("/api/submissions/{id}/grade")]
async fn grade_submission(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<GradeSubmissionRequest>,
) -> AppResult<HttpResponse> {
    request.validate()?;
    let request = request.into_inner();
    let submission = state
        .submission_service
        .grade(&id, request.grade, request.feedback)
        .await?;
    Ok(HttpResponse::Ok().json(submission))
}
