use actix_web::{delete, get, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppResult,
    models::dto::request::{DeleteResultQuery, GradebookQuery},
    models::dto::response::ApiMessage,
};

#[get("/api/classes/{id}/gradebook")]
async fn get_gradebook(
    state: web::Data<AppState>,
    id: web::Path<String>,
    query: web::Query<GradebookQuery>,
) -> AppResult<HttpResponse> {
    query.validate()?;
    let view = state
        .gradebook_service
        .view(&id, query.search.as_deref(), query.sort)
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

#[delete("/api/quizzes/{quiz_id}/results/{student_id}")]
async fn delete_quiz_result(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    query: web::Query<DeleteResultQuery>,
) -> AppResult<HttpResponse> {
    let (quiz_id, student_id) = path.into_inner();
    state
        .gradebook_service
        .delete_quiz_result(&quiz_id, &student_id, query.confirm)
        .await?;
    Ok(HttpResponse::Ok().json(ApiMessage {
        message: format!(
            "Quiz result for student {} deleted; the quiz can be retaken",
            student_id
        ),
    }))
}
