use actix_web::{get, web, HttpResponse};

use crate::{app_state::AppState, errors::AppResult, models::dto::response::ApiMessage};

#[get("/api/health")]
async fn health_check(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    state.db.health_check().await?;
    Ok(HttpResponse::Ok().json(ApiMessage {
        message: "ok".to_string(),
    }))
}
