use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use classhub_server::{app_state::AppState, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = AppState::new(config)
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .service(handlers::health_check)
            .service(handlers::get_quiz)
            .service(handlers::open_session)
            .service(handlers::select_option)
            .service(handlers::navigate_session)
            .service(handlers::submit_session)
            .service(handlers::close_session)
            .service(handlers::record_lesson_view)
            .service(handlers::get_gradebook)
            .service(handlers::delete_quiz_result)
            .service(handlers::submit_assignment)
            .service(handlers::grade_submission)
    })
    .bind((host, port))?
    .run()
    .await
}
