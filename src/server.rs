use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing::info;

use crate::api_json::handlers::*;
use crate::config::AppConfig;
use crate::session::SessionStore;

/// Registra todas las rutas. Se comparte entre `run_server` y los tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/sessions", web::post().to(create_session_handler))
        .route("/sessions/{id}", web::delete().to(delete_session_handler))
        .route("/sessions/{id}/courses", web::get().to(courses_handler))
        .route("/sessions/{id}/selected", web::get().to(selected_handler))
        .route("/sessions/{id}/credits", web::get().to(credits_handler))
        .route("/sessions/{id}/timetable", web::get().to(timetable_handler))
        .route("/sessions/{id}/timetable/{semester}/{number}", web::get().to(timetable_entry_handler))
        .route("/sessions/{id}/select", web::post().to(select_handler))
        .route("/sessions/{id}/drop/{course_id}", web::get().to(drop_preview_handler))
        .route("/sessions/{id}/drop", web::post().to(drop_handler))
        .route("/prerequisites", web::get().to(prerequisites_handler))
        .route("/help", web::get().to(help_handler));
}

pub async fn run_server(config: AppConfig) -> std::io::Result<()> {
    let catalog = config.load_catalog().map_err(std::io::Error::other)?;
    let store = web::Data::new(SessionStore::with_max_sessions(catalog, config.credit_threshold, config.max_sessions));

    info!(
        bind = %config.bind,
        credit_threshold = config.credit_threshold,
        max_sessions = config.max_sessions,
        "starting server"
    );
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(store.clone())
            .configure(configure)
    })
    .bind(config.bind.as_str())?
    .run()
    .await
}
