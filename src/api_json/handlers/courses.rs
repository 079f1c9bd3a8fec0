// Vistas de sólo lectura de una sesión.
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use super::sessions::engine_for;
use crate::session::{lock_engine, SessionStore};

/// GET /sessions/{id}/courses
/// Cada ramo con su estado (selected / eligible / blocked) y sus secciones.
pub async fn courses_handler(store: web::Data<SessionStore>, path: web::Path<String>) -> impl Responder {
    let engine = match engine_for(&store, &path) {
        Ok(e) => e,
        Err(resp) => return resp,
    };
    let courses = lock_engine(&engine).course_statuses();
    HttpResponse::Ok().json(json!({"courses": courses}))
}

/// GET /sessions/{id}/selected
pub async fn selected_handler(store: web::Data<SessionStore>, path: web::Path<String>) -> impl Responder {
    let engine = match engine_for(&store, &path) {
        Ok(e) => e,
        Err(resp) => return resp,
    };
    let guard = lock_engine(&engine);
    HttpResponse::Ok().json(json!({
        "selected": guard.selected_sections(),
        "total_credits": guard.total_credits(),
    }))
}

/// GET /sessions/{id}/credits
pub async fn credits_handler(store: web::Data<SessionStore>, path: web::Path<String>) -> impl Responder {
    let engine = match engine_for(&store, &path) {
        Ok(e) => e,
        Err(resp) => return resp,
    };
    let status = lock_engine(&engine).credit_status();
    HttpResponse::Ok().json(status)
}

/// GET /sessions/{id}/timetable
pub async fn timetable_handler(store: web::Data<SessionStore>, path: web::Path<String>) -> impl Responder {
    let engine = match engine_for(&store, &path) {
        Ok(e) => e,
        Err(resp) => return resp,
    };
    let timetable = lock_engine(&engine).timetable();
    HttpResponse::Ok().json(timetable)
}

/// GET /sessions/{id}/timetable/{semester}/{number}
/// Detalle de una celda, p. ej. `/timetable/2/1` para "2-1".
pub async fn timetable_entry_handler(
    store: web::Data<SessionStore>,
    path: web::Path<(String, u32, u32)>,
) -> impl Responder {
    let (id, semester, number) = path.into_inner();
    let engine = match engine_for(&store, &id) {
        Ok(e) => e,
        Err(resp) => return resp,
    };
    let timetable = lock_engine(&engine).timetable();
    match timetable.entry(semester, number) {
        Some(entry) => HttpResponse::Ok().json(entry),
        None => HttpResponse::NotFound().json(json!({
            "error": format!("no timetable entry {}-{}", semester, number)
        })),
    }
}

/// GET /prerequisites
/// Aristas prerequisito -> dependiente del catálogo base.
pub async fn prerequisites_handler(store: web::Data<SessionStore>) -> impl Responder {
    HttpResponse::Ok().json(json!({"edges": store.template().prerequisite_edges()}))
}
