// Comandos que modifican la sesión: elegir sección y dar de baja.
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use super::sessions::engine_for;
use crate::api_json::{drop_error_response, select_error_response, DropRequest, SelectRequest};
use crate::session::{lock_engine, SessionStore};

/// POST /sessions/{id}/select
pub async fn select_handler(
    store: web::Data<SessionStore>,
    path: web::Path<String>,
    body: web::Json<SelectRequest>,
) -> impl Responder {
    let engine = match engine_for(&store, &path) {
        Ok(e) => e,
        Err(resp) => return resp,
    };
    let req = body.into_inner();
    let result = lock_engine(&engine).select(&req.course_id, req.section);
    match result {
        Ok(outcome) => HttpResponse::Ok().json(json!({"status": "ok", "outcome": outcome})),
        Err(e) => select_error_response(&e),
    }
}

/// GET /sessions/{id}/drop/{course_id}
/// Vista previa: qué ramos se caerían y cuántos créditos se liberan.
pub async fn drop_preview_handler(
    store: web::Data<SessionStore>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (id, course_id) = path.into_inner();
    let engine = match engine_for(&store, &id) {
        Ok(e) => e,
        Err(resp) => return resp,
    };
    let result = lock_engine(&engine).preview_drop(&course_id);
    match result {
        Ok(preview) => HttpResponse::Ok().json(json!({
            "requires_confirmation": preview.requires_confirmation(),
            "preview": preview,
        })),
        Err(e) => drop_error_response(&e),
    }
}

/// POST /sessions/{id}/drop
pub async fn drop_handler(
    store: web::Data<SessionStore>,
    path: web::Path<String>,
    body: web::Json<DropRequest>,
) -> impl Responder {
    let engine = match engine_for(&store, &path) {
        Ok(e) => e,
        Err(resp) => return resp,
    };
    let req = body.into_inner();
    let result = lock_engine(&engine).drop_course(&req.course_id, req.confirm);
    match result {
        Ok(summary) => HttpResponse::Ok().json(json!({"status": "ok", "dropped": summary})),
        Err(e) => drop_error_response(&e),
    }
}
