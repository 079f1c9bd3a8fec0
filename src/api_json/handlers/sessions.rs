use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::api_json::{session_not_found, SessionCreated};
use crate::session::{SessionStore, SharedEngine};

/// Busca el motor de la sesión o arma el 404.
pub(crate) fn engine_for(store: &SessionStore, id: &str) -> Result<SharedEngine, HttpResponse> {
    store.get(id).ok_or_else(|| session_not_found(id))
}

/// POST /sessions
pub async fn create_session_handler(store: web::Data<SessionStore>) -> impl Responder {
    let session_id = store.create();
    HttpResponse::Created().json(SessionCreated { session_id, credit_threshold: store.credit_threshold() })
}

/// DELETE /sessions/{id}
pub async fn delete_session_handler(store: web::Data<SessionStore>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    if store.remove(&id) {
        HttpResponse::Ok().json(json!({"status": "ok", "session_id": id}))
    } else {
        session_not_found(&id)
    }
}
