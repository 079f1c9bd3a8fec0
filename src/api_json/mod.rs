//! Capa JSON sobre HTTP: cuerpos de petición/respuesta y el mapeo de los
//! errores del motor a códigos de estado.
//!
//! # Selección
//! ```json
//! { "course_id": "CS201", "section": 0 }
//! ```
//! `section` es el índice (base 0) dentro de las secciones del ramo.
//!
//! # Baja
//! ```json
//! { "course_id": "CS102", "confirm": true }
//! ```
//! Sin `confirm` (o en `false`) una baja que arrastra dependientes responde
//! 409 con la lista de dependientes y no modifica nada.

pub mod handlers;

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{DropError, SelectError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectRequest {
    pub course_id: String,
    pub section: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropRequest {
    pub course_id: String,
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCreated {
    pub session_id: String,
    pub credit_threshold: u32,
}

pub fn select_error_status(err: &SelectError) -> StatusCode {
    match err {
        SelectError::UnknownCourse { .. } | SelectError::UnknownSection { .. } => StatusCode::NOT_FOUND,
        SelectError::PrerequisitesUnmet { .. } => StatusCode::PRECONDITION_FAILED,
        SelectError::TimeConflict { .. } => StatusCode::CONFLICT,
        SelectError::AlreadySelected { .. } => StatusCode::OK,
    }
}

pub fn drop_error_status(err: &DropError) -> StatusCode {
    match err {
        DropError::UnknownCourse { .. } => StatusCode::NOT_FOUND,
        DropError::NothingSelected { .. } | DropError::ConfirmationRequired { .. } => StatusCode::CONFLICT,
    }
}

fn error_body<E: Serialize + std::fmt::Display>(status: StatusCode, err: &E) -> HttpResponse {
    HttpResponse::build(status).json(json!({"error": err.to_string(), "detail": err}))
}

pub fn select_error_response(err: &SelectError) -> HttpResponse {
    if let SelectError::AlreadySelected { course, section } = err {
        // no es un fallo: la petición ya estaba cumplida
        return HttpResponse::Ok().json(json!({"status": "unchanged", "course_id": course, "section_id": section}));
    }
    error_body(select_error_status(err), err)
}

pub fn drop_error_response(err: &DropError) -> HttpResponse {
    error_body(drop_error_status(err), err)
}

pub fn session_not_found(id: &str) -> HttpResponse {
    HttpResponse::NotFound().json(json!({"error": format!("session `{}` not found", id)}))
}
