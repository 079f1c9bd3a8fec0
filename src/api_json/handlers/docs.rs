use actix_web::{HttpResponse, Responder};
use serde_json::json;

use crate::api_json::{DropRequest, SelectRequest};

/// GET /help
pub async fn help_handler() -> impl Responder {
    let select_example = SelectRequest { course_id: "CS201".to_string(), section: 0 };
    let drop_example = DropRequest { course_id: "CS102".to_string(), confirm: false };

    HttpResponse::Ok().json(json!({
        "description": "API de selección de ramos. Cada sesión tiene su propio catálogo y créditos; se crea con POST /sessions y se usa el session_id devuelto en el resto de las rutas.",
        "endpoints": [
            "POST   /sessions",
            "DELETE /sessions/{id}",
            "GET    /sessions/{id}/courses",
            "GET    /sessions/{id}/selected",
            "GET    /sessions/{id}/credits",
            "GET    /sessions/{id}/timetable",
            "GET    /sessions/{id}/timetable/{semester}/{number}",
            "POST   /sessions/{id}/select",
            "GET    /sessions/{id}/drop/{course_id}",
            "POST   /sessions/{id}/drop",
            "GET    /prerequisites",
            "GET    /help"
        ],
        "select_example": select_example,
        "drop_example": drop_example,
        "note": "section es el índice base 0 de la sección dentro del ramo. Una baja con dependientes elegidos responde 409 hasta que se envíe confirm=true.",
        "status_codes": {
            "404": "sesión, ramo o sección inexistente",
            "409": "choque de horario, baja sin confirmar o ramo sin sección elegida",
            "412": "prerequisitos sin cumplir"
        }
    }))
}
