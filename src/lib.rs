// Biblioteca raíz del crate `xuanke`.
// Motor de selección de ramos (prerequisitos, choques de horario, bajas en
// cascada) y su capa JSON sobre HTTP.
pub mod algorithm;
pub mod api_json;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod session;

pub use algorithm::{DropPreview, DroppedCourse, DroppedSummary, SelectOutcome, SelectionEngine, DEFAULT_CREDIT_THRESHOLD};
pub use catalog::{load_catalog, load_catalog_file, reference_catalog, Catalog, CatalogSeed};
pub use config::AppConfig;
pub use error::{CatalogError, ConflictInfo, DropError, SelectError};

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
