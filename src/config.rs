//! Configuración del servidor leída desde variables de entorno (`.env`
//! incluido).
//!
//! - `XUANKE_BIND`: dirección de escucha (default `127.0.0.1:8080`)
//! - `XUANKE_CREDIT_THRESHOLD`: umbral de créditos (default 20)
//! - `XUANKE_CATALOG`: ruta a un catálogo JSON; si no está se usa el
//!   catálogo de referencia embebido
//! - `XUANKE_MAX_SESSIONS`: tope de sesiones vivas (default 1024)

use std::env;
use std::path::PathBuf;

use tracing::warn;

use crate::algorithm::DEFAULT_CREDIT_THRESHOLD;
use crate::catalog::{load_catalog_file, reference_catalog, Catalog};
use crate::error::CatalogError;
use crate::session::DEFAULT_MAX_SESSIONS;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind: String,
    pub credit_threshold: u32,
    pub catalog_path: Option<PathBuf>,
    pub max_sessions: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            credit_threshold: DEFAULT_CREDIT_THRESHOLD,
            catalog_path: None,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con la fuente inyectada (tests).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind = non_empty("XUANKE_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());

        let credit_threshold = match non_empty("XUANKE_CREDIT_THRESHOLD") {
            None => DEFAULT_CREDIT_THRESHOLD,
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    warn!(value = %raw, default = DEFAULT_CREDIT_THRESHOLD, "invalid XUANKE_CREDIT_THRESHOLD, using default");
                    DEFAULT_CREDIT_THRESHOLD
                }
            },
        };

        let catalog_path = non_empty("XUANKE_CATALOG").map(PathBuf::from);

        let max_sessions = match non_empty("XUANKE_MAX_SESSIONS") {
            None => DEFAULT_MAX_SESSIONS,
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    warn!(value = %raw, default = DEFAULT_MAX_SESSIONS, "invalid XUANKE_MAX_SESSIONS, using default");
                    DEFAULT_MAX_SESSIONS
                }
            },
        };

        Self { bind, credit_threshold, catalog_path, max_sessions }
    }

    pub fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        match &self.catalog_path {
            Some(path) => load_catalog_file(path),
            None => reference_catalog(),
        }
    }
}
