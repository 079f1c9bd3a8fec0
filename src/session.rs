// Tabla de sesiones: un motor por sesión, creado desde el catálogo base.
// La tabla tiene un tope; al llenarse se descarta la sesión usada hace más
// tiempo.
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::info;

use crate::algorithm::SelectionEngine;
use crate::catalog::Catalog;

pub type SharedEngine = Arc<Mutex<SelectionEngine>>;

/// Tope de sesiones vivas por defecto.
pub const DEFAULT_MAX_SESSIONS: usize = 1024;

/// Un mutex envenenado no invalida el estado: los comandos del motor no
/// dejan cambios a medias (el catálogo acota la suma de créditos), así que
/// se recupera el guard.
pub fn lock_engine(engine: &SharedEngine) -> MutexGuard<'_, SelectionEngine> {
    engine.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct SessionSlot {
    engine: SharedEngine,
    last_used: u64,
}

#[derive(Default)]
struct SessionTable {
    slots: HashMap<String, SessionSlot>,
    // reloj lógico: sube en cada acceso
    clock: u64,
}

impl SessionTable {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn least_recently_used(&self) -> Option<String> {
        self.slots.iter().min_by_key(|(_, slot)| slot.last_used).map(|(id, _)| id.clone())
    }
}

pub struct SessionStore {
    template: Catalog,
    credit_threshold: u32,
    max_sessions: usize,
    sessions: Mutex<SessionTable>,
}

impl SessionStore {
    pub fn new(template: Catalog, credit_threshold: u32) -> Self {
        Self::with_max_sessions(template, credit_threshold, DEFAULT_MAX_SESSIONS)
    }

    /// `max_sessions` se lleva a 1 como mínimo.
    pub fn with_max_sessions(template: Catalog, credit_threshold: u32, max_sessions: usize) -> Self {
        Self {
            template,
            credit_threshold,
            max_sessions: max_sessions.max(1),
            sessions: Mutex::new(SessionTable::default()),
        }
    }

    pub fn template(&self) -> &Catalog {
        &self.template
    }

    pub fn credit_threshold(&self) -> u32 {
        self.credit_threshold
    }

    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }

    fn table(&self) -> MutexGuard<'_, SessionTable> {
        self.sessions.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Crea una sesión nueva (catálogo sin selecciones) y devuelve su id.
    /// Si la tabla está llena, descarta antes la sesión menos usada.
    pub fn create(&self) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        let engine = SelectionEngine::with_threshold(self.template.clone(), self.credit_threshold);

        let mut table = self.table();
        while table.slots.len() >= self.max_sessions {
            let Some(oldest) = table.least_recently_used() else { break };
            table.slots.remove(&oldest);
            info!(session = %oldest, max_sessions = self.max_sessions, "session evicted");
        }
        let last_used = table.tick();
        table.slots.insert(id.clone(), SessionSlot { engine: Arc::new(Mutex::new(engine)), last_used });
        drop(table);

        info!(session = %id, "session created");
        id
    }

    pub fn get(&self, id: &str) -> Option<SharedEngine> {
        let mut table = self.table();
        let now = table.tick();
        table.slots.get_mut(id).map(|slot| {
            slot.last_used = now;
            slot.engine.clone()
        })
    }

    pub fn remove(&self, id: &str) -> bool {
        let removed = self.table().slots.remove(id).is_some();
        if removed {
            info!(session = %id, "session removed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.table().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::reference_catalog;

    #[test]
    fn test_sessions_are_isolated() {
        let store = SessionStore::new(reference_catalog().unwrap(), 20);
        let a = store.create();
        let b = store.create();
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);

        lock_engine(&store.get(&a).unwrap()).select("MA101", 0).unwrap();
        assert_eq!(lock_engine(&store.get(&a).unwrap()).total_credits(), 5);
        assert_eq!(lock_engine(&store.get(&b).unwrap()).total_credits(), 0);
        assert!(!store.template().courses().iter().any(|c| c.has_selected_section()));
    }

    #[test]
    fn test_remove_session() {
        let store = SessionStore::new(reference_catalog().unwrap(), 20);
        let id = store.create();
        assert!(store.remove(&id));
        assert!(!store.remove(&id));
        assert!(store.get(&id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_full_table_evicts_least_recently_used() {
        let store = SessionStore::with_max_sessions(reference_catalog().unwrap(), 20, 2);
        let a = store.create();
        let b = store.create();
        // `a` se usa después de crear `b`: la más vieja pasa a ser `b`
        assert!(store.get(&a).is_some());

        let c = store.create();
        assert_eq!(store.len(), 2);
        assert!(store.get(&b).is_none());
        assert!(store.get(&a).is_some());
        assert!(store.get(&c).is_some());
    }

    #[test]
    fn test_zero_cap_keeps_one_session() {
        let store = SessionStore::with_max_sessions(reference_catalog().unwrap(), 20, 0);
        assert_eq!(store.max_sessions(), 1);
        let a = store.create();
        let b = store.create();
        assert_eq!(store.len(), 1);
        assert!(store.get(&a).is_none());
        assert!(store.get(&b).is_some());
    }
}
