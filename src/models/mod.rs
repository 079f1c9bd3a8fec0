// Estructuras de datos principales

mod time_slot;
pub mod views;

pub use time_slot::{parse_time, TimeSlot, Weekday};

use serde::{Deserialize, Serialize};

/// Una sección (教学班) de un ramo: profesor + franja. `selected` sólo lo
/// modifica el motor de selección.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub id: String,
    pub instructor: String,
    pub time_slot: TimeSlot,
    selected: bool,
}

impl Section {
    pub fn new(id: impl Into<String>, instructor: impl Into<String>, time_slot: TimeSlot) -> Self {
        Self { id: id.into(), instructor: instructor.into(), time_slot, selected: false }
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}

/// Ramo del catálogo. Los prerequisitos se guardan como ids; el grafo que
/// los recorre vive en `Catalog`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub credit: u32,
    pub semester: u32,
    pub prerequisites: Vec<String>,
    pub sections: Vec<Section>,
}

impl Course {
    pub fn has_selected_section(&self) -> bool {
        self.sections.iter().any(Section::is_selected)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.sections.iter().position(Section::is_selected)
    }

    pub fn selected_section(&self) -> Option<&Section> {
        self.sections.iter().find(|s| s.is_selected())
    }

    pub fn course_ref(&self) -> CourseRef {
        CourseRef { id: self.id.clone(), name: self.name.clone(), credit: self.credit }
    }

    /// Quita la marca de la sección elegida (si hay) y devuelve su id.
    pub(crate) fn clear_selection(&mut self) -> Option<String> {
        let idx = self.selected_index()?;
        let section = &mut self.sections[idx];
        section.set_selected(false);
        Some(section.id.clone())
    }
}

/// Referencia ligera a un ramo, para errores y respuestas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRef {
    pub id: String,
    pub name: String,
    pub credit: u32,
}
