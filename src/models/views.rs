//! Vistas de sólo lectura para la capa de presentación (consola, web, API).
//!
//! Son copias: ninguna vista guarda referencias al catálogo, así que se
//! pueden serializar o mandar fuera de la sesión sin bloquear el motor.

use serde::Serialize;

use super::{Course, CourseRef, Section, TimeSlot, Weekday};

/// Estado de un ramo tal como lo pintaba el menú (verde / amarillo / rojo).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseState {
    Selected,
    Eligible,
    Blocked,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionView {
    pub index: usize,
    pub id: String,
    pub instructor: String,
    pub time_slot: TimeSlot,
    pub selected: bool,
}

impl SectionView {
    pub fn from_section(index: usize, s: &Section) -> Self {
        Self {
            index,
            id: s.id.clone(),
            instructor: s.instructor.clone(),
            time_slot: s.time_slot.clone(),
            selected: s.is_selected(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseStatus {
    pub id: String,
    pub name: String,
    pub credit: u32,
    pub semester: u32,
    pub state: CourseState,
    pub prerequisites: Vec<String>,
    pub missing_prerequisites: Vec<String>,
    pub selected_section: Option<String>,
    pub sections: Vec<SectionView>,
}

/// Un par (ramo, sección) actualmente elegido.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedEntry {
    pub course: CourseRef,
    pub semester: u32,
    pub section_index: usize,
    pub section_id: String,
    pub instructor: String,
    pub time_slot: TimeSlot,
}

impl SelectedEntry {
    pub fn new(course: &Course, section_index: usize) -> Self {
        let s = &course.sections[section_index];
        Self {
            course: course.course_ref(),
            semester: course.semester,
            section_index,
            section_id: s.id.clone(),
            instructor: s.instructor.clone(),
            time_slot: s.time_slot.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrerequisiteEdge {
    pub prerequisite: String,
    pub dependent: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CreditStatus {
    pub total: u32,
    pub threshold: u32,
    pub remaining: u32,
    pub reached: bool,
}

impl CreditStatus {
    pub fn new(total: u32, threshold: u32) -> Self {
        Self {
            total,
            threshold,
            remaining: threshold.saturating_sub(total),
            reached: total >= threshold,
        }
    }
}

/// Celda ocupada del horario. `number` es la numeración dentro del semestre
/// que usaba la consulta de detalle ("1-1", "2-3").
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimetableEntry {
    pub number: u32,
    pub weekday: Weekday,
    pub time_range: String,
    pub course_id: String,
    pub course_name: String,
    pub credit: u32,
    pub section_id: String,
    pub instructor: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SemesterTimetable {
    pub semester: u32,
    /// Ordenado por (día, hora de inicio).
    pub entries: Vec<TimetableEntry>,
}

impl SemesterTimetable {
    pub fn at(&self, weekday: Weekday, time_range: &str) -> Option<&TimetableEntry> {
        self.entries.iter().find(|e| e.weekday == weekday && e.time_range == time_range)
    }

    pub fn weekdays(&self) -> Vec<Weekday> {
        let mut days: Vec<Weekday> = self.entries.iter().map(|e| e.weekday).collect();
        days.sort();
        days.dedup();
        days
    }

    pub fn time_ranges(&self) -> Vec<String> {
        let mut ranges: Vec<String> = self.entries.iter().map(|e| e.time_range.clone()).collect();
        ranges.sort();
        ranges.dedup();
        ranges
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timetable {
    pub semesters: Vec<SemesterTimetable>,
}

impl Timetable {
    pub fn semester(&self, semester: u32) -> Option<&SemesterTimetable> {
        self.semesters.iter().find(|s| s.semester == semester)
    }

    /// Consulta de detalle por "semestre-número". Los números se asignan en
    /// orden del catálogo dentro del semestre, empezando en 1.
    pub fn entry(&self, semester: u32, number: u32) -> Option<&TimetableEntry> {
        self.semester(semester)?.entries.iter().find(|e| e.number == number)
    }
}
