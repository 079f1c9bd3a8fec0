//! Tipos de error del motor y de la carga del catálogo.
//!
//! Todos son recuperables: se devuelven como valores y la capa de
//! presentación decide cómo mostrarlos.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::models::{CourseRef, TimeSlot};

/// La sección ya elegida con la que choca un intento de selección.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictInfo {
    pub course: CourseRef,
    pub section_id: String,
    pub time_slot: TimeSlot,
}

fn join_refs(refs: &[CourseRef]) -> String {
    refs.iter()
        .map(|r| format!("{} ({})", r.name, r.id))
        .collect::<Vec<_>>()
        .join(", ")
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean `{}`?)", s),
        None => String::new(),
    }
}

fn describe_conflict(c: &ConflictInfo) -> String {
    format!("{} {} at {}", c.course.id, c.section_id, c.time_slot)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectError {
    #[error("unknown course `{id}`{}", suggestion_hint(.suggestion))]
    UnknownCourse { id: String, suggestion: Option<String> },

    #[error("course {course} has no section #{index} ({available} available)")]
    UnknownSection { course: String, index: usize, available: usize },

    #[error("cannot select {course}, missing prerequisites: {}", join_refs(.missing))]
    PrerequisitesUnmet { course: String, missing: Vec<CourseRef> },

    /// No es un fallo real: la sección pedida ya era la elegida.
    #[error("section {section} of {course} is already selected")]
    AlreadySelected { course: String, section: String },

    #[error("section {section} of {course} overlaps {}", describe_conflict(.with))]
    TimeConflict { course: String, section: String, with: ConflictInfo },
}

impl SelectError {
    pub fn kind(&self) -> &'static str {
        match self {
            SelectError::UnknownCourse { .. } => "unknown_course",
            SelectError::UnknownSection { .. } => "unknown_section",
            SelectError::PrerequisitesUnmet { .. } => "prerequisites_unmet",
            SelectError::AlreadySelected { .. } => "already_selected",
            SelectError::TimeConflict { .. } => "time_conflict",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DropError {
    #[error("unknown course `{id}`{}", suggestion_hint(.suggestion))]
    UnknownCourse { id: String, suggestion: Option<String> },

    #[error("course {course} has no selected section")]
    NothingSelected { course: String },

    /// Quedan dependientes elegidos y el llamador no confirmó la cascada.
    #[error("dropping {course} also drops {}; confirmation required", join_refs(.dependents))]
    ConfirmationRequired { course: String, dependents: Vec<CourseRef> },
}

impl DropError {
    pub fn kind(&self) -> &'static str {
        match self {
            DropError::UnknownCourse { .. } => "unknown_course",
            DropError::NothingSelected { .. } => "nothing_selected",
            DropError::ConfirmationRequired { .. } => "confirmation_required",
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("course #{position} has an empty id")]
    EmptyCourseId { position: usize },

    #[error("duplicate course id `{id}`")]
    DuplicateCourse { id: String },

    #[error("course {course}: credit must be positive")]
    InvalidCredit { course: String },

    #[error("total credit of the {courses} courses does not fit in u32")]
    CreditOverflow { courses: usize },

    #[error("course {course}: semester must be positive")]
    InvalidSemester { course: String },

    #[error("course {course}: section #{position} has an empty id")]
    EmptySectionId { course: String, position: usize },

    #[error("course {course}: duplicate section id `{section}`")]
    DuplicateSection { course: String, section: String },

    #[error("unknown weekday `{token}`")]
    InvalidWeekday { token: String },

    #[error("invalid time of day `{value}`")]
    InvalidTime { value: String },

    #[error("empty time slot {start}-{end}, start must be before end")]
    EmptyTimeSlot { start: String, end: String },

    #[error("course {course}, section {section}: {source}")]
    InSection {
        course: String,
        section: String,
        source: Box<CatalogError>,
    },

    #[error("course {course}: unknown prerequisite `{prerequisite}`")]
    UnknownPrerequisite { course: String, prerequisite: String },

    #[error("course {course} lists itself as prerequisite")]
    SelfPrerequisite { course: String },

    #[error("course {course}: prerequisite `{prerequisite}` listed twice")]
    DuplicatePrerequisite { course: String, prerequisite: String },

    #[error("prerequisite cycle through course {course}")]
    PrerequisiteCycle { course: String },

    #[error("course `{id}` not found{}", suggestion_hint(.suggestion))]
    CourseNotFound { id: String, suggestion: Option<String> },

    #[error("failed to read catalog {}: {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_error_messages() {
        let e = SelectError::UnknownCourse { id: "CS2O1".into(), suggestion: Some("CS201".into()) };
        assert_eq!(e.to_string(), "unknown course `CS2O1` (did you mean `CS201`?)");

        let e = SelectError::PrerequisitesUnmet {
            course: "CS201".into(),
            missing: vec![CourseRef { id: "CS103".into(), name: "离散数学".into(), credit: 4 }],
        };
        assert_eq!(e.to_string(), "cannot select CS201, missing prerequisites: 离散数学 (CS103)");
        assert_eq!(e.kind(), "prerequisites_unmet");
    }

    #[test]
    fn test_select_error_serializes_with_kind_tag() {
        let e = SelectError::AlreadySelected { course: "PE101".into(), section: "PE101-B".into() };
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v["kind"], "already_selected");
        assert_eq!(v["section"], "PE101-B");
    }

    #[test]
    fn test_drop_error_kind() {
        let e = DropError::NothingSelected { course: "CS101".into() };
        assert_eq!(e.kind(), "nothing_selected");
        assert_eq!(e.to_string(), "course CS101 has no selected section");
    }
}
