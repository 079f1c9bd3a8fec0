// Lógica del motor: choques de horario, bajas en cascada, horario por semestre.
pub mod cascade;
pub mod conflict;
pub mod engine;
pub mod timetable;

pub use engine::{DropPreview, DroppedCourse, DroppedSummary, SelectOutcome, SelectionEngine, DEFAULT_CREDIT_THRESHOLD};
