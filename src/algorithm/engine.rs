//! Motor de selección de ramos.
//!
//! Dueño único del catálogo de una sesión: valida y aplica selecciones y
//! bajas, y mantiene el total de créditos de forma incremental. Los
//! comandos fallidos no tocan nada.

use serde::Serialize;
use tracing::{debug, info};

use super::cascade::find_dependents;
use super::conflict::{find_conflict, first_overlap};
use super::timetable::build_timetable;
use crate::catalog::Catalog;
use crate::error::{DropError, SelectError};
use crate::models::views::{CourseState, CourseStatus, CreditStatus, PrerequisiteEdge, SectionView, SelectedEntry, Timetable};
use crate::models::{CourseRef, Section};

/// Umbral de créditos por defecto.
pub const DEFAULT_CREDIT_THRESHOLD: u32 = 20;

/// Resultado de una selección aplicada.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOutcome {
    pub course: CourseRef,
    pub section_index: usize,
    pub section: Section,
    /// Sección del mismo ramo que quedó desalojada (cambio de sección).
    pub replaced: Option<String>,
    pub credit_delta: u32,
    pub total_credits: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropPreview {
    pub target: CourseRef,
    pub dependents: Vec<CourseRef>,
    pub credits_released: u32,
}

impl DropPreview {
    pub fn requires_confirmation(&self) -> bool {
        !self.dependents.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedCourse {
    pub course: CourseRef,
    pub section_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedSummary {
    pub target: DroppedCourse,
    pub dependents: Vec<DroppedCourse>,
    pub credits_released: u32,
    pub total_credits: u32,
}

#[derive(Debug, Clone)]
pub struct SelectionEngine {
    catalog: Catalog,
    total_credits: u32,
    credit_threshold: u32,
}

fn selected_credits(catalog: &Catalog) -> u32 {
    catalog
        .courses()
        .iter()
        .filter(|c| c.has_selected_section())
        .map(|c| c.credit)
        .sum()
}

impl SelectionEngine {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_threshold(catalog, DEFAULT_CREDIT_THRESHOLD)
    }

    pub fn with_threshold(catalog: Catalog, credit_threshold: u32) -> Self {
        let total_credits = selected_credits(&catalog);
        Self { catalog, total_credits, credit_threshold }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn total_credits(&self) -> u32 {
        self.total_credits
    }

    pub fn credit_threshold(&self) -> u32 {
        self.credit_threshold
    }

    pub fn credit_status(&self) -> CreditStatus {
        CreditStatus::new(self.total_credits, self.credit_threshold)
    }

    /// Elige la sección `section_index` (base 0) del ramo `course_id`.
    pub fn select(&mut self, course_id: &str, section_index: usize) -> Result<SelectOutcome, SelectError> {
        let pos = self.catalog.position(course_id).ok_or_else(|| SelectError::UnknownCourse {
            id: course_id.to_string(),
            suggestion: self.catalog.suggest(course_id),
        })?;
        let course = &self.catalog.courses()[pos];

        let missing = self.catalog.missing_prerequisites_at(pos);
        if !missing.is_empty() {
            let err = SelectError::PrerequisitesUnmet {
                course: course.id.clone(),
                missing: missing.iter().map(|c| c.course_ref()).collect(),
            };
            debug!(course = %course.id, "select rejected: {}", err);
            return Err(err);
        }

        let section = course.sections.get(section_index).ok_or_else(|| SelectError::UnknownSection {
            course: course.id.clone(),
            index: section_index,
            available: course.sections.len(),
        })?;
        if section.is_selected() {
            return Err(SelectError::AlreadySelected { course: course.id.clone(), section: section.id.clone() });
        }

        // la sección previa del mismo ramo no cuenta: si hay choque con otro
        // ramo, nada se modifica
        if let Some(with) = find_conflict(&self.catalog, &section.time_slot, pos) {
            let err = SelectError::TimeConflict { course: course.id.clone(), section: section.id.clone(), with };
            debug!(course = %course.id, "select rejected: {}", err);
            return Err(err);
        }

        let course = self.catalog.course_mut(pos);
        let replaced = course.clear_selection();
        course.sections[section_index].set_selected(true);
        let credit_delta = if replaced.is_none() { course.credit } else { 0 };
        let course_ref = course.course_ref();
        let section = course.sections[section_index].clone();
        self.total_credits += credit_delta;

        info!(
            course = %course_ref.id,
            section = %section.id,
            replaced = ?replaced,
            total_credits = self.total_credits,
            "section selected"
        );
        debug_assert!(self.is_consistent());

        Ok(SelectOutcome {
            course: course_ref,
            section_index,
            section,
            replaced,
            credit_delta,
            total_credits: self.total_credits,
        })
    }

    /// Qué se caería si se da de baja `course_id`. No modifica nada.
    pub fn preview_drop(&self, course_id: &str) -> Result<DropPreview, DropError> {
        let pos = self.resolve_drop_target(course_id)?;
        let target = self.catalog.courses()[pos].course_ref();
        let dependents: Vec<CourseRef> = find_dependents(&self.catalog, pos)
            .into_iter()
            .map(|i| self.catalog.courses()[i].course_ref())
            .collect();
        let credits_released = target.credit + dependents.iter().map(|d| d.credit).sum::<u32>();
        Ok(DropPreview { target, dependents, credits_released })
    }

    /// Baja confirmada: el ramo y todos sus dependientes elegidos.
    pub fn commit_drop(&mut self, course_id: &str) -> Result<DroppedSummary, DropError> {
        let pos = self.resolve_drop_target(course_id)?;
        let dependents = find_dependents(&self.catalog, pos);
        self.apply_drop(pos, &dependents)
    }

    /// Variante de una sola llamada: si hay dependientes y no viene
    /// `confirmed`, devuelve `ConfirmationRequired` sin tocar nada.
    pub fn drop_course(&mut self, course_id: &str, confirmed: bool) -> Result<DroppedSummary, DropError> {
        let pos = self.resolve_drop_target(course_id)?;
        let dependents = find_dependents(&self.catalog, pos);
        if !dependents.is_empty() && !confirmed {
            let err = DropError::ConfirmationRequired {
                course: self.catalog.courses()[pos].id.clone(),
                dependents: dependents.iter().map(|&i| self.catalog.courses()[i].course_ref()).collect(),
            };
            debug!("drop deferred: {}", err);
            return Err(err);
        }
        self.apply_drop(pos, &dependents)
    }

    fn resolve_drop_target(&self, course_id: &str) -> Result<usize, DropError> {
        let pos = self.catalog.position(course_id).ok_or_else(|| DropError::UnknownCourse {
            id: course_id.to_string(),
            suggestion: self.catalog.suggest(course_id),
        })?;
        let course = &self.catalog.courses()[pos];
        if !course.has_selected_section() {
            return Err(DropError::NothingSelected { course: course.id.clone() });
        }
        Ok(pos)
    }

    fn apply_drop(&mut self, target: usize, dependents: &[usize]) -> Result<DroppedSummary, DropError> {
        let before = self.total_credits;
        let dropped_deps: Vec<DroppedCourse> = dependents.iter().filter_map(|&i| self.unselect(i)).collect();
        let dropped_target = match self.unselect(target) {
            Some(d) => d,
            None => {
                return Err(DropError::NothingSelected { course: self.catalog.courses()[target].id.clone() });
            }
        };
        let summary = DroppedSummary {
            target: dropped_target,
            dependents: dropped_deps,
            credits_released: before - self.total_credits,
            total_credits: self.total_credits,
        };

        info!(
            course = %summary.target.course.id,
            cascaded = summary.dependents.len(),
            credits_released = summary.credits_released,
            total_credits = summary.total_credits,
            "course dropped"
        );
        debug_assert!(self.is_consistent());
        Ok(summary)
    }

    fn unselect(&mut self, idx: usize) -> Option<DroppedCourse> {
        let course = self.catalog.course_mut(idx);
        let section_id = course.clear_selection()?;
        self.total_credits -= course.credit;
        Some(DroppedCourse { course: course.course_ref(), section_id })
    }

    /// Chequeo completo de invariantes: total de créditos coherente, como
    /// mucho una sección por ramo, ramos elegidos con sus prerequisitos y
    /// sin solapes.
    pub fn is_consistent(&self) -> bool {
        let courses = self.catalog.courses();
        let one_per_course = courses.iter().all(|c| c.sections.iter().filter(|s| s.is_selected()).count() <= 1);
        let eligible = (0..courses.len())
            .filter(|&i| courses[i].has_selected_section())
            .all(|i| self.catalog.is_eligible_at(i));
        one_per_course
            && eligible
            && self.total_credits == selected_credits(&self.catalog)
            && first_overlap(&self.catalog).is_none()
    }

    // --- vistas de sólo lectura ---

    pub fn course_statuses(&self) -> Vec<CourseStatus> {
        self.catalog
            .courses()
            .iter()
            .enumerate()
            .map(|(pos, c)| {
                let missing: Vec<String> =
                    self.catalog.missing_prerequisites_at(pos).iter().map(|p| p.id.clone()).collect();
                let state = if c.has_selected_section() {
                    CourseState::Selected
                } else if missing.is_empty() {
                    CourseState::Eligible
                } else {
                    CourseState::Blocked
                };
                CourseStatus {
                    id: c.id.clone(),
                    name: c.name.clone(),
                    credit: c.credit,
                    semester: c.semester,
                    state,
                    prerequisites: c.prerequisites.clone(),
                    missing_prerequisites: missing,
                    selected_section: c.selected_section().map(|s| s.id.clone()),
                    sections: c.sections.iter().enumerate().map(|(i, s)| SectionView::from_section(i, s)).collect(),
                }
            })
            .collect()
    }

    pub fn selected_sections(&self) -> Vec<SelectedEntry> {
        self.catalog
            .courses()
            .iter()
            .filter_map(|c| c.selected_index().map(|i| SelectedEntry::new(c, i)))
            .collect()
    }

    pub fn prerequisite_edges(&self) -> Vec<PrerequisiteEdge> {
        self.catalog.prerequisite_edges()
    }

    pub fn timetable(&self) -> Timetable {
        build_timetable(&self.catalog)
    }
}
