// Carga del catálogo desde una descripción declarativa (JSON).
use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::Catalog;
use crate::error::CatalogError;
use crate::models::{Course, Section, TimeSlot};

/// Catálogo de referencia: 16 ramos en 2 semestres.
pub const REFERENCE_CATALOG_JSON: &str = include_str!("../datafiles/catalog.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSeed {
    pub courses: Vec<CourseSeed>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSeed {
    pub id: String,
    pub name: String,
    pub credit: u32,
    pub semester: u32,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub sections: Vec<SectionSeed>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSeed {
    pub id: String,
    pub instructor: String,
    pub weekday: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub location: String,
}

impl CatalogSeed {
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }
}

fn build_section(course: &str, seed: SectionSeed) -> Result<Section, CatalogError> {
    let slot = TimeSlot::parse(&seed.weekday, &seed.start, &seed.end, seed.location).map_err(|e| {
        CatalogError::InSection { course: course.to_string(), section: seed.id.clone(), source: Box::new(e) }
    })?;
    Ok(Section::new(seed.id, seed.instructor, slot))
}

fn build_course(position: usize, seed: CourseSeed) -> Result<Course, CatalogError> {
    if seed.id.trim().is_empty() {
        return Err(CatalogError::EmptyCourseId { position });
    }
    if seed.credit == 0 {
        return Err(CatalogError::InvalidCredit { course: seed.id });
    }
    if seed.semester == 0 {
        return Err(CatalogError::InvalidSemester { course: seed.id });
    }
    if seed.sections.is_empty() {
        warn!(course = %seed.id, "course has no sections and can never be selected");
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut sections = Vec::with_capacity(seed.sections.len());
    for (pos, s) in seed.sections.into_iter().enumerate() {
        if s.id.trim().is_empty() {
            return Err(CatalogError::EmptySectionId { course: seed.id, position: pos });
        }
        if !seen.insert(s.id.clone()) {
            return Err(CatalogError::DuplicateSection { course: seed.id, section: s.id });
        }
        sections.push(build_section(&seed.id, s)?);
    }

    Ok(Course {
        id: seed.id,
        name: seed.name,
        credit: seed.credit,
        semester: seed.semester,
        prerequisites: seed.prerequisites,
        sections,
    })
}

/// Construye el catálogo a partir de la semilla. Rechaza datos inválidos y
/// grafos de prerequisitos con ciclos.
pub fn load_catalog(seed: CatalogSeed) -> Result<Catalog, CatalogError> {
    let courses = seed
        .courses
        .into_iter()
        .enumerate()
        .map(|(pos, c)| build_course(pos, c))
        .collect::<Result<Vec<_>, _>>()?;
    let catalog = Catalog::new(courses)?;
    info!(
        courses = catalog.len(),
        sections = catalog.courses().iter().map(|c| c.sections.len()).sum::<usize>(),
        edges = catalog.graph().edge_count(),
        "catalog loaded"
    );
    Ok(catalog)
}

pub fn load_catalog_file(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|source| CatalogError::Io { path: path.to_path_buf(), source })?;
    load_catalog(CatalogSeed::from_json_str(&text)?)
}

pub fn reference_seed() -> Result<CatalogSeed, CatalogError> {
    CatalogSeed::from_json_str(REFERENCE_CATALOG_JSON)
}

pub fn reference_catalog() -> Result<Catalog, CatalogError> {
    load_catalog(reference_seed()?)
}
