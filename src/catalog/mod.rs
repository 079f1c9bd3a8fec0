//! Catálogo de ramos.
//!
//! Los ramos viven en un arena (`Vec<Course>`) direccionado por posición; el
//! nodo `i` del grafo de prerequisitos es el ramo `i` y cada arista va del
//! prerequisito al ramo que lo exige. Así se evita cualquier ciclo de
//! propiedad y el recorrido inverso (dependientes) es directo.

mod seed;

pub use seed::{load_catalog, load_catalog_file, reference_catalog, reference_seed, CatalogSeed, CourseSeed, SectionSeed, REFERENCE_CATALOG_JSON};

use std::collections::{HashMap, HashSet};

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::error::CatalogError;
use crate::models::views::PrerequisiteEdge;
use crate::models::{Course, Section};

/// Normaliza un código de ramo para búsquedas: sin espacios y en mayúsculas.
pub fn normalize_id(id: &str) -> String {
    id.trim().to_uppercase()
}

#[derive(Debug, Clone)]
pub struct Catalog {
    courses: Vec<Course>,
    index: HashMap<String, usize>,
    graph: DiGraph<String, ()>,
}

impl Catalog {
    /// Construye el catálogo validando ids únicos, prerequisitos conocidos,
    /// sin autorreferencias ni duplicados, y que el grafo sea acíclico.
    /// La suma de créditos de todo el catálogo debe caber en `u32`: con eso
    /// el total del motor nunca desborda.
    pub fn new(courses: Vec<Course>) -> Result<Self, CatalogError> {
        let mut index: HashMap<String, usize> = HashMap::with_capacity(courses.len());
        let mut graph: DiGraph<String, ()> = DiGraph::with_capacity(courses.len(), courses.len());

        for (pos, course) in courses.iter().enumerate() {
            let key = normalize_id(&course.id);
            if key.is_empty() {
                return Err(CatalogError::EmptyCourseId { position: pos });
            }
            if index.insert(key, pos).is_some() {
                return Err(CatalogError::DuplicateCourse { id: course.id.clone() });
            }
            let node = graph.add_node(course.id.clone());
            debug_assert_eq!(node.index(), pos);
        }

        for (pos, course) in courses.iter().enumerate() {
            let own_key = normalize_id(&course.id);
            let mut seen: HashSet<String> = HashSet::new();
            for prereq in course.prerequisites.iter() {
                let key = normalize_id(prereq);
                if key == own_key {
                    return Err(CatalogError::SelfPrerequisite { course: course.id.clone() });
                }
                if !seen.insert(key.clone()) {
                    return Err(CatalogError::DuplicatePrerequisite {
                        course: course.id.clone(),
                        prerequisite: prereq.clone(),
                    });
                }
                let from = match index.get(&key) {
                    Some(&p) => p,
                    None => {
                        return Err(CatalogError::UnknownPrerequisite {
                            course: course.id.clone(),
                            prerequisite: prereq.clone(),
                        })
                    }
                };
                graph.add_edge(NodeIndex::new(from), NodeIndex::new(pos), ());
            }
        }

        let total_credit = courses.iter().try_fold(0u32, |acc, c| acc.checked_add(c.credit));
        if total_credit.is_none() {
            return Err(CatalogError::CreditOverflow { courses: courses.len() });
        }

        if let Err(cycle) = toposort(&graph, None) {
            let course = graph[cycle.node_id()].clone();
            return Err(CatalogError::PrerequisiteCycle { course });
        }

        Ok(Self { courses, index, graph })
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn course(&self, idx: usize) -> Option<&Course> {
        self.courses.get(idx)
    }

    pub(crate) fn course_mut(&mut self, idx: usize) -> &mut Course {
        &mut self.courses[idx]
    }

    pub(crate) fn graph(&self) -> &DiGraph<String, ()> {
        &self.graph
    }

    /// Posición del ramo en el arena (búsqueda sin distinguir mayúsculas).
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(&normalize_id(id)).copied()
    }

    pub fn find_course(&self, id: &str) -> Result<&Course, CatalogError> {
        match self.position(id) {
            Some(pos) => Ok(&self.courses[pos]),
            None => Err(CatalogError::CourseNotFound { id: id.to_string(), suggestion: self.suggest(id) }),
        }
    }

    /// Sugerencia "¿quisiste decir?" por distancia de edición (máx. 2).
    pub fn suggest(&self, id: &str) -> Option<String> {
        let wanted = normalize_id(id);
        if wanted.is_empty() {
            return None;
        }
        self.courses
            .iter()
            .map(|c| (strsim::levenshtein(&wanted, &normalize_id(&c.id)), c))
            .filter(|(d, _)| *d <= 2)
            .min_by_key(|(d, _)| *d)
            .map(|(_, c)| c.id.clone())
    }

    /// Prerequisitos directos en orden de declaración.
    pub fn prerequisite_indices(&self, idx: usize) -> Vec<usize> {
        self.courses[idx]
            .prerequisites
            .iter()
            .filter_map(|p| self.position(p))
            .collect()
    }

    /// Dependientes directos (un salto), en orden del catálogo.
    pub fn dependent_indices(&self, idx: usize) -> Vec<usize> {
        let mut deps: Vec<usize> = self
            .graph
            .neighbors_directed(NodeIndex::new(idx), Direction::Outgoing)
            .map(|n| n.index())
            .collect();
        deps.sort_unstable();
        deps.dedup();
        deps
    }

    pub fn direct_dependents(&self, id: &str) -> Result<Vec<&Course>, CatalogError> {
        let pos = self.find_position(id)?;
        Ok(self.dependent_indices(pos).into_iter().map(|i| &self.courses[i]).collect())
    }

    /// Prerequisitos directos que todavía no tienen sección elegida.
    pub fn missing_prerequisites_at(&self, idx: usize) -> Vec<&Course> {
        self.prerequisite_indices(idx)
            .into_iter()
            .map(|i| &self.courses[i])
            .filter(|c| !c.has_selected_section())
            .collect()
    }

    /// Chequeo de un solo salto: no vuelve a verificar los prerequisitos de
    /// los prerequisitos, eso ya se exigió al elegirlos.
    pub fn is_eligible_at(&self, idx: usize) -> bool {
        self.prerequisite_indices(idx)
            .into_iter()
            .all(|i| self.courses[i].has_selected_section())
    }

    pub fn is_eligible(&self, id: &str) -> Result<bool, CatalogError> {
        let pos = self.find_position(id)?;
        Ok(self.is_eligible_at(pos))
    }

    pub fn all_selected_sections(&self) -> Vec<(&Course, &Section)> {
        self.courses
            .iter()
            .filter_map(|c| c.selected_section().map(|s| (c, s)))
            .collect()
    }

    pub fn prerequisite_edges(&self) -> Vec<PrerequisiteEdge> {
        let mut edges = Vec::new();
        for course in self.courses.iter() {
            for prereq in course.prerequisites.iter() {
                let prerequisite = match self.position(prereq) {
                    Some(p) => self.courses[p].id.clone(),
                    None => prereq.clone(),
                };
                edges.push(PrerequisiteEdge { prerequisite, dependent: course.id.clone() });
            }
        }
        edges
    }

    pub fn semesters(&self) -> Vec<u32> {
        let mut sems: Vec<u32> = self.courses.iter().map(|c| c.semester).collect();
        sems.sort_unstable();
        sems.dedup();
        sems
    }

    fn find_position(&self, id: &str) -> Result<usize, CatalogError> {
        self.position(id)
            .ok_or_else(|| CatalogError::CourseNotFound { id: id.to_string(), suggestion: self.suggest(id) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeSlot;

    fn course(id: &str, prereqs: &[&str]) -> Course {
        Course {
            id: id.to_string(),
            name: format!("Ramo {}", id),
            credit: 3,
            semester: 1,
            prerequisites: prereqs.iter().map(|s| s.to_string()).collect(),
            sections: vec![Section::new(
                format!("{}-1", id),
                "Prof",
                TimeSlot::parse("周一", "08:00", "09:00", "A").unwrap(),
            )],
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let cat = Catalog::new(vec![course("CS101", &[]), course("CS102", &["CS101"])]).unwrap();
        assert_eq!(cat.position("cs102"), Some(1));
        assert_eq!(cat.find_course(" cs101 ").unwrap().id, "CS101");
    }

    #[test]
    fn test_not_found_carries_suggestion() {
        let cat = Catalog::new(vec![course("CS101", &[]), course("MA101", &[])]).unwrap();
        match cat.find_course("CS1O1") {
            Err(CatalogError::CourseNotFound { suggestion, .. }) => assert_eq!(suggestion.as_deref(), Some("CS101")),
            other => panic!("unexpected: {:?}", other),
        }
        match cat.find_course("PHYSICS") {
            Err(CatalogError::CourseNotFound { suggestion, .. }) => assert!(suggestion.is_none()),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_duplicate_course() {
        let err = Catalog::new(vec![course("CS101", &[]), course("cs101", &[])]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCourse { .. }));
    }

    #[test]
    fn test_rejects_bad_prerequisites() {
        let err = Catalog::new(vec![course("A", &["A"])]).unwrap_err();
        assert!(matches!(err, CatalogError::SelfPrerequisite { .. }));

        let err = Catalog::new(vec![course("A", &[]), course("B", &["A", "a"])]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicatePrerequisite { .. }));

        let err = Catalog::new(vec![course("A", &["ZZ"])]).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownPrerequisite { .. }));
    }

    #[test]
    fn test_rejects_cycle() {
        let err = Catalog::new(vec![course("A", &["C"]), course("B", &["A"]), course("C", &["B"])]).unwrap_err();
        assert!(matches!(err, CatalogError::PrerequisiteCycle { .. }));
    }

    #[test]
    fn test_dependents_and_edges() {
        let cat = Catalog::new(vec![
            course("A", &[]),
            course("B", &["A"]),
            course("C", &["A", "B"]),
            course("D", &["C"]),
        ])
        .unwrap();
        let deps: Vec<&str> = cat.direct_dependents("A").unwrap().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(deps, vec!["B", "C"]);
        assert_eq!(cat.prerequisite_indices(2), vec![0, 1]);
        assert_eq!(cat.prerequisite_edges().len(), 4);
        assert_eq!(
            cat.prerequisite_edges()[0],
            PrerequisiteEdge { prerequisite: "A".into(), dependent: "B".into() }
        );
    }

    #[test]
    fn test_eligibility_is_one_hop() {
        let mut cat = Catalog::new(vec![course("A", &[]), course("B", &["A"]), course("C", &["B"])]).unwrap();
        assert!(cat.is_eligible("A").unwrap());
        assert!(!cat.is_eligible("B").unwrap());
        // B elegido "a mano" sin A: C sólo mira a B
        cat.course_mut(1).sections[0].set_selected(true);
        assert!(cat.is_eligible("C").unwrap());
        assert_eq!(cat.missing_prerequisites_at(1).len(), 1);
        assert_eq!(cat.all_selected_sections().len(), 1);
    }
}
