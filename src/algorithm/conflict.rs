// Funciones para detectar choques de horario entre secciones elegidas.
use crate::catalog::Catalog;
use crate::error::ConflictInfo;
use crate::models::{Course, Section, TimeSlot};

fn conflict_info(course: &Course, section: &Section) -> ConflictInfo {
    ConflictInfo {
        course: course.course_ref(),
        section_id: section.id.clone(),
        time_slot: section.time_slot.clone(),
    }
}

/// Primera sección elegida (en orden del catálogo) que choca con `slot`.
/// El ramo `skip` no se considera: es el que se está eligiendo, y su sección
/// previa, si la hay, queda desalojada en caso de que la selección prospere.
pub fn find_conflict(catalog: &Catalog, slot: &TimeSlot, skip: usize) -> Option<ConflictInfo> {
    catalog
        .courses()
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != skip)
        .filter_map(|(_, c)| c.selected_section().map(|s| (c, s)))
        .find(|(_, s)| s.time_slot.conflicts(slot))
        .map(|(c, s)| conflict_info(c, s))
}

/// Barrido ordenado por (día, inicio): devuelve un par de secciones elegidas
/// que se solapan, si existe. Con el motor funcionando bien siempre es `None`.
pub fn first_overlap(catalog: &Catalog) -> Option<(ConflictInfo, ConflictInfo)> {
    let mut selected = catalog.all_selected_sections();
    selected.sort_by_key(|(_, s)| (s.time_slot.weekday(), s.time_slot.start()));

    // (ramo, sección) que termina más tarde dentro del día en curso
    let mut latest: Option<(&Course, &Section)> = None;
    for (c, s) in selected {
        if let Some((lc, ls)) = latest {
            if ls.time_slot.conflicts(&s.time_slot) {
                return Some((conflict_info(lc, ls), conflict_info(c, s)));
            }
            let same_day = ls.time_slot.weekday() == s.time_slot.weekday();
            if same_day && ls.time_slot.end() >= s.time_slot.end() {
                continue;
            }
        }
        latest = Some((c, s));
    }
    None
}
