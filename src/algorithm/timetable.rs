// Vista de horario por semestre: (día, franja) -> ramo/sección elegidos.
// Los números de entrada siguen el orden del catálogo dentro de cada semestre.
use crate::catalog::Catalog;
use crate::models::views::{SemesterTimetable, Timetable, TimetableEntry};

pub fn build_timetable(catalog: &Catalog) -> Timetable {
    let mut semesters: Vec<SemesterTimetable> = catalog
        .semesters()
        .into_iter()
        .map(|semester| SemesterTimetable { semester, entries: Vec::new() })
        .collect();

    for (course, section) in catalog.all_selected_sections() {
        let Some(sem) = semesters.iter_mut().find(|s| s.semester == course.semester) else {
            continue;
        };
        let number = sem.entries.len() as u32 + 1;
        sem.entries.push(TimetableEntry {
            number,
            weekday: section.time_slot.weekday(),
            time_range: section.time_slot.time_range(),
            course_id: course.id.clone(),
            course_name: course.name.clone(),
            credit: course.credit,
            section_id: section.id.clone(),
            instructor: section.instructor.clone(),
            location: section.time_slot.location().to_string(),
        });
    }

    Timetable { semesters }
}
