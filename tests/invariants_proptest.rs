use proptest::prelude::*;

use xuanke::algorithm::conflict::first_overlap;
use xuanke::models::views::SelectedEntry;
use xuanke::{reference_catalog, SelectionEngine};

#[derive(Debug, Clone)]
enum Command {
    Select { course: usize, section: usize },
    Preview { course: usize },
    Drop { course: usize, confirmed: bool },
    Commit { course: usize },
}

fn command() -> impl Strategy<Value = Command> {
    // 16 ramos; hasta 4 secciones más un índice fuera de rango
    prop_oneof![
        4 => (0usize..16, 0usize..5).prop_map(|(course, section)| Command::Select { course, section }),
        1 => (0usize..16).prop_map(|course| Command::Preview { course }),
        1 => (0usize..16, any::<bool>()).prop_map(|(course, confirmed)| Command::Drop { course, confirmed }),
        1 => (0usize..16).prop_map(|course| Command::Commit { course }),
    ]
}

fn snapshot(e: &SelectionEngine) -> (Vec<SelectedEntry>, u32) {
    (e.selected_sections(), e.total_credits())
}

fn check_invariants(e: &SelectionEngine) {
    let courses = e.catalog().courses();
    let recomputed: u32 = courses.iter().filter(|c| c.has_selected_section()).map(|c| c.credit).sum();
    assert_eq!(e.total_credits(), recomputed);

    for (idx, c) in courses.iter().enumerate() {
        assert!(c.sections.iter().filter(|s| s.is_selected()).count() <= 1, "{} con más de una sección", c.id);
        if c.has_selected_section() {
            assert!(e.catalog().is_eligible_at(idx), "{} elegido sin prerequisitos", c.id);
        }
    }
    assert!(first_overlap(e.catalog()).is_none());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn random_commands_keep_invariants(commands in prop::collection::vec(command(), 1..60)) {
        let mut e = SelectionEngine::new(reference_catalog().unwrap());
        let ids: Vec<String> = e.catalog().courses().iter().map(|c| c.id.clone()).collect();

        for cmd in commands {
            let before = snapshot(&e);
            match cmd {
                Command::Select { course, section } => {
                    if e.select(&ids[course], section).is_err() {
                        prop_assert_eq!(snapshot(&e), before);
                    }
                }
                Command::Preview { course } => {
                    let _ = e.preview_drop(&ids[course]);
                    prop_assert_eq!(snapshot(&e), before);
                }
                Command::Drop { course, confirmed } => {
                    let preview = e.preview_drop(&ids[course]);
                    match e.drop_course(&ids[course], confirmed) {
                        Ok(summary) => {
                            let preview = preview.unwrap();
                            prop_assert_eq!(summary.credits_released, preview.credits_released);
                            prop_assert_eq!(before.1 - summary.credits_released, e.total_credits());
                            let dropped: Vec<&str> = summary.dependents.iter().map(|d| d.course.id.as_str()).collect();
                            let previewed: Vec<&str> = preview.dependents.iter().map(|d| d.id.as_str()).collect();
                            prop_assert_eq!(dropped, previewed);
                        }
                        Err(_) => prop_assert_eq!(snapshot(&e), before),
                    }
                }
                Command::Commit { course } => {
                    if let Ok(summary) = e.commit_drop(&ids[course]) {
                        prop_assert!(!e.catalog().courses()[course].has_selected_section());
                        for d in summary.dependents.iter() {
                            prop_assert!(e.catalog().find_course(&d.course.id).map(|c| !c.has_selected_section()).unwrap_or(false));
                        }
                    } else {
                        prop_assert_eq!(snapshot(&e), before);
                    }
                }
            }
            check_invariants(&e);
            prop_assert!(e.is_consistent());
        }
    }
}
