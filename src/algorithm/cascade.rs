// Descubrimiento de dependientes para la baja en cascada.
use petgraph::graph::NodeIndex;
use petgraph::visit::{Dfs, EdgeFiltered, EdgeRef};

use crate::catalog::Catalog;

/// Cierre transitivo de dependientes *elegidos* de `target`.
///
/// Se recorre el grafo prerequisito -> dependiente filtrando las aristas que
/// llegan a ramos sin sección elegida (no hay nada que deshacer en ellos).
/// El DFS lleva su propio conjunto de visitados, así un rombo se reporta una
/// sola vez y un ciclo no cuelga el recorrido. El resultado va en orden del
/// catálogo y nunca incluye a `target`.
pub fn find_dependents(catalog: &Catalog, target: usize) -> Vec<usize> {
    let courses = catalog.courses();
    let filtered = EdgeFiltered::from_fn(catalog.graph(), |edge| {
        courses[edge.target().index()].has_selected_section()
    });

    let mut dfs = Dfs::new(&filtered, NodeIndex::new(target));
    let mut found: Vec<usize> = Vec::new();
    while let Some(node) = dfs.next(&filtered) {
        if node.index() != target {
            found.push(node.index());
        }
    }
    found.sort_unstable();
    found
}
