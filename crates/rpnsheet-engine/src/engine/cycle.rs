//! Cycle extraction for a stalled sheet.
//!
//! The fixpoint loop never builds a dependency graph, so when it stalls we
//! only know *which* cells are stuck. This module walks the pending
//! references between those cells with a depth-first search to name one
//! concrete cycle (e.g. A1 -> B1 -> A1) for the error report.

use std::collections::HashSet;

use super::cell::{Cell, Registry};

/// Find a reference cycle among `stuck` cells (arena indices).
/// Returns the cycle as cell names, first name repeated at the end.
pub fn detect_cycle(stuck: &[usize], cells: &[Cell], registry: &Registry) -> Option<Vec<String>> {
    let stuck_set: HashSet<usize> = stuck.iter().copied().collect();
    let mut finished = HashSet::new();

    for &start in stuck {
        let mut visiting = HashSet::new();
        let mut path = Vec::new();
        if detect_cycle_dfs(
            start,
            cells,
            registry,
            &stuck_set,
            &mut visiting,
            &mut finished,
            &mut path,
        ) {
            let closing = path.last().copied()?;
            let from = path.iter().position(|&i| i == closing)?;
            return Some(path[from..].iter().map(|&i| cells[i].name.clone()).collect());
        }
    }
    None
}

fn detect_cycle_dfs(
    current: usize,
    cells: &[Cell],
    registry: &Registry,
    stuck: &HashSet<usize>,
    visiting: &mut HashSet<usize>,
    finished: &mut HashSet<usize>,
    path: &mut Vec<usize>,
) -> bool {
    if visiting.contains(&current) {
        path.push(current);
        return true;
    }
    if finished.contains(&current) {
        return false;
    }

    visiting.insert(current);
    path.push(current);

    let deps: Vec<usize> = cells[current]
        .pending_refs()
        .filter_map(|name| registry.get(name))
        .filter(|index| stuck.contains(index))
        .collect();

    for dep in deps {
        if detect_cycle_dfs(dep, cells, registry, stuck, visiting, finished, path) {
            return true;
        }
    }

    path.pop();
    visiting.remove(&current);
    finished.insert(current);
    false
}
