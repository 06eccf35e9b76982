//! Cycle detection over the prerequisite graph.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::models::SubtaskId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    /// On the current DFS path
    Open,
    /// Fully explored, or abandoned after a cycle was found
    Done,
}

/// A dependency cycle found by [`find_cycles`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    /// Subtask whose revisit closed the cycle
    pub closing: SubtaskId,
    /// Path from `closing` back to itself, following prerequisite edges
    pub nodes: Vec<SubtaskId>,
}

/// Depth-first search over `graph` (subtask → prerequisites).
///
/// Roots and neighbors are visited in id order. A back edge to a node on the
/// current path is reported as a cycle, after which the rest of that DFS
/// tree is abandoned, so each tree contributes at most one cycle.
pub fn find_cycles(graph: &BTreeMap<SubtaskId, BTreeSet<SubtaskId>>) -> Vec<Cycle> {
    let adjacency: BTreeMap<SubtaskId, Vec<SubtaskId>> = graph
        .iter()
        .map(|(id, prerequisites)| (*id, prerequisites.iter().copied().collect()))
        .collect();

    let mut marks: HashMap<SubtaskId, Mark> = HashMap::new();
    let mut cycles = Vec::new();

    for &root in adjacency.keys() {
        if marks.contains_key(&root) {
            continue;
        }
        marks.insert(root, Mark::Open);
        let mut path = vec![root];
        let mut cursors = vec![0usize];

        while let Some(&node) = path.last() {
            let Some(cursor) = cursors.last_mut() else {
                break;
            };
            let next = adjacency.get(&node).and_then(|n| n.get(*cursor)).copied();
            let Some(next) = next else {
                marks.insert(node, Mark::Done);
                path.pop();
                cursors.pop();
                continue;
            };
            *cursor += 1;

            match marks.get(&next) {
                None => {
                    marks.insert(next, Mark::Open);
                    path.push(next);
                    cursors.push(0);
                }
                Some(Mark::Open) => {
                    let start = path.iter().position(|id| *id == next).unwrap_or(0);
                    let mut nodes = path[start..].to_vec();
                    nodes.push(next);
                    cycles.push(Cycle {
                        closing: next,
                        nodes,
                    });
                    for id in path.drain(..) {
                        marks.insert(id, Mark::Done);
                    }
                    cursors.clear();
                }
                Some(Mark::Done) => {}
            }
        }
    }

    cycles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> SubtaskId {
        s.parse().unwrap()
    }

    fn graph(edges: &[(&str, &[&str])]) -> BTreeMap<SubtaskId, BTreeSet<SubtaskId>> {
        edges
            .iter()
            .map(|(node, prerequisites)| (id(node), prerequisites.iter().map(|p| id(p)).collect()))
            .collect()
    }

    #[test]
    fn test_acyclic_graph() {
        let g = graph(&[("0.1.1", &[]), ("0.1.2", &["0.1.1"]), ("0.1.3", &["0.1.1", "0.1.2"])]);
        assert!(find_cycles(&g).is_empty());
    }

    #[test]
    fn test_single_back_edge() {
        let g = graph(&[("0.1.1", &["0.1.3"]), ("0.1.2", &["0.1.1"]), ("0.1.3", &["0.1.2"])]);
        let cycles = find_cycles(&g);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].closing, id("0.1.1"));
        assert_eq!(
            cycles[0].nodes,
            vec![id("0.1.1"), id("0.1.3"), id("0.1.2"), id("0.1.1")]
        );
    }

    #[test]
    fn test_self_dependency() {
        let g = graph(&[("1.1.1", &["1.1.1"])]);
        let cycles = find_cycles(&g);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].nodes, vec![id("1.1.1"), id("1.1.1")]);
    }

    #[test]
    fn test_separate_trees_report_separately() {
        let g = graph(&[
            ("0.1.1", &["0.1.2"]),
            ("0.1.2", &["0.1.1"]),
            ("1.1.1", &["1.1.2"]),
            ("1.1.2", &["1.1.1"]),
        ]);
        assert_eq!(find_cycles(&g).len(), 2);
    }
}
