//! Unweighted breadth-first search.

use super::*;
use std::collections::VecDeque;

/// Number of hops from `source` to every node along outgoing edges,
/// `INFINITY` for unreachable nodes. Only used to spread landmarks; hop
/// distance is much cheaper than weighted distance and spreads just as well.
pub fn hop_distances(graph: &impl LinkIterGraph, source: NodeId) -> Vec<Weight> {
    let mut distances = vec![INFINITY; graph.num_nodes()];
    let mut queue = VecDeque::new();

    distances[source as usize] = 0;
    queue.push_back(source);

    while let Some(node) = queue.pop_front() {
        for Link { node: head, .. } in graph.link_iter(node) {
            if distances[head as usize] == INFINITY {
                distances[head as usize] = distances[node as usize] + 1;
                queue.push_back(head);
            }
        }
    }

    distances
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datastr::graph::adjacency_array::AdjacencyArrayGraph;

    #[test]
    fn counts_hops_not_weights() {
        // 0 -> 1 -> 2, plus a heavy shortcut 0 -> 2; node 3 is unreachable
        let graph = AdjacencyArrayGraph::from_adjacency_lists(vec![
            vec![Link { node: 1, weight: 100 }, Link { node: 2, weight: 1000 }],
            vec![Link { node: 2, weight: 100 }],
            vec![],
            vec![Link { node: 0, weight: 1 }],
        ]);

        assert_eq!(hop_distances(&graph, 0), vec![0, 1, 1, INFINITY]);
        assert_eq!(hop_distances(&graph, 3), vec![1, 2, 2, 0]);
    }
}
