//! Dijkstra's algorithm with an optional potential, i.e. A*.

use super::a_star::{Potential, ZeroPotential};
use super::*;
use crate::datastr::{index_heap::*, timestamped_vector::*};
use crate::util::InRangeOption;
use std::sync::atomic::{AtomicBool, Ordering};

/// Priority queue entries. The key is `distance + potential`; the true
/// tentative path length lives only in the driver's distance array.
#[derive(Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Debug)]
pub struct State {
    pub key: Weight,
    pub node: NodeId,
}

impl Indexing for State {
    #[inline]
    fn as_index(&self) -> usize {
        self.node as usize
    }
}

/// Single-source shortest path search with lazy potential evaluation.
///
/// One driver holds the per-query state (distances, predecessors, processed
/// flags, memoized potentials, queue) for graphs of a fixed size and can be
/// reused across queries; all state is cleared on initialization. Nothing in
/// here mutates the graph, so many drivers may search the same graph
/// concurrently.
#[derive(Debug)]
pub struct DijkstraDriver {
    distances: TimestampedVector<Weight>,
    predecessors: TimestampedVector<InRangeOption<NodeId>>,
    potentials: TimestampedVector<InRangeOption<Weight>>,
    processed: TimestampedVector<bool>,
    queue: IndexedMinHeap<State>,
}

impl DijkstraDriver {
    pub fn new(num_nodes: usize) -> DijkstraDriver {
        DijkstraDriver {
            distances: TimestampedVector::new(num_nodes, INFINITY),
            predecessors: TimestampedVector::new(num_nodes, InRangeOption::new(None)),
            potentials: TimestampedVector::new(num_nodes, InRangeOption::new(None)),
            processed: TimestampedVector::new(num_nodes, false),
            queue: IndexedMinHeap::new(num_nodes),
        }
    }

    /// Clears all state of the previous query and relaxes the source.
    pub fn initialize(&mut self, source: NodeId, potential: &mut impl Potential) {
        self.queue.clear();
        self.distances.reset();
        self.predecessors.reset();
        self.potentials.reset();
        self.processed.reset();
        self.relax(None, source, 0, potential);
    }

    /// Pops the closest unsettled node and relaxes its outgoing edges, unless
    /// it is the target, which is merely popped: once the target comes off
    /// the queue its distance is final and the search is over.
    ///
    /// Returns the popped node, or `None` when the queue is exhausted.
    pub fn settle_next(&mut self, graph: &impl LinkIterGraph, target: Option<NodeId>, potential: &mut impl Potential) -> Option<NodeId> {
        let State { node, .. } = self.queue.pop()?;

        if Some(node) == target {
            return Some(node);
        }

        self.processed.set(node as usize, true);
        let distance = self.distances[node as usize];
        for Link { node: head, weight } in graph.link_iter(node) {
            if !self.processed[head as usize] {
                self.relax(Some(node), head, distance + weight, potential);
            }
        }

        Some(node)
    }

    fn relax(&mut self, pred: Option<NodeId>, node: NodeId, distance: Weight, potential: &mut impl Potential) {
        if distance < self.distances[node as usize] {
            self.distances.set(node as usize, distance);
            self.predecessors.set(node as usize, InRangeOption::new(pred));

            let state = State {
                key: distance + self.potential_at(node, potential),
                node,
            };
            if self.queue.contains_index(node as usize) {
                self.queue.update_key(state);
            } else {
                self.queue.push(state);
            }
        }
    }

    /// The potential is linear in the number of landmarks and most vertices
    /// are never touched, so it is evaluated on first touch and memoized for
    /// the rest of the query.
    fn potential_at(&mut self, node: NodeId, potential: &mut impl Potential) -> Weight {
        if let Some(cached) = self.potentials[node as usize].value() {
            return cached;
        }
        let value = potential.potential(node);
        self.potentials.set(node as usize, InRangeOption::new(Some(value)));
        value
    }

    /// Point-to-point search. With `ZeroPotential` this is plain Dijkstra,
    /// with an ALT potential it is goal-directed A*; results are identical,
    /// only the visit order shrinks.
    pub fn search(&mut self, graph: &impl LinkIterGraph, query: Query, potential: &mut impl Potential) -> SearchResult {
        self.search_interruptible(graph, query, potential, &AtomicBool::new(false))
    }

    /// Like `search`, but checks the cancellation flag once per settled
    /// vertex. An interrupted query reports the target as unreached; the
    /// caller implements timeouts by tripping the flag.
    pub fn search_interruptible(
        &mut self,
        graph: &impl LinkIterGraph,
        query: Query,
        potential: &mut impl Potential,
        cancelled: &AtomicBool,
    ) -> SearchResult {
        let Query { from, to } = query;
        if graph.num_nodes() == 0 {
            return SearchResult {
                distance: None,
                path: Vec::new(),
                visit_order: Vec::new(),
            };
        }
        debug_assert_eq!(self.distances.len(), graph.num_nodes());

        potential.init(to);
        self.initialize(from, potential);

        let mut visit_order = Vec::new();
        let mut interrupted = false;
        while let Some(node) = self.settle_next(graph, Some(to), potential) {
            visit_order.push(node);
            if node == to {
                break;
            }
            if cancelled.load(Ordering::Relaxed) {
                interrupted = true;
                break;
            }
        }

        let mut path = Vec::new();
        if !interrupted && self.distances[to as usize] < INFINITY {
            path.push(to);
            while *path.last().unwrap() != from {
                let pred = self.predecessors[*path.last().unwrap() as usize]
                    .value()
                    .expect("predecessor chain broken before reaching the source");
                path.push(pred);
            }
        }

        let distance = if path.is_empty() { None } else { Some(self.distances[to as usize]) };

        SearchResult { distance, path, visit_order }
    }

    /// Full single-source Dijkstra; the distance to every node, `INFINITY`
    /// where unreachable. This is what landmark preprocessing runs.
    pub fn one_to_all(&mut self, graph: &impl LinkIterGraph, source: NodeId) -> Vec<Weight> {
        if graph.num_nodes() == 0 {
            return Vec::new();
        }
        debug_assert_eq!(self.distances.len(), graph.num_nodes());

        let mut potential = ZeroPotential;
        self.initialize(source, &mut potential);
        while self.settle_next(graph, None, &mut potential).is_some() {}

        (0..graph.num_nodes()).map(|node| self.distances[node]).collect()
    }

    pub fn tentative_distance(&self, node: NodeId) -> Weight {
        self.distances[node as usize]
    }

    pub fn predecessor(&self, node: NodeId) -> Option<NodeId> {
        self.predecessors[node as usize].value()
    }

    pub fn queue(&self) -> &IndexedMinHeap<State> {
        &self.queue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datastr::graph::adjacency_array::AdjacencyArrayGraph;

    #[test]
    fn single_node_self_query() {
        let graph = AdjacencyArrayGraph::from_adjacency_lists(vec![vec![]]);
        let mut driver = DijkstraDriver::new(1);

        let result = driver.search(&graph, Query { from: 0, to: 0 }, &mut ZeroPotential);
        assert_eq!(result.distance, Some(0));
        assert_eq!(result.path, vec![0]);
        assert_eq!(result.visit_order, vec![0]);
    }

    #[test]
    fn unreachable_target_yields_empty_path() {
        // two components: {0, 1} and {2}
        let graph = AdjacencyArrayGraph::from_adjacency_lists(vec![
            vec![Link { node: 1, weight: 1 }],
            vec![Link { node: 0, weight: 1 }],
            vec![],
        ]);
        let mut driver = DijkstraDriver::new(3);

        let result = driver.search(&graph, Query { from: 0, to: 2 }, &mut ZeroPotential);
        assert_eq!(result.distance, None);
        assert!(result.path.is_empty());
        // the source component was exhausted before giving up
        assert_eq!(result.visit_order, vec![0, 1]);
    }

    #[test]
    fn empty_graph_yields_empty_result() {
        let graph = AdjacencyArrayGraph::new(vec![0], vec![], vec![]);
        let mut driver = DijkstraDriver::new(0);

        let result = driver.search(&graph, Query { from: 0, to: 0 }, &mut ZeroPotential);
        assert_eq!(result.distance, None);
        assert!(result.path.is_empty());
        assert!(result.visit_order.is_empty());
    }

    #[test]
    fn tripped_cancellation_stops_after_one_settle() {
        let graph = AdjacencyArrayGraph::from_adjacency_lists(vec![
            vec![Link { node: 1, weight: 1 }],
            vec![Link { node: 2, weight: 1 }],
            vec![],
        ]);
        let mut driver = DijkstraDriver::new(3);

        let cancelled = AtomicBool::new(true);
        let result = driver.search_interruptible(&graph, Query { from: 0, to: 2 }, &mut ZeroPotential, &cancelled);
        assert_eq!(result.visit_order, vec![0]);
        assert_eq!(result.distance, None);
        assert!(result.path.is_empty());
    }
}
