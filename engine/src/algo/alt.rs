//! ALT preprocessing: landmark selection and landmark distance tables,
//! and the potential function derived from them.
//!
//! For a landmark L the triangle inequality gives
//! `d(v, t) >= d(L, t) - d(L, v)`, so the tabulated distances from L bound
//! the remaining distance of any vertex to any target from below. Taking
//! the maximum over several well-spread landmarks makes the bound tight
//! enough to prune most of the search space.

use super::bfs::hop_distances;
use super::dijkstra::DijkstraDriver;
use super::*;
use crate::algo::a_star::Potential;
use rand::Rng;
use rayon::prelude::*;

/// K landmarks sampled uniformly at random. Duplicates are possible and
/// harmless; a duplicated landmark just contributes the same bound twice.
pub fn pick_random_landmarks(graph: &impl Graph, count: usize, rng: &mut impl Rng) -> Vec<NodeId> {
    assert!(graph.num_nodes() > 0, "cannot pick landmarks from an empty graph");
    (0..count).map(|_| rng.gen_range(0..graph.num_nodes()) as NodeId).collect()
}

/// K landmarks by farthest-point iteration in hop distance: start from a
/// random vertex, then repeatedly add the vertex with the most hops to the
/// already chosen set. This pushes landmarks towards the extremes of the
/// network, which is where they yield the tightest bounds. The production
/// default.
pub fn pick_farthest_landmarks(graph: &impl LinkIterGraph, count: usize, rng: &mut impl Rng) -> Vec<NodeId> {
    assert!(graph.num_nodes() > 0, "cannot pick landmarks from an empty graph");
    assert!(count > 0);

    let mut landmarks = Vec::with_capacity(count);
    landmarks.push(rng.gen_range(0..graph.num_nodes()) as NodeId);
    let mut hops_to_set = hop_distances(graph, landmarks[0]);

    while landmarks.len() < count {
        // arg max, ties broken towards the smaller id; vertex 0 when every
        // vertex already touches the set
        let mut next = 0;
        let mut max_hops = 0;
        for (node, &hops) in hops_to_set.iter().enumerate() {
            if hops > max_hops {
                max_hops = hops;
                next = node as NodeId;
            }
        }
        landmarks.push(next);

        for (hops_to_set, hops) in hops_to_set.iter_mut().zip(hop_distances(graph, next)) {
            *hops_to_set = (*hops_to_set).min(hops);
        }
    }

    landmarks
}

/// Weighted shortest distances from every landmark to every node, stored
/// row-major as one contiguous K × n matrix of 64 bit entries. Built once at
/// startup and read-only afterwards; queries share it freely.
#[derive(Debug)]
pub struct LandmarkDistances {
    landmarks: Vec<NodeId>,
    distances: Vec<Weight>,
    num_nodes: usize,
}

impl LandmarkDistances {
    /// One full Dijkstra per landmark. The searches are independent, so they
    /// run in parallel, each with its own driver.
    pub fn compute<G: LinkIterGraph + Sync>(graph: &G, landmarks: Vec<NodeId>) -> LandmarkDistances {
        let num_nodes = graph.num_nodes();
        let rows: Vec<Vec<Weight>> = landmarks
            .par_iter()
            .map(|&landmark| DijkstraDriver::new(num_nodes).one_to_all(graph, landmark))
            .collect();

        LandmarkDistances {
            landmarks,
            distances: rows.concat(),
            num_nodes,
        }
    }

    pub fn landmarks(&self) -> &[NodeId] {
        &self.landmarks
    }

    pub fn num_landmarks(&self) -> usize {
        self.landmarks.len()
    }

    /// The distances from the i-th landmark to every node.
    pub fn from_landmark(&self, landmark_rank: usize) -> &[Weight] {
        &self.distances[landmark_rank * self.num_nodes..(landmark_rank + 1) * self.num_nodes]
    }
}

/// The ALT potential for one target:
/// `max over L of max(0, d(L, target) - d(L, node))`.
///
/// Landmarks which cannot reach the node or the target contribute nothing,
/// keeping the bound non-negative and the sentinel out of the arithmetic.
/// The bound is admissible and feasible because it is derived from true
/// shortest distances, so A* with it settles vertices in final order.
#[derive(Debug)]
pub struct AltPotential<'a> {
    tables: &'a LandmarkDistances,
    target_distances: Vec<Weight>,
}

impl<'a> AltPotential<'a> {
    pub fn new(tables: &'a LandmarkDistances) -> AltPotential<'a> {
        AltPotential {
            tables,
            target_distances: vec![0; tables.num_landmarks()],
        }
    }
}

impl Potential for AltPotential<'_> {
    fn init(&mut self, target: NodeId) {
        let tables = self.tables;
        for (landmark_rank, target_distance) in self.target_distances.iter_mut().enumerate() {
            *target_distance = tables.from_landmark(landmark_rank)[target as usize];
        }
    }

    fn potential(&mut self, node: NodeId) -> Weight {
        let mut best = 0;
        for (landmark_rank, &target_distance) in self.target_distances.iter().enumerate() {
            if target_distance == INFINITY {
                continue;
            }
            let node_distance = self.tables.from_landmark(landmark_rank)[node as usize];
            if node_distance == INFINITY {
                continue;
            }
            best = best.max(target_distance - node_distance);
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datastr::graph::adjacency_array::AdjacencyArrayGraph;
    use rand::prelude::*;

    fn diamond() -> AdjacencyArrayGraph {
        AdjacencyArrayGraph::from_adjacency_lists(vec![
            vec![Link { node: 1, weight: 1 }, Link { node: 2, weight: 5 }],
            vec![Link { node: 3, weight: 5 }],
            vec![Link { node: 3, weight: 1 }],
            vec![],
        ])
    }

    #[test]
    fn farthest_landmarks_reach_the_far_end() {
        // a directed cycle of 8 nodes: the second landmark always sits the
        // maximal hop count away from the first
        let graph = AdjacencyArrayGraph::from_adjacency_lists(
            (0..8).map(|node| vec![Link { node: (node + 1) % 8, weight: 1 }]).collect(),
        );

        let mut rng = StdRng::seed_from_u64(42);
        let landmarks = pick_farthest_landmarks(&graph, 2, &mut rng);
        assert_eq!(landmarks.len(), 2);
        let hops = hop_distances(&graph, landmarks[0]);
        assert_eq!(hops[landmarks[1] as usize], 7);
    }

    #[test]
    fn random_landmarks_are_in_range() {
        let graph = diamond();
        let mut rng = StdRng::seed_from_u64(7);
        let landmarks = pick_random_landmarks(&graph, 10, &mut rng);
        assert_eq!(landmarks.len(), 10);
        assert!(landmarks.iter().all(|&l| (l as usize) < graph.num_nodes()));
    }

    #[test]
    fn tables_match_single_source_dijkstra() {
        let graph = diamond();
        let tables = LandmarkDistances::compute(&graph, vec![0, 3]);

        assert_eq!(tables.from_landmark(0), &[0, 1, 5, 6]);
        // node 3 has no outgoing edges, everything else is unreachable
        assert_eq!(tables.from_landmark(1), &[INFINITY, INFINITY, INFINITY, 0]);
    }

    #[test]
    fn potential_is_admissible_and_zero_at_target() {
        let graph = diamond();
        let tables = LandmarkDistances::compute(&graph, vec![0, 3]);
        let mut potential = AltPotential::new(&tables);
        potential.init(3);

        assert_eq!(potential.potential(3), 0);
        // true remaining distances to 3: node 0 -> 6, node 1 -> 5, node 2 -> 1
        let true_remaining = [6, 5, 1, 0];
        for node in 0..4 {
            let bound = potential.potential(node);
            assert!(bound >= 0);
            assert!(bound <= true_remaining[node as usize]);
        }
    }

    #[test]
    fn unreachable_landmark_contributes_nothing() {
        // landmark 3 reaches nothing, landmark 1 cannot reach node 0
        let graph = diamond();
        let tables = LandmarkDistances::compute(&graph, vec![3, 1]);
        let mut potential = AltPotential::new(&tables);
        potential.init(3);

        for node in 0..4 {
            assert!(potential.potential(node) >= 0);
        }
        // only landmark 1 is usable here: d(1, 3) - d(1, 2) is skipped
        // because node 2 is unreachable from landmark 1
        assert_eq!(potential.potential(2), 0);
    }
}
