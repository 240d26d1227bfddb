//! Graph types and traits for the routing algorithms.

use std::fmt;

pub mod adjacency_array;

pub use adjacency_array::AdjacencyArrayGraph;

/// Node ids are dense 32bit unsigned ints
pub type NodeId = u32;
/// Edge ids are 32bit unsigned ints
pub type EdgeId = u32;
/// Weights and distance sums are 64bit signed ints
pub type Weight = i64;
/// Sentinel for unreachable. Never enters distance arithmetic: only finite
/// distances are ever summed with edge weights, and the ALT potential checks
/// for the sentinel explicitly.
pub const INFINITY: Weight = i64::MAX;

/// A weighted outgoing edge. Pure data, no behaviour.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Link {
    pub node: NodeId,
    pub weight: Weight,
}

/// Base trait for graphs.
pub trait Graph {
    fn num_nodes(&self) -> usize;
    fn num_arcs(&self) -> usize;
    fn degree(&self, node: NodeId) -> usize;
}

/// Graphs which can iterate the outgoing links of a node.
/// Iteration is sequential and read-only.
pub trait LinkIterGraph: Graph {
    fn link_iter(&self, node: NodeId) -> impl Iterator<Item = Link> + '_;
}

/// A geographic position in fixed-point 10⁻⁶ degree units.
///
/// This is the representation of the coordinate files and it is kept
/// end-to-end; nothing in the engine converts to floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coordinate {
    pub lat: i32,
    pub lng: i32,
}

impl Coordinate {
    /// Squared euclidean distance in coordinate units. Good enough for
    /// nearest-vertex snapping; fits i64 for the whole valid range.
    pub fn distance_squared(self, other: Coordinate) -> i64 {
        let dlat = i64::from(self.lat) - i64::from(other.lat);
        let dlng = i64::from(self.lng) - i64::from(other.lng);
        dlat * dlat + dlng * dlng
    }
}

impl fmt::Display for Coordinate {
    /// Formats as `"42.280800 N 83.743000 W"`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let lat_direction = if self.lat < 0 { "S" } else { "N" };
        let lng_direction = if self.lng < 0 { "W" } else { "E" };
        write!(
            f,
            "{:.6} {} {:.6} {}",
            f64::from(self.lat).abs() / 1e6,
            lat_direction,
            f64::from(self.lng).abs() / 1e6,
            lng_direction
        )
    }
}

/// A weighted road graph together with the position of every vertex.
#[derive(Debug)]
pub struct RoadNetwork {
    graph: AdjacencyArrayGraph,
    coordinates: Vec<Coordinate>,
}

impl RoadNetwork {
    pub fn new(graph: AdjacencyArrayGraph, coordinates: Vec<Coordinate>) -> RoadNetwork {
        assert_eq!(graph.num_nodes(), coordinates.len());
        RoadNetwork { graph, coordinates }
    }

    pub fn graph(&self) -> &AdjacencyArrayGraph {
        &self.graph
    }

    pub fn num_nodes(&self) -> usize {
        self.coordinates.len()
    }

    pub fn coordinate(&self, node: NodeId) -> Coordinate {
        self.coordinates[node as usize]
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    /// The vertex closest to the given position, by squared euclidean
    /// distance in coordinate units. `None` on an empty network.
    pub fn closest_node(&self, position: Coordinate) -> Option<NodeId> {
        self.coordinates
            .iter()
            .enumerate()
            .min_by_key(|(_, coordinate)| coordinate.distance_squared(position))
            .map(|(node, _)| node as NodeId)
    }
}
