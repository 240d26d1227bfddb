//! Search algorithms: Dijkstra/A*, BFS and the ALT preprocessing on top.

use crate::datastr::graph::*;

pub mod a_star;
pub mod alt;
pub mod bfs;
pub mod dijkstra;

/// Simply a source-target pair
#[derive(Debug, Clone, Copy)]
pub struct Query {
    pub from: NodeId,
    pub to: NodeId,
}

/// Everything a point-to-point search produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Shortest distance from source to target, `None` when unreachable.
    pub distance: Option<Weight>,
    /// The shortest path in target-first order; empty when unreachable.
    pub path: Vec<NodeId>,
    /// Every vertex in the order it was popped from the queue. Diagnostic
    /// output, consumed by the animation renderer.
    pub visit_order: Vec<NodeId>,
}
