//! Potential functions for goal-directed search.

use crate::datastr::graph::*;

/// A per-vertex lower bound on the remaining distance to a fixed target.
///
/// The search driver keys its queue by `distance + potential`, which turns
/// Dijkstra into A*. Implementations must be feasible: for every edge
/// `(u, v)` with weight `w`, `w - potential(u) + potential(v) >= 0` must
/// hold, otherwise settled vertices are no longer final and the search may
/// return non-optimal paths. `init` is called with the target before any
/// `potential` call of a query.
pub trait Potential {
    fn init(&mut self, target: NodeId);
    fn potential(&mut self, node: NodeId) -> Weight;
}

/// The zero potential. Turns the driver into plain Dijkstra.
#[derive(Debug)]
pub struct ZeroPotential;

impl Potential for ZeroPotential {
    fn init(&mut self, _target: NodeId) {}
    fn potential(&mut self, _node: NodeId) -> Weight {
        0
    }
}
