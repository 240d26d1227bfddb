//! A point-to-point shortest path engine for large road networks.
//!
//! Queries are answered by Dijkstra's algorithm, optionally goal-directed
//! through the ALT technique (A*, Landmarks, Triangle inequality): a handful
//! of landmark vertices is selected during preprocessing, shortest distances
//! from every landmark to every vertex are tabulated, and at query time the
//! triangle inequality turns those tables into an admissible lower bound on
//! the remaining distance to the target.

#[macro_use]
pub mod report;
pub mod algo;
pub mod cli;
pub mod datastr;
pub mod import;
pub mod util;
