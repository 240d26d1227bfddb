// Loads a DIMACS-style road network, preprocesses ALT landmarks and runs a
// batch of random point-to-point queries with plain Dijkstra and with ALT,
// reporting distances, visited-vertex counts and timings as JSON.

#[macro_use]
extern crate alt_routing_engine;

use alt_routing_engine::{
    algo::{a_star::ZeroPotential, alt::*, dijkstra::DijkstraDriver, Query},
    cli::CliErr,
    datastr::graph::*,
    import::dimacs,
    report::*,
};
use rand::prelude::*;
use std::{env, error::Error};

const NUM_LANDMARKS: usize = 16;
const NUM_QUERIES: usize = 100;

fn main() -> Result<(), Box<dyn Error>> {
    let _reporter = enable_reporting("random_queries");

    let mut args = env::args().skip(1);
    let coordinate_file = args.next().ok_or(CliErr("No coordinate file arg given"))?;
    let arc_file = args.next().ok_or(CliErr("No arc file arg given"))?;

    let network = report_time_with_key("loading graph", "graph_loading_ms", || dimacs::read_road_network(&coordinate_file, &arc_file))?;
    let graph = network.graph();
    report!("graph", { "num_nodes": graph.num_nodes(), "num_arcs": graph.num_arcs() });

    let seed = 42;
    report!("seed", seed);
    report!("num_landmarks", NUM_LANDMARKS);
    let mut rng = StdRng::seed_from_u64(seed);

    let landmarks = report_time_with_key("picking landmarks", "landmark_selection_ms", || {
        pick_farthest_landmarks(graph, NUM_LANDMARKS, &mut rng)
    });
    let tables = report_time_with_key("computing landmark distances", "landmark_tables_ms", || {
        LandmarkDistances::compute(graph, landmarks)
    });

    let mut driver = DijkstraDriver::new(graph.num_nodes());
    let mut algo_runs_ctxt = push_collection_context("algo_runs");

    for _ in 0..NUM_QUERIES {
        let query = Query {
            from: rng.gen_range(0..graph.num_nodes()) as NodeId,
            to: rng.gen_range(0..graph.num_nodes()) as NodeId,
        };
        let _query_ctxt = algo_runs_ctxt.push_collection_item();
        report!("from", query.from);
        report!("to", query.to);

        let (dijkstra_result, dijkstra_time) = measure(|| driver.search(graph, query, &mut ZeroPotential));
        let (alt_result, alt_time) = measure(|| {
            let mut potential = AltPotential::new(&tables);
            driver.search(graph, query, &mut potential)
        });

        assert_eq!(alt_result.distance, dijkstra_result.distance);
        assert!(alt_result.visit_order.len() <= dijkstra_result.visit_order.len());

        report!("distance", dijkstra_result.distance);
        report!("dijkstra_running_time_ms", dijkstra_time.as_secs_f64() * 1000.0);
        report!("dijkstra_num_queue_pops", dijkstra_result.visit_order.len());
        report!("alt_running_time_ms", alt_time.as_secs_f64() * 1000.0);
        report!("alt_num_queue_pops", alt_result.visit_order.len());
    }

    Ok(())
}
