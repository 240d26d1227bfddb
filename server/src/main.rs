//! HTTP façade over the routing engine.
//!
//! Loads a road network, preprocesses ALT landmarks and serves map images
//! and animated shortest path searches on port 8888. The network and the
//! landmark tables are immutable once built and shared by all requests;
//! the per-query search state sits behind a lock, so every query runs
//! single-threaded on its own state.

#[macro_use]
extern crate rocket;

mod render;

use alt_routing_engine::{
    algo::{a_star::ZeroPotential, alt::*, dijkstra::DijkstraDriver, Query},
    cli::CliErr,
    datastr::graph::*,
    import::dimacs,
    report::benchmark::report_time,
};
use rand::prelude::*;
use rocket::{
    fs::{relative, FileServer},
    http::ContentType,
    response::Debug,
    serde::{json::Json, Serialize},
    State,
};
use std::{env, error::Error, sync::Mutex};

const NUM_LANDMARKS: usize = 16;
const LANDMARK_SEED: u64 = 42;

struct RoutingState {
    network: RoadNetwork,
    tables: LandmarkDistances,
    driver: Mutex<DijkstraDriver>,
}

/// Parses an integer, clamped into `[min, max]`, falling back to the
/// default when the parameter is absent or not a number.
fn parse_int(value: Option<&str>, min: i64, max: i64, default: i64) -> i64 {
    value.and_then(|value| value.parse().ok()).unwrap_or(default).clamp(min, max)
}

/// Parses one part of a decimal-degree coordinate into fixed-point units.
fn parse_coordinate_part(value: Option<&str>, min: f64, max: f64, default: f64) -> i32 {
    match value.and_then(|value| value.parse::<f64>().ok()) {
        Some(degrees) => (degrees.clamp(min, max) * 1e6) as i32,
        None => (default * 1e6) as i32,
    }
}

/// Parses a position given as `"42.2808,-83.7430"` (latitude first).
fn parse_coordinates(value: Option<&str>, default_lat: f64, default_lng: f64) -> Coordinate {
    match value.and_then(|value| value.split_once(',')) {
        Some((lat, lng)) => Coordinate {
            lat: parse_coordinate_part(Some(lat.trim()), -180.0, 180.0, default_lat),
            lng: parse_coordinate_part(Some(lng.trim()), -180.0, 180.0, default_lng),
        },
        None => Coordinate {
            lat: (default_lat * 1e6) as i32,
            lng: (default_lng * 1e6) as i32,
        },
    }
}

#[get("/map?<centerx>&<centery>&<radius>&<size>")]
fn map(
    centerx: Option<&str>,
    centery: Option<&str>,
    radius: Option<&str>,
    size: Option<&str>,
    state: &State<RoutingState>,
) -> Result<(ContentType, Vec<u8>), Debug<gif::EncodingError>> {
    let center = Coordinate {
        lat: parse_coordinate_part(centery, -180.0, 180.0, 44.0),
        lng: parse_coordinate_part(centerx, -180.0, 180.0, -85.0),
    };
    let radius = parse_coordinate_part(radius, 0.01, 90.0, 5.0);
    let size = parse_int(size, 24, 2000, 400) as usize;

    Ok((ContentType::GIF, render::draw_map(&state.network, center, radius, size)?))
}

#[get("/shortest-path?<src>&<dest>&<size>&<frames>&<delay>&<algorithm>")]
fn shortest_path(
    src: Option<&str>,
    dest: Option<&str>,
    size: Option<&str>,
    frames: Option<&str>,
    delay: Option<&str>,
    algorithm: Option<&str>,
    state: &State<RoutingState>,
) -> Result<(ContentType, Vec<u8>), Debug<gif::EncodingError>> {
    let network = &state.network;
    let mut rng = rand::thread_rng();

    let snap_or_random = |value: Option<&str>, default_lat: f64, default_lng: f64, rng: &mut ThreadRng| match value {
        Some(value) => network
            .closest_node(parse_coordinates(Some(value), default_lat, default_lng))
            .expect("network is never empty while serving"),
        None => rng.gen_range(0..network.num_nodes()) as NodeId,
    };
    let from = snap_or_random(src, 42.28, -83.74, &mut rng);
    let to = snap_or_random(dest, 41.65, -83.53, &mut rng);

    let size = parse_int(size, 24, 2000, 400) as usize;
    let frames = parse_int(frames, 1, 120, 15) as usize;
    let delay = (parse_int(delay, 0, 2000, 500) / 10) as u16;

    let query = Query { from, to };
    let result = {
        let mut driver = state.driver.lock().unwrap();
        match algorithm {
            Some("dijkstra") => driver.search(network.graph(), query, &mut ZeroPotential),
            _ => {
                let mut potential = AltPotential::new(&state.tables);
                driver.search(network.graph(), query, &mut potential)
            }
        }
    };

    let image = render::draw_search(network, state.tables.landmarks(), query, &result, size, frames, delay)?;
    Ok((ContentType::GIF, image))
}

#[get("/vertex?<i>")]
fn vertex(i: Option<&str>, state: &State<RoutingState>) -> String {
    let network = &state.network;
    let Some(id) = i.and_then(|value| value.parse::<i64>().ok()) else {
        return "error: invalid \"i\" parameter".to_string();
    };
    if id < 1 || id > network.num_nodes() as i64 {
        return "error: index out of range".to_string();
    }
    let node = (id - 1) as NodeId;

    let mut out = format!("Coordinates: {}\nEdges:\n", network.coordinate(node));
    for Link { node: head, weight } in network.graph().link_iter(node) {
        out.push_str(&format!(
            "\tDestination: {} at {}, Distance: {}\n",
            head + 1,
            network.coordinate(head),
            weight
        ));
    }
    out
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
struct ClosestVertexResponse {
    #[serde(rename = "Lat")]
    lat: i32,
    #[serde(rename = "Long")]
    lng: i32,
    #[serde(rename = "NodeId")]
    node_id: NodeId,
}

#[get("/closest-vertex?<x>&<y>")]
fn closest_vertex(x: Option<&str>, y: Option<&str>, state: &State<RoutingState>) -> Json<ClosestVertexResponse> {
    let position = Coordinate {
        lat: parse_coordinate_part(y, -180.0, 180.0, 44.0),
        lng: parse_coordinate_part(x, -180.0, 180.0, -85.0),
    };
    let node = state.network.closest_node(position).expect("network is never empty while serving");
    let coordinate = state.network.coordinate(node);
    Json(ClosestVertexResponse {
        lat: coordinate.lat,
        lng: coordinate.lng,
        node_id: node,
    })
}

#[rocket::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let (coordinate_file, arc_file) = {
        let mut args = env::args().skip(1);
        let coordinate_file = args.next().ok_or(CliErr("No coordinate file arg given"))?;
        let arc_file = args.next().ok_or(CliErr("No arc file arg given"))?;
        (coordinate_file, arc_file)
    };

    let network = report_time("loading graph", || dimacs::read_road_network(&coordinate_file, &arc_file))?;
    if network.num_nodes() == 0 {
        return Err(CliErr("refusing to serve an empty network").into());
    }

    let mut rng = StdRng::seed_from_u64(LANDMARK_SEED);
    let landmarks = report_time("picking landmarks", || {
        pick_farthest_landmarks(network.graph(), NUM_LANDMARKS, &mut rng)
    });
    let tables = report_time("computing landmark distances", || {
        LandmarkDistances::compute(network.graph(), landmarks)
    });

    let driver = Mutex::new(DijkstraDriver::new(network.num_nodes()));
    let state = RoutingState { network, tables, driver };

    let figment = rocket::Config::figment().merge(("port", 8888));
    rocket::custom(figment)
        .manage(state)
        .mount("/", routes![map, shortest_path, vertex, closest_vertex])
        .mount("/", FileServer::from(relative!("static")))
        .launch()
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_are_clamped_with_defaults() {
        assert_eq!(parse_int(None, 24, 2000, 400), 400);
        assert_eq!(parse_int(Some("garbage"), 24, 2000, 400), 400);
        assert_eq!(parse_int(Some("3"), 24, 2000, 400), 24);
        assert_eq!(parse_int(Some("9999"), 24, 2000, 400), 2000);
        assert_eq!(parse_int(Some("100"), 24, 2000, 400), 100);
    }

    #[test]
    fn coordinates_parse_latitude_first() {
        let position = parse_coordinates(Some("42.5,-83.25"), 0.0, 0.0);
        assert_eq!(position, Coordinate { lat: 42_500_000, lng: -83_250_000 });

        let fallback = parse_coordinates(Some("not-a-pair"), 42.5, -83.25);
        assert_eq!(fallback, Coordinate { lat: 42_500_000, lng: -83_250_000 });
    }
}
