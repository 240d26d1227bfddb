//! Loader for DIMACS-style road network text files.
//!
//! Two line-oriented ASCII files describe a network. The coordinate file
//! carries `v <id> <longitude> <latitude>` lines, one per vertex in id
//! order, positions as signed integers in 10⁻⁶ degree units; note that
//! longitude precedes latitude on disk. The arc file carries
//! `a <src> <dest> <weight>` lines with 1-based vertex ids. All other lines
//! (comments, problem headers) are ignored. Ids are converted to 0-based
//! on load. A malformed field or an out-of-range id fails the whole load;
//! no partial graph is ever returned.

use crate::datastr::graph::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("line {line}: malformed {what} record")]
    Malformed { what: &'static str, line: usize },
    #[error("line {line}: vertex id {id} out of range 1..={num_nodes}")]
    IdOutOfRange { id: i64, num_nodes: usize, line: usize },
    #[error("line {line}: negative arc weight {weight}")]
    NegativeWeight { weight: i64, line: usize },
}

/// Reads the vertex positions of a coordinate file, in file order.
pub fn read_coordinates(input: impl BufRead) -> Result<Vec<Coordinate>, ImportError> {
    let mut coordinates = Vec::new();
    for (line_number, line) in input.lines().enumerate() {
        let line = line?;
        let Some(fields) = line.strip_prefix("v ") else { continue };
        let malformed = || ImportError::Malformed {
            what: "coordinate",
            line: line_number + 1,
        };
        let (_id, lng, lat) = parse_three_ints(fields).ok_or_else(malformed)?;
        coordinates.push(Coordinate {
            lat: i32::try_from(lat).map_err(|_| malformed())?,
            lng: i32::try_from(lng).map_err(|_| malformed())?,
        });
    }
    Ok(coordinates)
}

/// Reads the arc file into one outgoing link list per vertex.
pub fn read_arcs(input: impl BufRead, num_nodes: usize) -> Result<Vec<Vec<Link>>, ImportError> {
    let mut adjacency_lists = vec![Vec::new(); num_nodes];
    for (line_number, line) in input.lines().enumerate() {
        let line = line?;
        let Some(fields) = line.strip_prefix("a ") else { continue };
        let line = line_number + 1;
        let (src, dest, weight) = parse_three_ints(fields).ok_or(ImportError::Malformed { what: "arc", line })?;
        for id in [src, dest] {
            if id < 1 || id > num_nodes as i64 {
                return Err(ImportError::IdOutOfRange { id, num_nodes, line });
            }
        }
        if weight < 0 {
            return Err(ImportError::NegativeWeight { weight, line });
        }
        adjacency_lists[(src - 1) as usize].push(Link {
            node: (dest - 1) as NodeId,
            weight,
        });
    }
    Ok(adjacency_lists)
}

/// Loads a complete road network from a coordinate file and an arc file.
pub fn read_road_network(coordinate_path: impl AsRef<Path>, arc_path: impl AsRef<Path>) -> Result<RoadNetwork, ImportError> {
    let coordinates = read_coordinates(BufReader::new(File::open(coordinate_path)?))?;
    let adjacency_lists = read_arcs(BufReader::new(File::open(arc_path)?), coordinates.len())?;
    Ok(RoadNetwork::new(
        AdjacencyArrayGraph::from_adjacency_lists(adjacency_lists),
        coordinates,
    ))
}

fn parse_three_ints(fields: &str) -> Option<(i64, i64, i64)> {
    let mut fields = fields.split_whitespace();
    let first = fields.next()?.parse().ok()?;
    let second = fields.next()?.parse().ok()?;
    let third = fields.next()?.parse().ok()?;
    Some((first, second, third))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_coordinates_longitude_first() {
        let input = "c USA-road-d.NY.co\np aux sp co 2\nv 1 -73994167 40750417\nv 2 -73976806 40745518\n";
        let coordinates = read_coordinates(input.as_bytes()).unwrap();
        assert_eq!(
            coordinates,
            vec![
                Coordinate { lat: 40_750_417, lng: -73_994_167 },
                Coordinate { lat: 40_745_518, lng: -73_976_806 },
            ]
        );
    }

    #[test]
    fn parses_arcs_to_zero_based_lists() {
        let input = "c comment\np sp 3 3\na 1 2 803\na 2 3 305\na 3 1 947\n";
        let adjacency_lists = read_arcs(input.as_bytes(), 3).unwrap();
        assert_eq!(adjacency_lists[0], vec![Link { node: 1, weight: 803 }]);
        assert_eq!(adjacency_lists[1], vec![Link { node: 2, weight: 305 }]);
        assert_eq!(adjacency_lists[2], vec![Link { node: 0, weight: 947 }]);
    }

    #[test]
    fn malformed_field_fails_the_load() {
        let result = read_coordinates("v 1 nonsense 40750417\n".as_bytes());
        assert!(matches!(result, Err(ImportError::Malformed { what: "coordinate", line: 1 })));

        let result = read_arcs("a 1 2\n".as_bytes(), 2);
        assert!(matches!(result, Err(ImportError::Malformed { what: "arc", line: 1 })));
    }

    #[test]
    fn out_of_range_id_fails_the_load() {
        let result = read_arcs("a 1 4 10\n".as_bytes(), 3);
        assert!(matches!(result, Err(ImportError::IdOutOfRange { id: 4, num_nodes: 3, .. })));

        let result = read_arcs("a 0 1 10\n".as_bytes(), 3);
        assert!(matches!(result, Err(ImportError::IdOutOfRange { id: 0, .. })));
    }

    #[test]
    fn negative_weight_fails_the_load() {
        let result = read_arcs("a 1 2 -5\n".as_bytes(), 2);
        assert!(matches!(result, Err(ImportError::NegativeWeight { weight: -5, .. })));
    }
}
