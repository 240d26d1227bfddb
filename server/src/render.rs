//! Animated GIF rendering of the network and of search runs.
//!
//! Everything is drawn into a palettized pixel buffer: the vertices of the
//! viewport in grey, then one frame per animation step with the visited
//! vertices in gold, and a final frame with the shortest path in blue and
//! circles around the endpoints and the landmarks.

use alt_routing_engine::{
    algo::{Query, SearchResult},
    datastr::graph::*,
};
use gif::{Encoder, Frame, Repeat};
use std::borrow::Cow;

pub const BACKGROUND_COLOR: u8 = 0;
pub const UNVISITED_COLOR: u8 = 1;
pub const LANDMARK_COLOR: u8 = 3;
pub const PATH_COLOR: u8 = 4;
pub const VISITED_COLOR: u8 = 5;

// white, grey, green, red, blue, gold
const PALETTE: [u8; 18] = [
    255, 255, 255, //
    128, 128, 128, //
    0, 255, 0, //
    255, 0, 0, //
    0, 0, 255, //
    255, 215, 0, //
];

const MARKER_RADIUS: i64 = 5;
/// Minimum viewport radius in 10⁻⁶ degree units, so tiny searches still
/// render some surroundings.
const MIN_VIEW_RADIUS: i32 = 50_000;

/// A square window over the map, in coordinate units.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    min_lat: i32,
    min_lng: i32,
    radius: i32,
    size: usize,
}

impl Viewport {
    pub fn new(center: Coordinate, radius: i32, size: usize) -> Viewport {
        Viewport {
            min_lat: center.lat - radius,
            min_lng: center.lng - radius,
            radius,
            size,
        }
    }

    /// A viewport covering the given vertices: centered on their bounding
    /// box, radius slightly beyond half its extent, at least
    /// `MIN_VIEW_RADIUS`.
    fn covering(network: &RoadNetwork, nodes: impl Iterator<Item = NodeId>, size: usize) -> Viewport {
        let mut min_lat = 180_000_000;
        let mut max_lat = -180_000_000;
        let mut min_lng = 180_000_000;
        let mut max_lng = -180_000_000;
        for node in nodes {
            let Coordinate { lat, lng } = network.coordinate(node);
            min_lat = min_lat.min(lat);
            max_lat = max_lat.max(lat);
            min_lng = min_lng.min(lng);
            max_lng = max_lng.max(lng);
        }

        let center = Coordinate {
            lat: (min_lat + max_lat) / 2,
            lng: (min_lng + max_lng) / 2,
        };
        let extent = i64::from(max_lat - min_lat).max(i64::from(max_lng - min_lng));
        let radius = ((extent * 11 / 20) as i32).max(MIN_VIEW_RADIUS);
        Viewport::new(center, radius, size)
    }

    fn contains(&self, coordinate: Coordinate) -> bool {
        coordinate.lat >= self.min_lat
            && coordinate.lat <= self.min_lat + 2 * self.radius
            && coordinate.lng >= self.min_lng
            && coordinate.lng <= self.min_lng + 2 * self.radius
    }

    /// Pixel position of a coordinate; y grows southwards. May lie outside
    /// the canvas for coordinates outside the viewport.
    fn pixel(&self, coordinate: Coordinate) -> (i64, i64) {
        let size = self.size as i64;
        let x = i64::from(coordinate.lng - self.min_lng) * size / (2 * i64::from(self.radius));
        let y = i64::from(coordinate.lat - self.min_lat) * size / (2 * i64::from(self.radius));
        (x, size - y)
    }
}

#[derive(Debug, Clone)]
struct Canvas {
    size: usize,
    pixels: Vec<u8>,
}

impl Canvas {
    fn new(size: usize) -> Canvas {
        Canvas {
            size,
            pixels: vec![BACKGROUND_COLOR; size * size],
        }
    }

    /// Out of bounds pixels are silently dropped, like markers half outside
    /// the window.
    fn set(&mut self, x: i64, y: i64, color: u8) {
        let size = self.size as i64;
        if x >= 0 && x < size && y >= 0 && y < size {
            self.pixels[(y * size + x) as usize] = color;
        }
    }

    fn plot(&mut self, viewport: &Viewport, coordinate: Coordinate, color: u8) {
        if viewport.contains(coordinate) {
            let (x, y) = viewport.pixel(coordinate);
            self.set(x, y, color);
        }
    }

    /// Midpoint circle outline around (x0, y0).
    fn draw_circle(&mut self, x0: i64, y0: i64, radius: i64, color: u8) {
        let (mut x, mut y) = (radius - 1, 0);
        let (mut dx, mut dy) = (1, 1);
        let mut err = dx - 2 * radius;

        while x > y {
            self.set(x0 + x, y0 + y, color);
            self.set(x0 + y, y0 + x, color);
            self.set(x0 - y, y0 + x, color);
            self.set(x0 - x, y0 + y, color);
            self.set(x0 - x, y0 - y, color);
            self.set(x0 - y, y0 - x, color);
            self.set(x0 + y, y0 - x, color);
            self.set(x0 + x, y0 - y, color);

            if err <= 0 {
                y += 1;
                err += dy;
                dy += 2;
            }
            if err > 0 {
                x -= 1;
                dx += 2;
                err += dx - 2 * radius;
            }
        }
    }

    fn mark_node(&mut self, viewport: &Viewport, network: &RoadNetwork, node: NodeId, color: u8) {
        let (x, y) = viewport.pixel(network.coordinate(node));
        self.draw_circle(x, y, MARKER_RADIUS, color);
    }
}

fn base_map(network: &RoadNetwork, viewport: &Viewport) -> Canvas {
    let mut canvas = Canvas::new(viewport.size);
    for &coordinate in network.coordinates() {
        canvas.plot(viewport, coordinate, UNVISITED_COLOR);
    }
    canvas
}

fn encode(frames: Vec<(Canvas, u16)>, size: usize) -> Result<Vec<u8>, gif::EncodingError> {
    let mut buffer = Vec::new();
    let mut encoder = Encoder::new(&mut buffer, size as u16, size as u16, &PALETTE)?;
    encoder.set_repeat(Repeat::Infinite)?;
    for (canvas, delay) in &frames {
        let mut frame = Frame::default();
        frame.width = size as u16;
        frame.height = size as u16;
        frame.buffer = Cow::Borrowed(&canvas.pixels);
        frame.delay = *delay;
        encoder.write_frame(&frame)?;
    }
    drop(encoder);
    Ok(buffer)
}

/// A single-frame GIF of every vertex inside the window.
pub fn draw_map(network: &RoadNetwork, center: Coordinate, radius: i32, size: usize) -> Result<Vec<u8>, gif::EncodingError> {
    let viewport = Viewport::new(center, radius, size);
    encode(vec![(base_map(network, &viewport), 0)], size)
}

/// The search animation: the visit sequence spread over `frames` frames,
/// then the shortest path, with the final frame held seven times as long.
pub fn draw_search(
    network: &RoadNetwork,
    landmarks: &[NodeId],
    query: Query,
    result: &SearchResult,
    size: usize,
    frames: usize,
    delay: u16,
) -> Result<Vec<u8>, gif::EncodingError> {
    let viewport = Viewport::covering(network, result.visit_order.iter().copied(), size);
    let mut canvas = base_map(network, &viewport);
    let mut animation = Vec::new();

    let mut steps_per_frame = result.visit_order.len();
    if frames > 1 {
        steps_per_frame = (steps_per_frame / (frames - 1)).max(1);
    }

    let draw_markers = |canvas: &mut Canvas| {
        canvas.mark_node(&viewport, network, query.from, PATH_COLOR);
        canvas.mark_node(&viewport, network, query.to, PATH_COLOR);
        for &landmark in landmarks {
            canvas.mark_node(&viewport, network, landmark, LANDMARK_COLOR);
        }
    };

    for (step, &node) in result.visit_order.iter().enumerate() {
        canvas.plot(&viewport, network.coordinate(node), VISITED_COLOR);

        if frames > 1 && step % steps_per_frame == 0 {
            let mut snapshot = canvas.clone();
            draw_markers(&mut snapshot);
            animation.push((snapshot, delay));
        }
    }

    for &node in &result.path {
        canvas.plot(&viewport, network.coordinate(node), PATH_COLOR);
    }
    draw_markers(&mut canvas);
    animation.push((canvas, delay * 7));

    encode(animation, size)
}
