use geo_types::{Coord, Rect};

use crate::entities::{Coordinates, Waypoint};

/// Padded bounding box the map should fit into view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub bounds: Rect<f64>,
    pub padding: u32,
}

impl Viewport {
    /// Bounding box of `path`, `None` for an empty path.
    pub fn fit(path: &[Coordinates], padding: u32) -> Option<Self> {
        let first = path.first()?;

        let (mut min_lat, mut max_lat) = (first.latitude, first.latitude);
        let (mut min_lon, mut max_lon) = (first.longitude, first.longitude);

        for point in &path[1..] {
            min_lat = min_lat.min(point.latitude);
            max_lat = max_lat.max(point.latitude);
            min_lon = min_lon.min(point.longitude);
            max_lon = max_lon.max(point.longitude);
        }

        Some(Self {
            bounds: Rect::new(
                Coord::from(Coordinates::new(min_lat, min_lon)),
                Coord::from(Coordinates::new(max_lat, max_lon)),
            ),
            padding,
        })
    }

    pub fn south_west(&self) -> Coordinates {
        let min = self.bounds.min();
        Coordinates::new(min.y, min.x)
    }

    pub fn north_east(&self) -> Coordinates {
        let max = self.bounds.max();
        Coordinates::new(max.y, max.x)
    }

    pub fn center(&self) -> Coordinates {
        let center = self.bounds.center();
        Coordinates::new(center.y, center.x)
    }
}

/// The drawing side of the map. Only the route coordinator talks to it, so
/// there is at most one polyline and one marker set on screen.
pub trait MapSurface {
    fn draw_route(&mut self, path: &[Coordinates]);
    fn remove_route(&mut self);
    fn set_markers(&mut self, waypoints: &[Waypoint]);
    fn recenter(&mut self, center: Coordinates);
    fn fit_bounds(&mut self, viewport: Viewport);
}

/// Prints map changes to the terminal.
#[derive(Debug, Default)]
pub struct TerminalMap {
    has_route: bool,
}

impl MapSurface for TerminalMap {
    fn draw_route(&mut self, path: &[Coordinates]) {
        self.has_route = true;

        match (path.first(), path.last()) {
            (Some(from), Some(to)) => {
                println!("[map] route: {} points from {} to {}", path.len(), from, to)
            }
            _ => println!("[map] route: empty"),
        }
    }

    fn remove_route(&mut self) {
        if self.has_route {
            println!("[map] route removed");
        }

        self.has_route = false;
    }

    fn set_markers(&mut self, waypoints: &[Waypoint]) {
        if waypoints.is_empty() {
            println!("[map] markers cleared");
            return;
        }

        for (index, waypoint) in waypoints.iter().enumerate() {
            let kind = if index == 0 { "start" } else { "stop" };
            println!(
                "[map] marker {} ({}): {} @ {}",
                index + 1,
                kind,
                waypoint.display_name,
                waypoint.coordinates
            );
        }
    }

    fn recenter(&mut self, center: Coordinates) {
        println!("[map] centered on {}", center);
    }

    fn fit_bounds(&mut self, viewport: Viewport) {
        println!(
            "[map] fit bounds {} .. {} around {} (padding {}px)",
            viewport.south_west(),
            viewport.north_east(),
            viewport.center(),
            viewport.padding
        );
    }
}
