use crate::core::{
    constants::{EARTH_RADIUS, TILE_SIZE},
    geo::{LatLng, LatLngBounds, Point},
};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

const MAX_LATITUDE: f64 = 85.0511287798;

/// Manages the current view of the map: center, zoom, and screen dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: Point,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self {
            center,
            zoom: zoom.clamp(0.0, 20.0),
            size,
            min_zoom: 0.0,
            max_zoom: 20.0,
        }
    }

    /// Sets the center of the viewport, clamped to the projectable world
    pub fn set_center(&mut self, center: LatLng) {
        self.center = LatLng::new(
            center.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE),
            center.lng.clamp(-180.0, 180.0),
        );
    }

    /// Sets the zoom level, clamping to valid range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Sets the viewport size
    pub fn set_size(&mut self, size: Point) {
        self.size = size;
    }

    /// Sets the zoom limits
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom = self.zoom.clamp(min_zoom, max_zoom);
    }

    /// Gets the scale factor for the current zoom level
    pub fn scale(&self) -> f64 {
        2_f64.powf(self.zoom)
    }

    /// Projects a LatLng to world pixel coordinates (Web Mercator, EPSG:3857)
    pub fn project(&self, lat_lng: &LatLng, zoom: Option<f64>) -> Point {
        let z = zoom.unwrap_or(self.zoom);
        let scale = f64::from(TILE_SIZE) * 2_f64.powf(z);
        let lat = lat_lng.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);

        let x = lat_lng.lng.to_radians() * EARTH_RADIUS;
        let y = (PI / 4.0 + lat.to_radians() / 2.0).tan().ln() * EARTH_RADIUS;

        let world = 2.0 * PI * EARTH_RADIUS;
        Point::new(
            (x + PI * EARTH_RADIUS) / world * scale,
            (-y + PI * EARTH_RADIUS) / world * scale,
        )
    }

    /// Unprojects world pixel coordinates back to LatLng
    pub fn unproject(&self, pixel: &Point, zoom: Option<f64>) -> LatLng {
        let z = zoom.unwrap_or(self.zoom);
        let scale = f64::from(TILE_SIZE) * 2_f64.powf(z);
        let world = 2.0 * PI * EARTH_RADIUS;

        let x = (pixel.x / scale) * world - PI * EARTH_RADIUS;
        let y = PI * EARTH_RADIUS - (pixel.y / scale) * world;

        let lng = (x / EARTH_RADIUS).to_degrees();
        let lat = (2.0 * (y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees();
        LatLng::new(lat, lng)
    }

    /// Gets the current viewport bounds in geographical coordinates
    pub fn bounds(&self) -> LatLngBounds {
        let center = self.project(&self.center, None);
        let half = Point::new(self.size.x / 2.0, self.size.y / 2.0);

        let nw = self.unproject(&center.subtract(&half), None);
        let se = self.unproject(&Point::new(center.x + half.x, center.y + half.y), None);

        LatLngBounds::new(LatLng::new(se.lat, nw.lng), LatLng::new(nw.lat, se.lng))
    }

    /// Centers the viewport on `bounds` at the largest integer zoom that
    /// still shows all of it
    pub fn fit_bounds(&mut self, bounds: &LatLngBounds, padding: Option<f64>) {
        let padding = padding.unwrap_or(0.0);
        let available = Point::new(self.size.x - 2.0 * padding, self.size.y - 2.0 * padding);

        let mut best_zoom = self.min_zoom;
        for test_zoom in (self.min_zoom.ceil() as i32)..=(self.max_zoom.floor() as i32) {
            let zoom = f64::from(test_zoom);

            let nw = self.project(
                &LatLng::new(bounds.north_east.lat, bounds.south_west.lng),
                Some(zoom),
            );
            let se = self.project(
                &LatLng::new(bounds.south_west.lat, bounds.north_east.lng),
                Some(zoom),
            );

            if (se.x - nw.x).abs() <= available.x && (se.y - nw.y).abs() <= available.y {
                best_zoom = zoom;
            } else {
                break;
            }
        }

        self.set_center(bounds.center());
        self.set_zoom(best_zoom);
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(LatLng::new(0.0, 0.0), 0.0, Point::new(800.0, 600.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_creation() {
        let viewport = Viewport::new(
            LatLng::new(40.7128, -74.0060),
            10.0,
            Point::new(800.0, 600.0),
        );

        assert_eq!(viewport.zoom, 10.0);
        assert_eq!(viewport.center.lat, 40.7128);
        assert_eq!(viewport.size.x, 800.0);
    }

    #[test]
    fn test_projection_round_trip() {
        let viewport = Viewport::default();
        let lat_lng = LatLng::new(8.4657, -11.7799);
        let back = viewport.unproject(&viewport.project(&lat_lng, Some(7.0)), Some(7.0));

        assert!((back.lat - lat_lng.lat).abs() < 1e-9);
        assert!((back.lng - lat_lng.lng).abs() < 1e-9);
        assert_eq!(
            viewport.project(&LatLng::new(0.0, 0.0), Some(0.0)),
            Point::new(128.0, 128.0)
        );
    }

    #[test]
    fn test_zoom_limits() {
        let mut viewport = Viewport::default();
        viewport.set_zoom_limits(2.0, 15.0);

        viewport.set_zoom(1.0); // Below minimum
        assert_eq!(viewport.zoom, 2.0);

        viewport.set_zoom(20.0); // Above maximum
        assert_eq!(viewport.zoom, 15.0);
    }

    #[test]
    fn test_fit_bounds() {
        // Sierra Leone on a 800x600 map fits at zoom 8
        let mut viewport = Viewport::default();
        let bounds = LatLngBounds::from_coords(6.9679, -13.29096, 9.9432, -10.4887);
        viewport.fit_bounds(&bounds, None);

        assert_eq!(viewport.zoom, 8.0);
        assert_eq!(viewport.center, bounds.center());
        assert!(viewport.bounds().contains(&bounds.south_west));
        assert!(viewport.bounds().contains(&bounds.north_east));
    }
}
