use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::core::constants::EARTH_RADIUS;

const MAX_LATITUDE: f64 = 85.0511287798;

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Creates a LatLng from an external `[lng, lat]` pair
    pub fn from_lng_lat(lng_lat: [f64; 2]) -> Self {
        Self::new(lng_lat[1], lng_lat[0])
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }

    /// Calculates the distance to another LatLng using the Haversine formula
    pub fn distance_to(&self, other: &LatLng) -> f64 {
        let lat1_rad = self.lat.to_radians();
        let lat2_rad = other.lat.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lng = (other.lng - self.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS * c
    }

    /// Clamps latitude to the Web Mercator range
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
    }

    /// Bounds of a circle of `radius` meters around this point
    pub fn to_bounds(&self, radius: f64) -> LatLngBounds {
        let lat_delta = (radius / EARTH_RADIUS).to_degrees();
        let lng_delta = lat_delta / self.lat.to_radians().cos().max(f64::EPSILON);

        LatLngBounds::new(
            LatLng::new(self.lat - lat_delta, self.lng - lng_delta),
            LatLng::new(self.lat + lat_delta, self.lng + lng_delta),
        )
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a point in screen or projected coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a bounding box of geographical coordinates.
///
/// A bounds built with [`LatLngBounds::empty`] is invalid until it is
/// extended with at least one point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// An empty bounds that contains nothing
    pub fn empty() -> Self {
        Self::new(
            LatLng::new(f64::INFINITY, f64::INFINITY),
            LatLng::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        )
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self::new(LatLng::new(south, west), LatLng::new(north, east))
    }

    /// Smallest bounds containing every point, `None` for an empty slice
    pub fn from_points(points: &[LatLng]) -> Option<Self> {
        let mut bounds = Self::empty();
        for point in points {
            bounds.extend(point);
        }
        bounds.is_valid().then_some(bounds)
    }

    /// True once the bounds contain at least one point
    pub fn is_valid(&self) -> bool {
        self.south_west.lat <= self.north_east.lat && self.south_west.lng <= self.north_east.lng
    }

    /// Checks if the bounds contain a point
    pub fn contains(&self, point: &LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }

    /// Checks if the bounds intersect with another bounds
    pub fn intersects(&self, other: &LatLngBounds) -> bool {
        !(other.north_east.lat < self.south_west.lat
            || other.south_west.lat > self.north_east.lat
            || other.north_east.lng < self.south_west.lng
            || other.south_west.lng > self.north_east.lng)
    }

    /// Extends the bounds to include a point
    pub fn extend(&mut self, point: &LatLng) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    /// Extends the bounds to include another bounds; invalid bounds are ignored
    pub fn extend_bounds(&mut self, other: &LatLngBounds) {
        if other.is_valid() {
            self.extend(&other.south_west);
            self.extend(&other.north_east);
        }
    }

    /// Gets the center point of the bounds
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }

    /// Returns the union of this bounds with another bounds
    pub fn union(&self, other: &LatLngBounds) -> LatLngBounds {
        let mut union = self.clone();
        union.extend_bounds(other);
        union
    }
}

impl Default for LatLngBounds {
    fn default() -> Self {
        Self::empty()
    }
}

/// Represents a tile coordinate in the slippy map tile system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl TileCoord {
    pub fn new(x: u32, y: u32, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Creates a tile coordinate from a LatLng and zoom level
    pub fn from_lat_lng(lat_lng: &LatLng, zoom: u8) -> Self {
        let lat_rad = LatLng::clamp_lat(lat_lng.lat).to_radians();
        let n = 2_f64.powi(zoom as i32);

        let x = ((lat_lng.lng + 180.0) / 360.0 * n).floor() as u32;
        let y = ((1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n).floor() as u32;

        Self::new(x, y, zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lng_creation() {
        let coord = LatLng::new(40.7128, -74.0060);
        assert_eq!(coord.lat, 40.7128);
        assert_eq!(coord.lng, -74.0060);
        assert!(coord.is_valid());
        assert_eq!(LatLng::from_lng_lat([-74.0060, 40.7128]), coord);
    }

    #[test]
    fn test_lat_lng_distance() {
        let nyc = LatLng::new(40.7128, -74.0060);
        let la = LatLng::new(34.0522, -118.2437);
        let distance = nyc.distance_to(&la);

        // Distance should be approximately 3944 km
        assert!((distance - 3944000.0).abs() < 10000.0);
    }

    #[test]
    fn test_empty_bounds() {
        let mut bounds = LatLngBounds::empty();
        assert!(!bounds.is_valid());

        bounds.extend_bounds(&LatLngBounds::empty());
        assert!(!bounds.is_valid());

        bounds.extend(&LatLng::new(8.0, -12.0));
        assert!(bounds.is_valid());
        assert_eq!(bounds.south_west, bounds.north_east);
    }

    #[test]
    fn test_bounds_union() {
        let a = LatLngBounds::from_coords(0.0, 0.0, 1.0, 1.0);
        let b = LatLngBounds::from_coords(-1.0, 0.5, 0.5, 2.0);
        let union = a.union(&b);

        assert_eq!(union, LatLngBounds::from_coords(-1.0, 0.0, 1.0, 2.0));
        assert!(union.contains(&LatLng::new(0.0, 1.5)));
    }

    #[test]
    fn test_circle_bounds() {
        let center = LatLng::new(0.0, 10.0);
        let bounds = center.to_bounds(1000.0);

        assert!(bounds.contains(&center));
        assert!((bounds.north_east.lat - 0.008983).abs() < 1e-5);
    }

    #[test]
    fn test_tile_coord_from_lat_lng() {
        let tile = TileCoord::from_lat_lng(&LatLng::new(0.0, 0.0), 1);
        assert_eq!(tile, TileCoord::new(1, 1, 1));
    }
}
