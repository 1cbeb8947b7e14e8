//! Pole of inaccessibility: the interior point of a polygon farthest from
//! its outline, found with a quadtree-style search over square cells.

use geo::{BoundingRect, Centroid, Contains, EuclideanDistance};
use geo_types::{Coord, Point, Polygon};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A square search cell centered on `center` with half-size `half`
#[derive(Debug, Clone, Copy)]
struct Cell {
    center: Coord<f64>,
    half: f64,
    /// Signed distance from the center to the polygon outline
    distance: f64,
    /// Upper bound of the distance reachable inside this cell
    max_distance: f64,
}

impl Cell {
    fn new(center: Coord<f64>, half: f64, polygon: &Polygon<f64>) -> Self {
        let distance = signed_distance(center, polygon);
        Self {
            center,
            half,
            distance,
            max_distance: distance + half * std::f64::consts::SQRT_2,
        }
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.max_distance.total_cmp(&other.max_distance) == Ordering::Equal
    }
}

impl Eq for Cell {}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> Ordering {
        self.max_distance.total_cmp(&other.max_distance)
    }
}

/// Distance to the nearest ring, positive inside the polygon and negative outside
fn signed_distance(coord: Coord<f64>, polygon: &Polygon<f64>) -> f64 {
    let point = Point::from(coord);
    let distance = std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(|ring| point.euclidean_distance(ring))
        .fold(f64::INFINITY, f64::min);

    if distance == 0.0 {
        0.0
    } else if polygon.contains(&point) {
        distance
    } else {
        -distance
    }
}

fn centroid_cell(polygon: &Polygon<f64>) -> Option<Cell> {
    let outline = Polygon::new(polygon.exterior().clone(), vec![]);
    let center = outline
        .centroid()
        .map(Coord::from)
        .or_else(|| polygon.exterior().0.first().copied())?;
    Some(Cell::new(center, 0.0, polygon))
}

/// Finds the pole of inaccessibility of `polygon` to within `precision`.
///
/// Returns `None` for a polygon without coordinates. A polygon whose bounding
/// box has zero width or height yields the box's minimum corner.
pub fn polylabel(polygon: &Polygon<f64>, precision: f64) -> Option<Coord<f64>> {
    let bbox = polygon.exterior().bounding_rect()?;
    let (min, max) = (bbox.min(), bbox.max());
    let width = max.x - min.x;
    let height = max.y - min.y;
    let cell_size = width.min(height);

    if cell_size == 0.0 {
        return Some(min);
    }

    let half = cell_size / 2.0;
    let mut queue = BinaryHeap::new();

    let mut x = min.x;
    while x < max.x {
        let mut y = min.y;
        while y < max.y {
            queue.push(Cell::new(Coord { x: x + half, y: y + half }, half, polygon));
            y += cell_size;
        }
        x += cell_size;
    }

    let bbox_cell = Cell::new(
        Coord {
            x: min.x + width / 2.0,
            y: min.y + height / 2.0,
        },
        0.0,
        polygon,
    );
    let mut best = match centroid_cell(polygon) {
        Some(cell) if cell.distance >= bbox_cell.distance => cell,
        _ => bbox_cell,
    };

    while let Some(cell) = queue.pop() {
        if cell.distance > best.distance {
            best = cell;
        }

        if cell.max_distance - best.distance <= precision {
            continue;
        }

        let half = cell.half / 2.0;
        for (dx, dy) in [(-half, -half), (half, -half), (-half, half), (half, half)] {
            let center = Coord {
                x: cell.center.x + dx,
                y: cell.center.y + dy,
            };
            queue.push(Cell::new(center, half, polygon));
        }
    }

    Some(best.center)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{polygon, LineString};

    #[test]
    fn test_square_center() {
        let square = polygon![
            (x: 0.0, y: 0.0),
            (x: 10.0, y: 0.0),
            (x: 10.0, y: 10.0),
            (x: 0.0, y: 10.0),
        ];

        let pole = polylabel(&square, 0.1).unwrap();
        assert!((pole.x - 5.0).abs() < 0.1);
        assert!((pole.y - 5.0).abs() < 0.1);
    }

    #[test]
    fn test_pole_is_inside_concave_polygon() {
        // An L shape whose centroid falls outside the thick part
        let shape = polygon![
            (x: 0.0, y: 0.0),
            (x: 40.0, y: 0.0),
            (x: 40.0, y: 10.0),
            (x: 10.0, y: 10.0),
            (x: 10.0, y: 40.0),
            (x: 0.0, y: 40.0),
        ];

        let pole = polylabel(&shape, 0.5).unwrap();
        assert!(shape.contains(&Point::from(pole)));
        assert!(signed_distance(pole, &shape) >= 4.5);
    }

    #[test]
    fn test_hole_pushes_pole_away() {
        let with_hole = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (30.0, 0.0), (30.0, 30.0), (0.0, 30.0)]),
            vec![LineString::from(vec![
                (10.0, 10.0),
                (20.0, 10.0),
                (20.0, 20.0),
                (10.0, 20.0),
            ])],
        );

        let pole = polylabel(&with_hole, 0.5).unwrap();
        assert!(with_hole.contains(&Point::from(pole)));
    }

    #[test]
    fn test_degenerate_polygon() {
        let flat = polygon![(x: 1.0, y: 2.0), (x: 5.0, y: 2.0), (x: 3.0, y: 2.0)];
        assert_eq!(polylabel(&flat, 2.0), Some(Coord { x: 1.0, y: 2.0 }));
    }

    #[test]
    fn test_empty_polygon() {
        let empty = Polygon::new(LineString::<f64>::new(vec![]), vec![]);
        assert_eq!(polylabel(&empty, 2.0), None);
    }
}
