use crate::{
    core::{constants::LABEL_PRECISION, geo::LatLng},
    data::geojson::Geometry,
    spatial::polylabel::polylabel,
};
use geo::ChamberlainDuquetteArea;
use geo_types::{Coord, LineString, Polygon};

/// Builds a geo polygon from GeoJSON rings (first ring is the outline)
pub fn rings_to_polygon(rings: &[Vec<[f64; 2]>]) -> Option<Polygon<f64>> {
    let (exterior, interiors) = rings.split_first()?;
    Some(Polygon::new(
        ring_to_line_string(exterior),
        interiors.iter().map(|ring| ring_to_line_string(ring)).collect(),
    ))
}

fn ring_to_line_string(ring: &[[f64; 2]]) -> LineString<f64> {
    ring.iter()
        .map(|&[x, y]| Coord { x, y })
        .collect::<Vec<_>>()
        .into()
}

/// Signed spherical area of a polygon's outer ring in square meters,
/// clockwise rings are positive (the GeoJSON area convention)
pub fn outer_ring_area(rings: &[Vec<[f64; 2]>]) -> f64 {
    rings
        .first()
        .map(|outline| {
            -Polygon::new(ring_to_line_string(outline), vec![]).chamberlain_duquette_signed_area()
        })
        .unwrap_or(0.0)
}

/// Picks the polygon whose outer ring has the largest signed area.
///
/// The first polygon is the fallback; later polygons only win with a
/// strictly greater positive area.
pub fn largest_polygon(polygons: &[Vec<Vec<[f64; 2]>>]) -> Option<&Vec<Vec<[f64; 2]>>> {
    let mut biggest = polygons.first()?;

    if polygons.len() > 1 {
        let mut biggest_size = 0.0;
        for polygon in polygons {
            let size = outer_ring_area(polygon);
            if size > biggest_size {
                biggest = polygon;
                biggest_size = size;
            }
        }
    }

    Some(biggest)
}

/// Returns the best label anchor for a geometry, in internal order.
///
/// Points are returned as is; polygons use the pole of inaccessibility of
/// the polygon (the largest one for multi polygons). Other geometry types
/// have no label anchor.
pub fn label_lat_lng(geometry: &Geometry) -> Option<LatLng> {
    let rings = match geometry {
        Geometry::Point { coordinates } => return Some(LatLng::from_lng_lat(*coordinates)),
        Geometry::Polygon { coordinates } => coordinates,
        Geometry::MultiPolygon { coordinates } => largest_polygon(coordinates)?,
        _ => return None,
    };

    let polygon = rings_to_polygon(rings)?;
    let pole = polylabel(&polygon, LABEL_PRECISION)?;

    Some(LatLng::new(pole.y, pole.x))
}
