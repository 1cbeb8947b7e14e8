//! Coordinate order conversions.
//!
//! GeoJSON and the host application speak `[lng, lat]`; the engine speaks
//! `[lat, lng]` and [`LatLng`]. These helpers never panic: input of an
//! unrecognized shape yields `None`.

use crate::core::geo::{LatLng, LatLngBounds};
use serde_json::Value;

/// A point in either representation accepted by [`to_lng_lat`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coordinate<'a> {
    Pair(&'a [f64]),
    LatLng(LatLng),
}

impl<'a> From<&'a [f64]> for Coordinate<'a> {
    fn from(pair: &'a [f64]) -> Self {
        Coordinate::Pair(pair)
    }
}

impl<'a> From<&'a [f64; 2]> for Coordinate<'a> {
    fn from(pair: &'a [f64; 2]) -> Self {
        Coordinate::Pair(pair.as_slice())
    }
}

impl From<LatLng> for Coordinate<'_> {
    fn from(lat_lng: LatLng) -> Self {
        Coordinate::LatLng(lat_lng)
    }
}

/// A bounding box in either representation accepted by [`to_lng_lat_bounds`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundsInput<'a> {
    Pairs(&'a [[f64; 2]]),
    LatLngBounds(&'a LatLngBounds),
}

/// Converts `[lng, lat]` to `[lat, lng]`
pub fn to_lat_lng(lng_lat: [f64; 2]) -> [f64; 2] {
    [lng_lat[1], lng_lat[0]]
}

/// Converts `[lat, lng]` or a [`LatLng`] to `[lng, lat]`
pub fn to_lng_lat<'a>(point: impl Into<Coordinate<'a>>) -> Option<[f64; 2]> {
    match point.into() {
        Coordinate::Pair(&[lat, lng]) => Some([lng, lat]),
        Coordinate::Pair(_) => None,
        Coordinate::LatLng(lat_lng) => Some([lat_lng.lng, lat_lng.lat]),
    }
}

/// Like [`to_lng_lat`] for loosely typed host input: a two-number array or a
/// `{lat, lng}` object
pub fn to_lng_lat_json(value: &Value) -> Option<[f64; 2]> {
    match value {
        Value::Array(items) => {
            let pair = items.iter().map(Value::as_f64).collect::<Option<Vec<_>>>()?;
            to_lng_lat(pair.as_slice())
        }
        Value::Object(object) => {
            let lat = object.get("lat")?.as_f64()?;
            let lng = object.get("lng")?.as_f64()?;
            to_lng_lat(LatLng::new(lat, lng))
        }
        _ => None,
    }
}

/// Converts `[[lng, lat], [lng, lat]]` to `[[lat, lng], [lat, lng]]`
pub fn to_lat_lng_bounds(bounds: &[[f64; 2]; 2]) -> [[f64; 2]; 2] {
    [to_lat_lng(bounds[0]), to_lat_lng(bounds[1])]
}

/// Converts `[[lat, lng], [lat, lng]]` or a [`LatLngBounds`] to
/// `[[lng, lat], [lng, lat]]` (south-west first for bounds objects)
pub fn to_lng_lat_bounds(bounds: BoundsInput<'_>) -> Option<[[f64; 2]; 2]> {
    match bounds {
        BoundsInput::Pairs(&[south_west, north_east]) => {
            Some([to_lng_lat(&south_west)?, to_lng_lat(&north_east)?])
        }
        BoundsInput::Pairs(_) => None,
        BoundsInput::LatLngBounds(bounds) => Some([
            to_lng_lat(bounds.south_west)?,
            to_lng_lat(bounds.north_east)?,
        ]),
    }
}

/// Parses `[[lat, lng], [lat, lng]]` host input into engine bounds
pub fn lat_lng_bounds_from_json(value: &Value) -> Option<LatLngBounds> {
    let corners = value.as_array()?;
    if corners.len() != 2 {
        return None;
    }

    let mut bounds = LatLngBounds::empty();
    for corner in corners {
        // The pair is already in internal order, so swapping yields [lng, lat]
        let [lng, lat] = to_lng_lat_json(corner)?;
        bounds.extend(&LatLng::new(lat, lng));
    }
    Some(bounds)
}
