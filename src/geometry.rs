//! GeoJSON geometry decoding and the spatial predicates the resolver
//! needs: exact point containment and polygon area.
//!
//! Feature documents carry geometry as raw GeoJSON values; only the
//! types the index actually stores are decoded.

use geo::{Area, Contains};
use geo_types::{Coord, Geometry, LineString, MultiPolygon, Point, Polygon};
use serde_json::Value;

/// Decode a GeoJSON geometry object into geo types.
///
/// Returns `None` for malformed input or unsupported geometry types.
pub fn parse_geometry(value: &Value) -> Option<Geometry<f64>> {
    let geo_type = value.get("type")?.as_str()?;
    let coordinates = value.get("coordinates")?;

    match geo_type {
        "Point" => {
            let c = coord(coordinates)?;
            Some(Geometry::Point(Point::from(c)))
        }
        "LineString" => {
            let coords = coords(coordinates)?;
            if coords.len() < 2 {
                return None;
            }
            Some(Geometry::LineString(LineString::new(coords)))
        }
        "Polygon" => polygon(coordinates).map(Geometry::Polygon),
        "MultiPolygon" => {
            let polygons: Vec<Polygon<f64>> = coordinates
                .as_array()?
                .iter()
                .filter_map(polygon)
                .collect();
            if polygons.is_empty() {
                return None;
            }
            Some(Geometry::MultiPolygon(MultiPolygon::new(polygons)))
        }
        _ => None,
    }
}

/// Whether the geometry contains the exact point
pub fn contains_point(geometry: &Geometry<f64>, lon: f64, lat: f64) -> bool {
    geometry.contains(&Point::new(lon, lat))
}

/// Unsigned area in squared degrees, used only for relative ranking
/// of contained shapes
pub fn area(geometry: &Geometry<f64>) -> f64 {
    geometry.unsigned_area()
}

fn coord(value: &Value) -> Option<Coord<f64>> {
    let pair = value.as_array()?;
    let x = pair.first()?.as_f64()?;
    let y = pair.get(1)?.as_f64()?;
    Some(Coord { x, y })
}

fn coords(value: &Value) -> Option<Vec<Coord<f64>>> {
    value.as_array()?.iter().map(coord).collect()
}

fn ring(value: &Value) -> Option<LineString<f64>> {
    let mut coords = coords(value)?;
    if coords.len() < 3 {
        return None;
    }
    // Close the ring if needed
    if coords.first() != coords.last() {
        coords.push(coords[0]);
    }
    Some(LineString::new(coords))
}

fn polygon(value: &Value) -> Option<Polygon<f64>> {
    let rings = value.as_array()?;
    let exterior = ring(rings.first()?)?;
    let interiors: Vec<LineString<f64>> = rings.iter().skip(1).filter_map(ring).collect();
    Some(Polygon::new(exterior, interiors))
}
