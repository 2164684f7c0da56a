//! Serialized point geometry decoding.
//!
//! The tile server and the API hand out point geometries as text, either as
//! GeoJSON (`{"type":"Point","coordinates":[lng,lat]}`) or as WKT
//! (`POINT(lng lat)`, optionally prefixed with `SRID=4326;`). Both carry the
//! longitude first; [`parse_point`] returns a [`LatLng`] with the order swapped.

use serde::Deserialize;

use super::types::{GeometryError, LatLng};

#[derive(Deserialize)]
struct GeoJsonPoint {
    #[serde(rename = "type")]
    kind: String,
    coordinates: Vec<f64>,
}

/// Parses a serialized point geometry into `(lat, lng)`.
///
/// # Errors
///
/// Returns [`GeometryError::Malformed`] when the text is neither a GeoJSON nor
/// a WKT point, and [`GeometryError::OutOfRange`] when the coordinates are not
/// finite or exceed ±90° latitude / ±180° longitude.
pub fn parse_point(text: &str) -> Result<LatLng, GeometryError> {
    let text = text.trim();
    let (lng, lat) = if text.starts_with('{') {
        parse_geojson(text)?
    } else {
        parse_wkt(text)?
    };
    LatLng::try_new(lat, lng)
}

fn parse_geojson(text: &str) -> Result<(f64, f64), GeometryError> {
    let point: GeoJsonPoint = serde_json::from_str(text)
        .map_err(|e| GeometryError::Malformed(format!("invalid GeoJSON: {}", e)))?;

    if !point.kind.eq_ignore_ascii_case("point") {
        return Err(GeometryError::Malformed(format!(
            "expected Point geometry, got {}",
            point.kind
        )));
    }

    match point.coordinates.as_slice() {
        [lng, lat, ..] => Ok((*lng, *lat)),
        _ => Err(GeometryError::Malformed(format!(
            "point needs two coordinates, got {}",
            point.coordinates.len()
        ))),
    }
}

fn parse_wkt(text: &str) -> Result<(f64, f64), GeometryError> {
    let malformed = || GeometryError::Malformed(format!("invalid WKT point: '{}'", text));

    // EWKT carries the SRID before the geometry
    let body = match text.split_once(';') {
        Some((srid, rest)) if srid.trim().to_ascii_uppercase().starts_with("SRID=") => rest,
        _ => text,
    };

    let body = body.trim();
    let keyword = body.get(..5).ok_or_else(malformed)?;
    if !keyword.eq_ignore_ascii_case("POINT") {
        return Err(malformed());
    }

    let inner = body[5..]
        .trim()
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(malformed)?;

    let mut numbers = inner.split_whitespace().map(str::parse::<f64>);
    match (numbers.next(), numbers.next(), numbers.next()) {
        (Some(Ok(lng)), Some(Ok(lat)), None) => Ok((lng, lat)),
        _ => Err(malformed()),
    }
}
