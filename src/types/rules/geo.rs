//! Rules for geopoint and geojson fields.
use super::numeric::parse_numeral;
use crate::schema::{CastRefusal, CastResult, ConfigurationError, FieldDescriptor, GeoPoint, TypedValue};
use crate::types::format::{require_default, unsupported, FormatSpec};
use serde_json::Value;

/// GeoJSON `type` names accepted by the structural check.
const GEOJSON_TYPES: [&str; 9] = [
    "Point",
    "MultiPoint",
    "LineString",
    "MultiLineString",
    "Polygon",
    "MultiPolygon",
    "GeometryCollection",
    "Feature",
    "FeatureCollection",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GeoPointFormat {
    /// `"<lat>, <lon>"` or `[lat, lon]`.
    Default,
    /// `[lat, lon]` only.
    Array,
    /// `{"lat": .., "lon": ..}` only.
    Object,
}

pub(crate) fn resolve_geopoint(
    descriptor: &FieldDescriptor,
    spec: &FormatSpec,
) -> Result<GeoPointFormat, ConfigurationError> {
    match spec {
        FormatSpec::Default | FormatSpec::Any => Ok(GeoPointFormat::Default),
        FormatSpec::Named(name) if name == "array" => Ok(GeoPointFormat::Array),
        FormatSpec::Named(name) if name == "object" => Ok(GeoPointFormat::Object),
        _ => Err(unsupported(descriptor)),
    }
}

pub(crate) fn resolve_geojson(
    descriptor: &FieldDescriptor,
    spec: &FormatSpec,
) -> Result<(), ConfigurationError> {
    require_default(descriptor, spec)
}

fn point(lat: f64, lon: f64) -> CastResult {
    let in_range = (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon);
    if in_range {
        Ok(TypedValue::GeoPoint(GeoPoint { lat, lon }))
    } else {
        Err(CastRefusal)
    }
}

fn coordinate(part: &str) -> Result<f64, CastRefusal> {
    parse_numeral(part.trim().as_bytes())
}

pub(crate) fn geopoint_from_str(format: GeoPointFormat, text: &str) -> CastResult {
    if format != GeoPointFormat::Default {
        return Err(CastRefusal);
    }
    let (lat, lon) = text.split_once(',').ok_or(CastRefusal)?;
    point(coordinate(lat)?, coordinate(lon)?)
}

pub(crate) fn geopoint_from_native(format: GeoPointFormat, value: &Value) -> CastResult {
    match (format, value) {
        (GeoPointFormat::Default | GeoPointFormat::Array, Value::Array(items)) => {
            match items.as_slice() {
                [lat, lon] => point(
                    lat.as_f64().ok_or(CastRefusal)?,
                    lon.as_f64().ok_or(CastRefusal)?,
                ),
                _ => Err(CastRefusal),
            }
        }
        (GeoPointFormat::Object, Value::Object(map)) if map.len() == 2 => {
            let lat = map.get("lat").and_then(Value::as_f64).ok_or(CastRefusal)?;
            let lon = map.get("lon").and_then(Value::as_f64).ok_or(CastRefusal)?;
            point(lat, lon)
        }
        _ => Err(CastRefusal),
    }
}

/// A mapping whose `type` names a known GeoJSON object.
pub(crate) fn geojson_from_native(value: &Value) -> CastResult {
    let Value::Object(map) = value else {
        return Err(CastRefusal);
    };
    let known = map
        .get("type")
        .and_then(Value::as_str)
        .is_some_and(|t| GEOJSON_TYPES.contains(&t));
    if known {
        Ok(TypedValue::GeoJson(map.clone()))
    } else {
        Err(CastRefusal)
    }
}
