use std::collections::HashSet;

use geojson::{Feature, GeoJson, Value};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::ChecklistError;
use crate::types::Point;

type Result<T> = std::result::Result<T, ChecklistError>;

/// Load named points from a GeoJSON Feature or FeatureCollection.
///
/// Each usable feature has a Point geometry and a string `name` property.
/// Other features are skipped.
pub fn parse_geojson_points(json: &str) -> Result<Vec<Point>> {
    let features = match json.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(fc) => fc.features,
        GeoJson::Feature(f) => vec![f],
        GeoJson::Geometry(_) => return Err(ChecklistError::UnsupportedGeoJson("Geometry")),
    };

    let points = features
        .iter()
        .enumerate()
        .filter_map(|(index, feature)| {
            let point = feature_to_point(feature);
            if point.is_none() {
                log::warn!("skipping feature #{index}: not a named Point");
            }
            point
        })
        .collect();

    validate(points)
}

fn feature_to_point(feature: &Feature) -> Option<Point> {
    let name = feature.property("name")?.as_str()?;
    if name.is_empty() {
        return None;
    }
    match &feature.geometry.as_ref()?.value {
        // GeoJSON positions are [lon, lat, ...]
        Value::Point(coords) if coords.len() >= 2 => Some(Point::new(name, coords[1], coords[0])),
        _ => None,
    }
}

/// Load named waypoints (`<wpt>`) from a GPX document.
///
/// Waypoints without a name or without valid lat/lon are skipped.
pub fn parse_gpx_waypoints(xml: &str) -> Result<Vec<Point>> {
    let mut reader = Reader::from_str(xml);
    let mut points = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"wpt" => {
                if let Some(pt) = parse_waypoint(&e, &mut reader)? {
                    points.push(pt);
                }
            }
            Ok(Event::Empty(e)) if e.local_name().as_ref() == b"wpt" => {
                log::warn!("skipping unnamed waypoint");
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ChecklistError::XmlParse(e)),
            _ => {}
        }
    }

    validate(points)
}

/// Parse lat/lon attributes from a `<wpt>` start tag.
fn parse_lat_lon(e: &BytesStart<'_>) -> Option<(f64, f64)> {
    let mut lat: Option<f64> = None;
    let mut lon: Option<f64> = None;

    for attr in e.attributes().flatten() {
        let val = std::str::from_utf8(&attr.value).unwrap_or_default();
        match attr.key.local_name().as_ref() {
            b"lat" => lat = val.trim().parse().ok(),
            b"lon" => lon = val.trim().parse().ok(),
            _ => {}
        }
    }

    Some((lat?, lon?))
}

/// Called after receiving Event::Start for the waypoint.
fn parse_waypoint<'a>(
    start: &BytesStart<'a>,
    reader: &mut Reader<&'a [u8]>,
) -> Result<Option<Point>> {
    let coords = parse_lat_lon(start);
    let mut name: Option<String> = None;
    let end_name = start.name().0.to_vec();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if e.local_name().as_ref() == b"name" {
                    name = Some(read_text_owned(reader, &e)?.trim().to_string());
                } else {
                    reader
                        .read_to_end(e.name())
                        .map_err(ChecklistError::XmlParse)?;
                }
            }
            Ok(Event::End(e)) if e.name().0 == end_name.as_slice() => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(ChecklistError::XmlParse(e)),
            _ => {}
        }
    }

    match (name, coords) {
        (Some(name), Some((lat, lon))) if !name.is_empty() => Ok(Some(Point::new(name, lat, lon))),
        (name, _) => {
            log::warn!(
                "skipping waypoint {}: missing name or coordinates",
                name.as_deref().unwrap_or("<unnamed>")
            );
            Ok(None)
        }
    }
}

/// Read text content of an element, resolving CDATA and entity references.
fn read_text_owned<'a>(reader: &mut Reader<&'a [u8]>, start: &BytesStart<'_>) -> Result<String> {
    let end_name = start.name().0.to_vec();
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Text(e)) => {
                text.push_str(std::str::from_utf8(e.as_ref()).unwrap_or_default());
            }
            Ok(Event::CData(e)) => {
                text.push_str(std::str::from_utf8(e.as_ref()).unwrap_or_default());
            }
            Ok(Event::GeneralRef(e)) => {
                if let Ok(Some(ch)) = e.resolve_char_ref() {
                    text.push(ch);
                } else {
                    match std::str::from_utf8(e.as_ref()).unwrap_or_default() {
                        "amp" => text.push('&'),
                        "lt" => text.push('<'),
                        "gt" => text.push('>'),
                        "quot" => text.push('"'),
                        "apos" => text.push('\''),
                        _ => {}
                    }
                }
            }
            Ok(Event::End(e)) if e.name().0 == end_name.as_slice() => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(ChecklistError::XmlParse(e)),
            _ => {}
        }
    }

    Ok(text)
}

/// Names must be unique and coordinates finite within one dataset.
pub(crate) fn validate_points(points: &[Point]) -> Result<()> {
    let mut seen = HashSet::new();
    for pt in points {
        if !pt.lat.is_finite() || !pt.lon.is_finite() {
            return Err(ChecklistError::NonFiniteCoordinate {
                name: pt.name.clone(),
            });
        }
        if !seen.insert(pt.name.as_str()) {
            return Err(ChecklistError::DuplicatePoint {
                name: pt.name.clone(),
            });
        }
    }
    Ok(())
}

fn validate(points: Vec<Point>) -> Result<Vec<Point>> {
    validate_points(&points)?;
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geojson_feature_collection() {
        let json = r#"{
  "type": "FeatureCollection",
  "features": [
    {"type": "Feature", "geometry": {"type": "Point", "coordinates": [139.8566, 35.7456]}, "properties": {"name": "Aoto"}},
    {"type": "Feature", "geometry": {"type": "Point", "coordinates": [139.4461, 35.6989]}, "properties": {"name": "Kunitachi"}}
  ]
}"#;
        let points = parse_geojson_points(json).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].name, "Aoto");
        assert!((points[0].lat - 35.7456).abs() < 1e-10);
        assert!((points[0].lon - 139.8566).abs() < 1e-10);
    }

    #[test]
    fn test_geojson_single_feature() {
        let json = r#"{"type": "Feature", "geometry": {"type": "Point", "coordinates": [139.0, 35.0]}, "properties": {"name": "Solo"}}"#;
        let points = parse_geojson_points(json).unwrap();
        assert_eq!(points, vec![Point::new("Solo", 35.0, 139.0)]);
    }

    #[test]
    fn test_geojson_skips_unusable_features() {
        let json = r#"{
  "type": "FeatureCollection",
  "features": [
    {"type": "Feature", "geometry": {"type": "Point", "coordinates": [139.0, 35.0]}, "properties": {}},
    {"type": "Feature", "geometry": {"type": "Point", "coordinates": [139.5, 35.5]}, "properties": {"name": ""}},
    {"type": "Feature", "geometry": {"type": "LineString", "coordinates": [[139.0, 35.0], [140.0, 36.0]]}, "properties": {"name": "Line"}},
    {"type": "Feature", "geometry": null, "properties": {"name": "Nothing"}},
    {"type": "Feature", "geometry": {"type": "Point", "coordinates": [140.0, 36.0]}, "properties": {"name": "Kept"}}
  ]
}"#;
        let points = parse_geojson_points(json).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].name, "Kept");
    }

    #[test]
    fn test_geojson_geometry_rejected() {
        let json = r#"{"type": "Point", "coordinates": [139.0, 35.0]}"#;
        assert!(matches!(
            parse_geojson_points(json),
            Err(ChecklistError::UnsupportedGeoJson("Geometry"))
        ));
    }

    #[test]
    fn test_geojson_invalid_json() {
        assert!(matches!(
            parse_geojson_points("not json"),
            Err(ChecklistError::GeoJson(_))
        ));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let json = r#"{
  "type": "FeatureCollection",
  "features": [
    {"type": "Feature", "geometry": {"type": "Point", "coordinates": [139.0, 35.0]}, "properties": {"name": "Twice"}},
    {"type": "Feature", "geometry": {"type": "Point", "coordinates": [140.0, 36.0]}, "properties": {"name": "Twice"}}
  ]
}"#;
        match parse_geojson_points(json) {
            Err(ChecklistError::DuplicatePoint { name }) => assert_eq!(name, "Twice"),
            other => panic!("Expected DuplicatePoint, got {other:?}"),
        }
    }

    #[test]
    fn test_gpx_waypoints() {
        let xml = r#"<?xml version="1.0"?>
<gpx xmlns="http://www.topografix.com/GPX/1/1" version="1.1">
  <wpt lat="35.7456" lon="139.8566">
    <ele>3.0</ele>
    <name>Aoto</name>
  </wpt>
  <wpt lat="35.6989" lon="139.4461"><name>Kunitachi</name></wpt>
</gpx>"#;
        let points = parse_gpx_waypoints(xml).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1], Point::new("Kunitachi", 35.6989, 139.4461));
    }

    #[test]
    fn test_gpx_skips_unnamed_or_missing_coords() {
        let xml = r#"<?xml version="1.0"?>
<gpx version="1.1">
  <wpt lat="35.0" lon="139.0"/>
  <wpt lat="35.0" lon="139.0"><desc>no name</desc></wpt>
  <wpt><name>No coords</name></wpt>
  <wpt lat="36.0" lon="140.0"><name>Good</name></wpt>
</gpx>"#;
        let points = parse_gpx_waypoints(xml).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].name, "Good");
    }

    #[test]
    fn test_gpx_ignores_tracks() {
        let xml = r#"<?xml version="1.0"?>
<gpx version="1.1">
  <trk><name>Run</name><trkseg><trkpt lat="35.0" lon="139.0"/></trkseg></trk>
  <wpt lat="36.0" lon="140.0"><name>Stop</name></wpt>
</gpx>"#;
        let points = parse_gpx_waypoints(xml).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].name, "Stop");
    }

    #[test]
    fn test_gpx_cdata_name() {
        let xml = r#"<?xml version="1.0"?>
<gpx version="1.1">
  <wpt lat="35.0" lon="139.0"><name><![CDATA[Cafe & Gym]]></name></wpt>
</gpx>"#;
        let points = parse_gpx_waypoints(xml).unwrap();
        assert_eq!(points[0].name, "Cafe & Gym");
    }

    #[test]
    fn test_gpx_non_finite_rejected() {
        let xml = r#"<?xml version="1.0"?>
<gpx version="1.1">
  <wpt lat="NaN" lon="139.0"><name>Broken</name></wpt>
</gpx>"#;
        assert!(matches!(
            parse_gpx_waypoints(xml),
            Err(ChecklistError::NonFiniteCoordinate { .. })
        ));
    }
}
