use foundation::geo::LonLat;
use serde_json::{Map, Value};

/// Geometry kinds the two map endpoints deliver.
///
/// Feedback entries are points; district boundaries are polygons or
/// multipolygons. Line geometries are not part of either schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(LonLat),
    MultiPoint(Vec<LonLat>),
    Polygon(Vec<Vec<LonLat>>),
    MultiPolygon(Vec<Vec<Vec<LonLat>>>),
}

/// A parsed GeoJSON feature.
///
/// `geometry` is `None` when the source feature carried no geometry or a
/// malformed one: downstream geometric logic treats such features as
/// non-matching rather than failing the whole collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: Option<String>,
    pub properties: Map<String, Value>,
    pub geometry: Option<Geometry>,
}

#[derive(Debug)]
pub enum GeoJsonError {
    NotAFeatureCollection,
    InvalidFeature { index: usize, reason: String },
}

impl std::fmt::Display for GeoJsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoJsonError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            GeoJsonError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for GeoJsonError {}

pub fn parse_feature_collection(payload: &str) -> Result<Vec<Feature>, GeoJsonError> {
    let value: Value =
        serde_json::from_str(payload).map_err(|_| GeoJsonError::NotAFeatureCollection)?;
    parse_feature_collection_value(&value)
}

pub fn parse_feature_collection_value(value: &Value) -> Result<Vec<Feature>, GeoJsonError> {
    let obj = value
        .as_object()
        .ok_or(GeoJsonError::NotAFeatureCollection)?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or(GeoJsonError::NotAFeatureCollection)?;
    if ty != "FeatureCollection" {
        return Err(GeoJsonError::NotAFeatureCollection);
    }

    let features_val = obj
        .get("features")
        .and_then(|v| v.as_array())
        .ok_or(GeoJsonError::NotAFeatureCollection)?;

    let mut features = Vec::with_capacity(features_val.len());
    for (index, feat_val) in features_val.iter().enumerate() {
        let feat_obj = feat_val.as_object().ok_or(GeoJsonError::InvalidFeature {
            index,
            reason: "feature must be an object".to_string(),
        })?;

        let feat_type = feat_obj.get("type").and_then(|v| v.as_str()).ok_or(
            GeoJsonError::InvalidFeature {
                index,
                reason: "feature missing type".to_string(),
            },
        )?;
        if feat_type != "Feature" {
            return Err(GeoJsonError::InvalidFeature {
                index,
                reason: format!("unexpected feature type: {feat_type}"),
            });
        }

        let id = match feat_obj.get("id") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };

        let properties = feat_obj
            .get("properties")
            .and_then(|v| v.as_object())
            .cloned()
            .unwrap_or_default();

        // A missing or malformed geometry degrades the feature to
        // geometry-less instead of failing the collection.
        let geometry = feat_obj.get("geometry").and_then(parse_geometry);

        features.push(Feature {
            id,
            properties,
            geometry,
        });
    }

    Ok(features)
}

fn parse_geometry(value: &Value) -> Option<Geometry> {
    let obj = value.as_object()?;
    let ty = obj.get("type").and_then(|v| v.as_str())?;
    let coords = obj.get("coordinates")?;

    match ty {
        "Point" => Some(Geometry::Point(parse_point(coords)?)),
        "MultiPoint" => Some(Geometry::MultiPoint(parse_points(coords)?)),
        "Polygon" => Some(Geometry::Polygon(parse_rings(coords)?)),
        "MultiPolygon" => Some(Geometry::MultiPolygon(parse_polygons(coords)?)),
        _ => None,
    }
}

fn parse_point(coords: &Value) -> Option<LonLat> {
    let arr = coords.as_array()?;
    let lon = arr.first()?.as_f64()?;
    let lat = arr.get(1)?.as_f64()?;
    Some(LonLat::new(lon, lat))
}

fn parse_points(coords: &Value) -> Option<Vec<LonLat>> {
    coords.as_array()?.iter().map(parse_point).collect()
}

fn parse_rings(coords: &Value) -> Option<Vec<Vec<LonLat>>> {
    coords.as_array()?.iter().map(parse_points).collect()
}

fn parse_polygons(coords: &Value) -> Option<Vec<Vec<Vec<LonLat>>>> {
    coords.as_array()?.iter().map(parse_rings).collect()
}

#[cfg(test)]
mod tests {
    use super::{Geometry, GeoJsonError, parse_feature_collection};
    use foundation::geo::LonLat;
    use pretty_assertions::assert_eq;

    const FEEDBACK_SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "id": 7,
                "properties": {"comment": "broken bench", "category": "furniture"},
                "geometry": {"type": "Point", "coordinates": [16.37, 48.2]}
            },
            {
                "type": "Feature",
                "properties": {"comment": "no location given"},
                "geometry": null
            }
        ]
    }"#;

    #[test]
    fn parses_points_and_properties() {
        let features = parse_feature_collection(FEEDBACK_SAMPLE).expect("parse");
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].id.as_deref(), Some("7"));
        assert_eq!(
            features[0].geometry,
            Some(Geometry::Point(LonLat::new(16.37, 48.2)))
        );
        assert_eq!(
            features[0].properties.get("comment").and_then(|v| v.as_str()),
            Some("broken bench")
        );
    }

    #[test]
    fn missing_geometry_degrades_to_none() {
        let features = parse_feature_collection(FEEDBACK_SAMPLE).expect("parse");
        assert_eq!(features[1].geometry, None);
    }

    #[test]
    fn malformed_geometry_degrades_to_none() {
        let payload = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {"type": "Point", "coordinates": ["x", "y"]}
                }
            ]
        }"#;
        let features = parse_feature_collection(payload).expect("parse");
        assert_eq!(features[0].geometry, None);
    }

    #[test]
    fn parses_polygon_rings() {
        let payload = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"NAMEK": "Innere Stadt"},
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]]
                    }
                }
            ]
        }"#;
        let features = parse_feature_collection(payload).expect("parse");
        let Some(Geometry::Polygon(rings)) = &features[0].geometry else {
            panic!("expected polygon");
        };
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 5);
    }

    #[test]
    fn rejects_non_collections() {
        let err = parse_feature_collection(r#"{"type": "Feature"}"#).unwrap_err();
        assert!(matches!(err, GeoJsonError::NotAFeatureCollection));
    }
}
