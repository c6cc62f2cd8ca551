use foundation::geo::LonLat;
use serde_json::{Map, Value};

use crate::geojson::{Feature, Geometry};

/// An administrative district boundary with its derived feedback count.
///
/// `polygons` is multipolygon-shaped: polygons, each a list of rings, each
/// ring a list of coordinates with the outer ring first.
#[derive(Debug, Clone, PartialEq)]
pub struct DistrictRecord {
    pub id: String,
    pub properties: Map<String, Value>,
    pub polygons: Vec<Vec<Vec<LonLat>>>,
    pub feedback_count: u32,
}

impl DistrictRecord {
    /// Builds a district from a parsed feature; `index` names features the
    /// source left anonymous. Features without an area geometry are not
    /// districts and yield `None`.
    pub fn from_feature(feature: &Feature, index: usize) -> Option<Self> {
        let polygons = match &feature.geometry {
            Some(Geometry::Polygon(rings)) => vec![rings.clone()],
            Some(Geometry::MultiPolygon(polys)) => polys.clone(),
            _ => return None,
        };

        Some(Self {
            id: feature
                .id
                .clone()
                .unwrap_or_else(|| format!("district-{index}")),
            properties: feature.properties.clone(),
            polygons,
            feedback_count: 0,
        })
    }
}

/// A user-submitted feedback entry.
///
/// The property map comes from the remote source verbatim and is read-only
/// here. `point` is `None` when the source feature carried no usable
/// geometry; such records are skipped by all geometric logic.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackRecord {
    pub id: String,
    pub point: Option<LonLat>,
    pub properties: Map<String, Value>,
}

impl FeedbackRecord {
    pub fn from_feature(feature: &Feature, index: usize) -> Self {
        let point = match &feature.geometry {
            Some(Geometry::Point(p)) => Some(*p),
            Some(Geometry::MultiPoint(ps)) => ps.first().copied(),
            _ => None,
        };

        Self {
            id: feature
                .id
                .clone()
                .unwrap_or_else(|| format!("feedback-{index}")),
            point,
            properties: feature.properties.clone(),
        }
    }
}

pub fn districts_from_features(features: &[Feature]) -> Vec<DistrictRecord> {
    features
        .iter()
        .enumerate()
        .filter_map(|(i, f)| DistrictRecord::from_feature(f, i))
        .collect()
}

pub fn feedbacks_from_features(features: &[Feature]) -> Vec<FeedbackRecord> {
    features
        .iter()
        .enumerate()
        .map(|(i, f)| FeedbackRecord::from_feature(f, i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{districts_from_features, feedbacks_from_features};
    use crate::geojson::parse_feature_collection;
    use pretty_assertions::assert_eq;

    #[test]
    fn point_features_are_not_districts() {
        let features = parse_feature_collection(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {
                        "type": "Feature",
                        "properties": {},
                        "geometry": {"type": "Point", "coordinates": [1.0, 2.0]}
                    },
                    {
                        "type": "Feature",
                        "properties": {"BEZNR": 1},
                        "geometry": {
                            "type": "Polygon",
                            "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
                        }
                    }
                ]
            }"#,
        )
        .expect("parse");

        let districts = districts_from_features(&features);
        assert_eq!(districts.len(), 1);
        assert_eq!(districts[0].id, "district-1");
        assert_eq!(districts[0].feedback_count, 0);
    }

    #[test]
    fn feedback_without_geometry_keeps_its_attributes() {
        let features = parse_feature_collection(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {"type": "Feature", "properties": {"comment": "dark alley"}, "geometry": null}
                ]
            }"#,
        )
        .expect("parse");

        let feedbacks = feedbacks_from_features(&features);
        assert_eq!(feedbacks.len(), 1);
        assert_eq!(feedbacks[0].point, None);
        assert_eq!(
            feedbacks[0].properties.get("comment").and_then(|v| v.as_str()),
            Some("dark alley")
        );
    }
}
