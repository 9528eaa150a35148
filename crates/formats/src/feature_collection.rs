use foundation::bounds::{BoundsBuilder, GeoBounds};
use serde_json::{Map, Value};

use crate::geometry::{Geometry, geometry_to_geojson_value, parse_geometry};

#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: Option<String>,
    pub properties: Map<String, Value>,
    /// `None` for GeoJSON features with a `null` geometry.
    pub geometry: Option<Geometry>,
}

impl Feature {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            id: None,
            properties: Map::new(),
            geometry: Some(geometry),
        }
    }

    pub fn with_property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    /// Single GeoJSON `Feature` object, as handed to the map widget.
    pub fn to_geojson_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("type".to_string(), Value::String("Feature".to_string()));
        if let Some(id) = &self.id {
            obj.insert("id".to_string(), Value::String(id.clone()));
        }
        obj.insert(
            "properties".to_string(),
            Value::Object(self.properties.clone()),
        );
        obj.insert(
            "geometry".to_string(),
            self.geometry
                .as_ref()
                .map(geometry_to_geojson_value)
                .unwrap_or(Value::Null),
        );
        Value::Object(obj)
    }

    /// String view of a property. Numbers are rendered with their JSON form.
    pub fn property_str(&self, key: &str) -> Option<String> {
        match self.properties.get(key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Numeric view of a property; numeric strings are accepted.
    pub fn property_f64(&self, key: &str) -> Option<f64> {
        let v = match self.properties.get(key)? {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        v.is_finite().then_some(v)
    }
}

/// A decoded GeoJSON `FeatureCollection` with its optional top-level `bbox`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
    pub bbox: Option<GeoBounds>,
}

#[derive(Debug)]
pub enum FeatureCollectionError {
    Json(serde_json::Error),
    NotAFeatureCollection,
    InvalidBbox,
    InvalidFeature { index: usize, reason: String },
}

impl std::fmt::Display for FeatureCollectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureCollectionError::Json(e) => write!(f, "JSON parse error: {e}"),
            FeatureCollectionError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            FeatureCollectionError::InvalidBbox => {
                write!(f, "bbox must be [west, south, east, north]")
            }
            FeatureCollectionError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for FeatureCollectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeatureCollectionError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            features,
            bbox: None,
        }
    }

    pub fn with_bbox(mut self, bbox: GeoBounds) -> Self {
        self.bbox = Some(bbox);
        self
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn from_geojson_str(payload: &str) -> Result<Self, FeatureCollectionError> {
        let value: Value = serde_json::from_str(payload).map_err(FeatureCollectionError::Json)?;
        Self::from_geojson_value(value)
    }

    pub fn from_geojson_slice(payload: &[u8]) -> Result<Self, FeatureCollectionError> {
        let value: Value =
            serde_json::from_slice(payload).map_err(FeatureCollectionError::Json)?;
        Self::from_geojson_value(value)
    }

    pub fn from_geojson_value(value: Value) -> Result<Self, FeatureCollectionError> {
        let obj = value
            .as_object()
            .ok_or(FeatureCollectionError::NotAFeatureCollection)?;
        let ty = obj
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or(FeatureCollectionError::NotAFeatureCollection)?;
        if ty != "FeatureCollection" {
            return Err(FeatureCollectionError::NotAFeatureCollection);
        }

        let bbox = match obj.get("bbox") {
            None | Some(Value::Null) => None,
            Some(Value::Array(items)) => {
                let nums: Option<Vec<f64>> = items.iter().map(Value::as_f64).collect();
                let nums = nums.ok_or(FeatureCollectionError::InvalidBbox)?;
                Some(
                    GeoBounds::from_bbox_slice(&nums)
                        .ok_or(FeatureCollectionError::InvalidBbox)?,
                )
            }
            Some(_) => return Err(FeatureCollectionError::InvalidBbox),
        };

        let features_val = obj
            .get("features")
            .and_then(|v| v.as_array())
            .ok_or(FeatureCollectionError::NotAFeatureCollection)?;

        let mut features = Vec::with_capacity(features_val.len());
        for (index, feat_val) in features_val.iter().enumerate() {
            features.push(parse_feature(index, feat_val)?);
        }

        Ok(Self { features, bbox })
    }

    /// Bounds computed from feature geometry, ignoring the explicit `bbox`.
    pub fn geometry_bounds(&self) -> Option<GeoBounds> {
        let mut b = BoundsBuilder::new();
        for geom in self.features.iter().filter_map(|f| f.geometry.as_ref()) {
            if let Some(gb) = geom.bounds() {
                b.push_bounds(gb);
            }
        }
        b.finish()
    }

    /// Explicit `bbox` if present, otherwise the geometry bounds.
    pub fn bounds(&self) -> Option<GeoBounds> {
        self.bbox.or_else(|| self.geometry_bounds())
    }
}

fn parse_feature(index: usize, value: &Value) -> Result<Feature, FeatureCollectionError> {
    let invalid = |reason: String| FeatureCollectionError::InvalidFeature { index, reason };

    let feat_obj = value
        .as_object()
        .ok_or_else(|| invalid("feature must be an object".to_string()))?;

    let feat_type = feat_obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or_else(|| invalid("feature missing type".to_string()))?;
    if feat_type != "Feature" {
        return Err(invalid(format!("unexpected feature type: {feat_type}")));
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

    let geometry = match feat_obj.get("geometry") {
        Some(v) => parse_geometry(v).map_err(invalid)?,
        None => return Err(invalid("feature missing geometry".to_string())),
    };

    Ok(Feature {
        id,
        properties,
        geometry,
    })
}

#[cfg(test)]
mod tests {
    use super::{FeatureCollection, FeatureCollectionError};
    use crate::geometry::Geometry;
    use foundation::bounds::GeoBounds;
    use pretty_assertions::assert_eq;

    const QUAKES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "id": 1,
                "properties": {
                    "label": "Tohoku",
                    "place": "near the east coast of Honshu, Japan",
                    "magnitudo": 9.1,
                    "depth": 29,
                    "date": "2011-03-11T05:46:24.120Z",
                    "state": "Japan"
                },
                "geometry": {"type": "Point", "coordinates": [142.373, 38.297]}
            },
            {
                "type": "Feature",
                "properties": {"label": "Maule", "magnitudo": "8.8"},
                "geometry": {"type": "Point", "coordinates": [-72.733, -35.846]}
            }
        ]
    }"#;

    #[test]
    fn parses_points_and_properties() {
        let fc = FeatureCollection::from_geojson_str(QUAKES).expect("parse");
        assert_eq!(fc.len(), 2);
        assert_eq!(fc.bbox, None);
        assert_eq!(fc.features[0].id.as_deref(), Some("1"));
        assert!(matches!(fc.features[0].geometry, Some(Geometry::Point(_))));
        assert_eq!(fc.features[0].property_f64("magnitudo"), Some(9.1));
        assert_eq!(fc.features[1].property_f64("magnitudo"), Some(8.8));
        assert_eq!(fc.features[1].property_str("place"), None);
    }

    #[test]
    fn computes_bounds_from_geometry_without_bbox() {
        let fc = FeatureCollection::from_geojson_str(QUAKES).unwrap();
        assert_eq!(
            fc.bounds(),
            Some(GeoBounds::new(-72.733, -35.846, 142.373, 38.297))
        );
    }

    #[test]
    fn explicit_bbox_wins_over_geometry() {
        let payload = r#"{
            "type": "FeatureCollection",
            "bbox": [-10, -10, 10, 10],
            "features": [
                {"type": "Feature", "properties": {},
                 "geometry": {"type": "Point", "coordinates": [50.0, 50.0]}}
            ]
        }"#;
        let fc = FeatureCollection::from_geojson_str(payload).unwrap();
        assert_eq!(fc.bounds(), Some(GeoBounds::new(-10.0, -10.0, 10.0, 10.0)));
        assert_eq!(
            fc.geometry_bounds(),
            Some(GeoBounds::new(50.0, 50.0, 50.0, 50.0))
        );
    }

    #[test]
    fn feature_serializes_back_to_geojson() {
        let fc = FeatureCollection::from_geojson_str(QUAKES).unwrap();
        let value = fc.features[1].to_geojson_value();
        assert_eq!(value["type"], "Feature");
        assert_eq!(value["properties"]["label"], "Maule");
        assert_eq!(value["geometry"]["type"], "Point");
        assert_eq!(value["geometry"]["coordinates"][0], -72.733);
        assert!(value.get("id").is_none());
    }

    #[test]
    fn rejects_malformed_documents() {
        assert!(matches!(
            FeatureCollection::from_geojson_str("{\"type\": \"Feature\"}"),
            Err(FeatureCollectionError::NotAFeatureCollection)
        ));
        assert!(matches!(
            FeatureCollection::from_geojson_str("not json"),
            Err(FeatureCollectionError::Json(_))
        ));
        assert!(matches!(
            FeatureCollection::from_geojson_str(
                r#"{"type": "FeatureCollection", "bbox": [1, 2], "features": []}"#
            ),
            Err(FeatureCollectionError::InvalidBbox)
        ));
        let err = FeatureCollection::from_geojson_str(
            r#"{"type": "FeatureCollection", "features": [{"type": "Feature", "properties": {}}]}"#,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid feature at index 0: feature missing geometry"
        );
    }
}
