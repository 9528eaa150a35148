use foundation::bounds::{BoundsBuilder, GeoBounds};
use serde_json::{Map, Value};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoPoint {
    pub lon_deg: f64,
    pub lat_deg: f64,
}

impl GeoPoint {
    pub fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self { lon_deg, lat_deg }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(GeoPoint),
    MultiPoint(Vec<GeoPoint>),
    LineString(Vec<GeoPoint>),
    MultiLineString(Vec<Vec<GeoPoint>>),
    Polygon(Vec<Vec<GeoPoint>>),
    MultiPolygon(Vec<Vec<Vec<GeoPoint>>>),
}

impl Geometry {
    /// Point-like geometries are drawn as markers, everything else as paths.
    pub fn is_point(&self) -> bool {
        matches!(self, Geometry::Point(_) | Geometry::MultiPoint(_))
    }

    pub fn for_each_position(&self, mut f: impl FnMut(&GeoPoint)) {
        match self {
            Geometry::Point(p) => f(p),
            Geometry::MultiPoint(ps) | Geometry::LineString(ps) => ps.iter().for_each(f),
            Geometry::MultiLineString(lines) | Geometry::Polygon(lines) => {
                lines.iter().flatten().for_each(f)
            }
            Geometry::MultiPolygon(polys) => polys.iter().flatten().flatten().for_each(f),
        }
    }

    pub fn bounds(&self) -> Option<GeoBounds> {
        let mut b = BoundsBuilder::new();
        self.for_each_position(|p| b.push(p.lon_deg, p.lat_deg));
        b.finish()
    }
}

pub fn geometry_to_geojson_value(geom: &Geometry) -> Value {
    let (ty, coordinates) = match geom {
        Geometry::Point(p) => ("Point", point_coords(p)),
        Geometry::MultiPoint(ps) => ("MultiPoint", points_coords(ps)),
        Geometry::LineString(ps) => ("LineString", points_coords(ps)),
        Geometry::MultiLineString(lines) => ("MultiLineString", rings_coords(lines)),
        Geometry::Polygon(rings) => ("Polygon", rings_coords(rings)),
        Geometry::MultiPolygon(polys) => (
            "MultiPolygon",
            Value::Array(polys.iter().map(|p| rings_coords(p)).collect()),
        ),
    };
    let mut obj = Map::new();
    obj.insert("type".to_string(), Value::String(ty.to_string()));
    obj.insert("coordinates".to_string(), coordinates);
    Value::Object(obj)
}

fn point_coords(p: &GeoPoint) -> Value {
    Value::Array(vec![Value::from(p.lon_deg), Value::from(p.lat_deg)])
}

fn points_coords(ps: &[GeoPoint]) -> Value {
    Value::Array(ps.iter().map(point_coords).collect())
}

fn rings_coords(rings: &[Vec<GeoPoint>]) -> Value {
    Value::Array(rings.iter().map(|r| points_coords(r)).collect())
}

pub(crate) fn parse_geometry(value: &Value) -> Result<Option<Geometry>, String> {
    if value.is_null() {
        return Ok(None);
    }
    let obj = value
        .as_object()
        .ok_or("geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("geometry missing type".to_string())?;

    let coords = obj
        .get("coordinates")
        .ok_or("geometry missing coordinates".to_string())?;

    let geom = match ty {
        "Point" => Geometry::Point(parse_point(coords)?),
        "MultiPoint" => Geometry::MultiPoint(parse_points(coords)?),
        "LineString" => Geometry::LineString(parse_points(coords)?),
        "MultiLineString" => Geometry::MultiLineString(parse_rings(coords)?),
        "Polygon" => Geometry::Polygon(parse_rings(coords)?),
        "MultiPolygon" => Geometry::MultiPolygon(parse_multi_polygon(coords)?),
        other => return Err(format!("unsupported geometry type: {other}")),
    };
    Ok(Some(geom))
}

fn parse_point(coords: &Value) -> Result<GeoPoint, String> {
    let arr = coords
        .as_array()
        .ok_or("position must be an array".to_string())?;
    let (Some(lon), Some(lat)) = (
        arr.first().and_then(Value::as_f64),
        arr.get(1).and_then(Value::as_f64),
    ) else {
        return Err("position must start with numeric [lon, lat]".to_string());
    };
    Ok(GeoPoint::new(lon, lat))
}

fn parse_points(coords: &Value) -> Result<Vec<GeoPoint>, String> {
    let arr = coords
        .as_array()
        .ok_or("coordinates must be an array".to_string())?;
    arr.iter().map(parse_point).collect()
}

fn parse_rings(coords: &Value) -> Result<Vec<Vec<GeoPoint>>, String> {
    let arr = coords
        .as_array()
        .ok_or("coordinates must be an array of position lists".to_string())?;
    arr.iter().map(parse_points).collect()
}

fn parse_multi_polygon(coords: &Value) -> Result<Vec<Vec<Vec<GeoPoint>>>, String> {
    let polys = coords
        .as_array()
        .ok_or("MultiPolygon coordinates must be an array of polygons".to_string())?;
    polys.iter().map(parse_rings).collect()
}
