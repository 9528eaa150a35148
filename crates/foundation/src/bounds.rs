use serde::{Deserialize, Serialize};

/// Geographic bounds in degrees, GeoJSON `bbox` order.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl GeoBounds {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        GeoBounds {
            west,
            south,
            east,
            north,
        }
    }

    /// Degenerate bounds covering a single position.
    pub fn from_point(lon: f64, lat: f64) -> Self {
        GeoBounds::new(lon, lat, lon, lat)
    }

    /// Parses a GeoJSON `[west, south, east, north]` array.
    ///
    /// Three-dimensional boxes (`[w, s, zmin, e, n, zmax]`) are accepted and
    /// their altitude range is dropped.
    pub fn from_bbox_slice(values: &[f64]) -> Option<Self> {
        let b = match values {
            [w, s, e, n] => GeoBounds::new(*w, *s, *e, *n),
            [w, s, _, e, n, _] => GeoBounds::new(*w, *s, *e, *n),
            _ => return None,
        };
        b.is_valid().then_some(b)
    }

    pub fn to_bbox(&self) -> [f64; 4] {
        [self.west, self.south, self.east, self.north]
    }

    pub fn is_valid(&self) -> bool {
        self.west.is_finite()
            && self.south.is_finite()
            && self.east.is_finite()
            && self.north.is_finite()
            && self.south <= self.north
    }

    pub fn extend_point(&mut self, lon: f64, lat: f64) {
        self.west = self.west.min(lon);
        self.south = self.south.min(lat);
        self.east = self.east.max(lon);
        self.north = self.north.max(lat);
    }

    pub fn union(&self, other: &GeoBounds) -> GeoBounds {
        GeoBounds::new(
            self.west.min(other.west),
            self.south.min(other.south),
            self.east.max(other.east),
            self.north.max(other.north),
        )
    }

    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.west && lon <= self.east && lat >= self.south && lat <= self.north
    }
}

/// Accumulates bounds over a stream of positions; empty until the first one.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BoundsBuilder {
    bounds: Option<GeoBounds>,
}

impl BoundsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, lon: f64, lat: f64) {
        if !lon.is_finite() || !lat.is_finite() {
            return;
        }
        match &mut self.bounds {
            Some(b) => b.extend_point(lon, lat),
            None => self.bounds = Some(GeoBounds::from_point(lon, lat)),
        }
    }

    pub fn push_bounds(&mut self, other: GeoBounds) {
        self.bounds = Some(match self.bounds {
            Some(b) => b.union(&other),
            None => other,
        });
    }

    pub fn finish(self) -> Option<GeoBounds> {
        self.bounds
    }
}
