use formats::Feature;

/// Property holding an event's magnitude in the bundled datasets.
pub const MAGNITUDE_KEY: &str = "magnitudo";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Earthquake-severity palette, most severe first.
pub const MAGNITUDE_SEVERE: Rgb = Rgb(0xd7, 0x30, 0x27);
pub const MAGNITUDE_MAJOR: Rgb = Rgb(0xfc, 0x8d, 0x59);
pub const MAGNITUDE_STRONG: Rgb = Rgb(0xfe, 0xe0, 0x8b);
pub const MAGNITUDE_NEUTRAL: Rgb = Rgb(0x99, 0x99, 0x99);

/// Lower bounds of each palette bucket; checked top-down, first match wins.
pub const MAGNITUDE_THRESHOLDS: [(f64, Rgb); 3] = [
    (9.0, MAGNITUDE_SEVERE),
    (8.0, MAGNITUDE_MAJOR),
    (7.0, MAGNITUDE_STRONG),
];

pub const DEFAULT_PATH_COLOR: Rgb = Rgb(0x33, 0x88, 0xff);

pub fn magnitude_color(magnitude: Option<f64>) -> Rgb {
    let Some(m) = magnitude else {
        return MAGNITUDE_NEUTRAL;
    };
    MAGNITUDE_THRESHOLDS
        .iter()
        .find(|(min, _)| m >= *min)
        .map(|(_, c)| *c)
        .unwrap_or(MAGNITUDE_NEUTRAL)
}

pub fn feature_magnitude(feature: &Feature) -> Option<f64> {
    feature.property_f64(MAGNITUDE_KEY)
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FeatureStyle {
    pub color: Rgb,
    pub fill_color: Rgb,
    pub weight: f32,
    pub opacity: f32,
    pub fill_opacity: f32,
    /// Circle marker radius in pixels; only used for point geometry.
    pub radius: f32,
}

impl FeatureStyle {
    pub const fn new(color: Rgb, fill_color: Rgb, weight: f32, fill_opacity: f32) -> Self {
        Self {
            color,
            fill_color,
            weight,
            opacity: 1.0,
            fill_opacity,
            radius: 6.0,
        }
    }

    /// Filled circle marker, as used for the default point styling.
    pub const fn marker(fill_color: Rgb) -> Self {
        Self {
            color: Rgb(0, 0, 0),
            fill_color,
            weight: 1.0,
            opacity: 1.0,
            fill_opacity: 0.8,
            radius: 6.0,
        }
    }
}

impl Default for FeatureStyle {
    fn default() -> Self {
        Self::new(DEFAULT_PATH_COLOR, DEFAULT_PATH_COLOR, 2.0, 0.2)
    }
}

/// Default styling: points by magnitude, everything else a plain path.
pub fn default_style(feature: &Feature) -> FeatureStyle {
    match &feature.geometry {
        Some(g) if g.is_point() => FeatureStyle::marker(magnitude_color(feature_magnitude(feature))),
        _ => FeatureStyle::default(),
    }
}
