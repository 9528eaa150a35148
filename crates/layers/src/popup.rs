//! Default popup content built from the optional descriptive properties.

use formats::Feature;

use crate::symbology::{MAGNITUDE_KEY, feature_magnitude};

pub const UNKNOWN: &str = "Unknown";
pub const NOT_AVAILABLE: &str = "N/A";

pub fn describe_feature(feature: &Feature) -> String {
    let place = feature
        .property_str("place")
        .unwrap_or_else(|| UNKNOWN.to_string());
    let magnitude = feature_magnitude(feature)
        .map(|m| format!("{m:.1}"))
        .or_else(|| feature.property_str(MAGNITUDE_KEY))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let depth = feature
        .property_str("depth")
        .map(|d| format!("{d} km"))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let date = feature
        .property_str("date")
        .map(|d| display_timestamp(&d))
        .unwrap_or_else(|| UNKNOWN.to_string());
    let region = feature
        .property_str("state")
        .unwrap_or_else(|| UNKNOWN.to_string());

    format!(
        "<strong>{}</strong><br>Magnitude: {}<br>Depth: {}<br>Date: {}<br>Region: {}",
        escape_html(&place),
        escape_html(&magnitude),
        escape_html(&depth),
        escape_html(&date),
        escape_html(&region),
    )
}

/// `2011-03-11T05:46:24.120Z` -> `2011-03-11 05:46:24`.
///
/// Only separators are normalized; no timezone conversion is attempted.
pub fn display_timestamp(iso: &str) -> String {
    let trimmed = iso.trim();
    let Some((date, time)) = trimmed.split_once(['T', 't']) else {
        return trimmed.to_string();
    };
    let time = time.trim_end_matches(['Z', 'z']);
    let time = time.split_once('.').map(|(t, _)| t).unwrap_or(time);
    format!("{date} {time}")
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{describe_feature, display_timestamp, escape_html};
    use formats::{Feature, GeoPoint, Geometry};
    use pretty_assertions::assert_eq;

    fn point() -> Feature {
        Feature::new(Geometry::Point(GeoPoint::new(142.37, 38.3)))
    }

    #[test]
    fn normalizes_iso_timestamps() {
        assert_eq!(
            display_timestamp("2011-03-11T05:46:24.120Z"),
            "2011-03-11 05:46:24"
        );
        assert_eq!(display_timestamp("2004-12-26T00:58:53Z"), "2004-12-26 00:58:53");
        assert_eq!(display_timestamp("1960-05-22"), "1960-05-22");
    }

    #[test]
    fn describes_full_feature() {
        let f = point()
            .with_property("place", "near the east coast of Honshu")
            .with_property("magnitudo", 9.1)
            .with_property("depth", 29)
            .with_property("date", "2011-03-11T05:46:24.120Z")
            .with_property("state", "Japan");
        assert_eq!(
            describe_feature(&f),
            "<strong>near the east coast of Honshu</strong><br>Magnitude: 9.1<br>\
             Depth: 29 km<br>Date: 2011-03-11 05:46:24<br>Region: Japan"
        );
    }

    #[test]
    fn substitutes_placeholders_for_missing_fields() {
        assert_eq!(
            describe_feature(&point()),
            "<strong>Unknown</strong><br>Magnitude: N/A<br>Depth: N/A<br>\
             Date: Unknown<br>Region: Unknown"
        );
    }

    #[test]
    fn escapes_markup_in_properties() {
        assert_eq!(escape_html("<b>\"A&B\"</b>"), "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;");
        let f = point().with_property("place", "<script>");
        assert!(describe_feature(&f).starts_with("<strong>&lt;script&gt;</strong>"));
    }
}
