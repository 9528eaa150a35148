//! Offline checks for a deck's datasets.

use std::collections::BTreeMap;

use formats::FeatureCollection;
use foundation::bounds::GeoBounds;
use foundation::ids::SlideId;
use layers::default_style;
use serde::Serialize;
use streaming::{FetchError, FsSource};

/// Summary of one slide's dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetReport {
    pub slide_id: SlideId,
    pub features: usize,
    pub bounds: Option<GeoBounds>,
    /// Whether `bounds` came from the file's `bbox` member.
    pub explicit_bbox: bool,
    /// Feature count per palette colour (hex), as the default style would draw.
    pub palette: BTreeMap<String, usize>,
}

impl DatasetReport {
    pub fn from_collection(slide_id: SlideId, fc: &FeatureCollection) -> Self {
        let mut palette = BTreeMap::new();
        for feature in &fc.features {
            let color = default_style(feature).fill_color;
            *palette.entry(color.to_hex()).or_insert(0) += 1;
        }
        Self {
            slide_id,
            features: fc.len(),
            bounds: fc.bounds(),
            explicit_bbox: fc.bbox.is_some(),
            palette,
        }
    }
}

/// Loads and summarizes each slide's dataset; one result per id, in order.
pub fn check_datasets(
    source: &FsSource,
    slide_ids: &[SlideId],
) -> Vec<Result<DatasetReport, FetchError>> {
    slide_ids
        .iter()
        .map(|id| {
            let fc = source.load(id)?;
            Ok(DatasetReport::from_collection(id.clone(), &fc))
        })
        .collect()
}
