use std::collections::BTreeMap;
use std::rc::Rc;

use formats::{Feature, FeatureCollection, GeoPoint, Geometry};
use foundation::ids::SlideId;
use layers::testing::RecordingWidget;
use streaming::StaticSource;

use crate::config::DeckConfig;
use crate::deck::SlideDeck;
use crate::slide::{Slide, SlideSurface};

/// Remembers the last visibility reported for each slide.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub hidden: BTreeMap<usize, bool>,
    pub calls: usize,
}

impl RecordingSurface {
    pub fn visible(&self) -> Vec<usize> {
        self.hidden
            .iter()
            .filter(|(_, hidden)| !**hidden)
            .map(|(i, _)| *i)
            .collect()
    }
}

impl SlideSurface for RecordingSurface {
    fn set_hidden(&mut self, index: usize, _slide_id: &SlideId, hidden: bool) {
        self.hidden.insert(index, hidden);
        self.calls += 1;
    }
}

pub type TestDeck = SlideDeck<StaticSource, RecordingWidget, RecordingSurface>;

/// `n` labelled points along the equator, starting at `lon0`.
pub fn labelled_points(lon0: f64, n: usize) -> FeatureCollection {
    FeatureCollection::new(
        (0..n)
            .map(|i| {
                Feature::new(Geometry::Point(GeoPoint::new(lon0 + i as f64, 0.0)))
                    .with_property("label", format!("pt-{i}"))
                    .with_property("magnitudo", 7.5)
            })
            .collect(),
    )
}

pub fn deck_with(source: StaticSource, slides: Vec<Slide>, config: DeckConfig) -> TestDeck {
    SlideDeck::new(
        config,
        slides,
        Rc::new(source),
        RecordingWidget::new(),
        RecordingSurface::default(),
    )
    .expect("deck")
}

/// `[title-slide, second-slide, third-slide]` with 1, 2 and 3 features.
pub fn three_slide_deck() -> TestDeck {
    let source = StaticSource::new()
        .with_dataset("title-slide", labelled_points(0.0, 1))
        .with_dataset("second-slide", labelled_points(10.0, 2))
        .with_dataset("third-slide", labelled_points(20.0, 3));
    let slides = ["title-slide", "second-slide", "third-slide"]
        .into_iter()
        .map(Slide::new)
        .collect();
    deck_with(source, slides, DeckConfig::default())
}
