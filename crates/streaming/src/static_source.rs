use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use formats::FeatureCollection;
use foundation::ids::SlideId;
use futures::future::LocalBoxFuture;

use crate::source::{FeatureCollectionSource, FetchError};

/// In-memory source for demos and tests.
///
/// Counts every resolution so callers can observe redundant fetches.
#[derive(Debug, Default)]
pub struct StaticSource {
    datasets: BTreeMap<SlideId, Rc<FeatureCollection>>,
    fetches: Cell<usize>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dataset(mut self, slide_id: impl Into<SlideId>, fc: FeatureCollection) -> Self {
        self.insert(slide_id, fc);
        self
    }

    pub fn insert(&mut self, slide_id: impl Into<SlideId>, fc: FeatureCollection) {
        self.datasets.insert(slide_id.into(), Rc::new(fc));
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }
}

impl FeatureCollectionSource for StaticSource {
    fn resolve<'a>(
        &'a self,
        slide_id: &'a SlideId,
    ) -> LocalBoxFuture<'a, Result<Rc<FeatureCollection>, FetchError>> {
        self.fetches.set(self.fetches.get() + 1);
        let res = self
            .datasets
            .get(slide_id)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                slide_id: slide_id.clone(),
            });
        Box::pin(async move { res })
    }
}
