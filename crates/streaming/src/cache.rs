use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use formats::FeatureCollection;
use foundation::ids::SlideId;
use futures::future::LocalBoxFuture;
use tracing::debug;

use crate::source::{FeatureCollectionSource, FetchError};

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Session cache in front of another source.
///
/// Datasets are immutable once fetched, so entries are never invalidated.
/// Failures are not cached; the next resolution of that id fetches again.
/// Entries are keyed in a `BTreeMap` for stable traversal order.
#[derive(Debug)]
pub struct CachedSource<S> {
    inner: S,
    entries: RefCell<BTreeMap<SlideId, Rc<FeatureCollection>>>,
    stats: Cell<CacheStats>,
}

impl<S> CachedSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            entries: RefCell::new(BTreeMap::new()),
            stats: Cell::new(CacheStats::default()),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn contains(&self, slide_id: &SlideId) -> bool {
        self.entries.borrow().contains_key(slide_id)
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.get()
    }

    fn record(&self, hit: bool) {
        let mut s = self.stats.get();
        if hit {
            s.hits += 1;
        } else {
            s.misses += 1;
        }
        self.stats.set(s);
    }
}

impl<S: FeatureCollectionSource> FeatureCollectionSource for CachedSource<S> {
    fn resolve<'a>(
        &'a self,
        slide_id: &'a SlideId,
    ) -> LocalBoxFuture<'a, Result<Rc<FeatureCollection>, FetchError>> {
        Box::pin(async move {
            // The borrow must end before the await below.
            let cached = self.entries.borrow().get(slide_id).cloned();
            if let Some(fc) = cached {
                self.record(true);
                return Ok(fc);
            }
            self.record(false);

            let fc = self.inner.resolve(slide_id).await?;
            debug!(slide = %slide_id, features = fc.len(), "dataset cached");
            self.entries
                .borrow_mut()
                .entry(slide_id.clone())
                .or_insert_with(|| fc.clone());
            Ok(fc)
        })
    }
}
