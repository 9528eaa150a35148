use std::rc::Rc;

use formats::FeatureCollection;
use foundation::ids::SlideId;
use futures::future::LocalBoxFuture;
use gloo_net::http::Request;
use tracing::debug;

use crate::source::{FeatureCollectionSource, FetchError, dataset_location};

/// Fetches `GET <base_url>/<slide_id>.json` with the browser's fetch API.
///
/// Repeated requests rely on the browser HTTP cache; wrap in
/// [`crate::CachedSource`] to also skip decoding.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    async fn fetch(&self, slide_id: &SlideId) -> Result<FeatureCollection, FetchError> {
        let url = dataset_location(&self.base_url, slide_id);
        debug!(%url, "fetching dataset");
        let resp = Request::get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.clone(),
                message: e.to_string(),
            })?;
        if !resp.ok() {
            return Err(FetchError::Status {
                url,
                status: resp.status(),
            });
        }
        let text = resp.text().await.map_err(|e| FetchError::Transport {
            url: url.clone(),
            message: e.to_string(),
        })?;
        FeatureCollection::from_geojson_str(&text).map_err(|e| FetchError::Decode {
            location: url,
            source: e,
        })
    }
}

impl FeatureCollectionSource for HttpSource {
    fn resolve<'a>(
        &'a self,
        slide_id: &'a SlideId,
    ) -> LocalBoxFuture<'a, Result<Rc<FeatureCollection>, FetchError>> {
        Box::pin(async move { self.fetch(slide_id).await.map(Rc::new) })
    }
}
