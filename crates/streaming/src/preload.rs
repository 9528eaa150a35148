use foundation::ids::SlideId;
use futures::future::join_all;
use tracing::debug;

use crate::source::FeatureCollectionSource;

/// Resolves every slide id to warm caches, discarding the results.
///
/// Failures are swallowed; the return value is the number of datasets that
/// resolved successfully and exists only for logging.
pub async fn preload_all<S>(source: &S, slide_ids: &[SlideId]) -> usize
where
    S: FeatureCollectionSource + ?Sized,
{
    let results = join_all(slide_ids.iter().map(|id| async move {
        match source.resolve(id).await {
            Ok(_) => true,
            Err(err) => {
                debug!(slide = %id, %err, "preload failed");
                false
            }
        }
    }))
    .await;
    let warmed = results.into_iter().filter(|ok| *ok).count();
    debug!(warmed, total = slide_ids.len(), "preload finished");
    warmed
}
