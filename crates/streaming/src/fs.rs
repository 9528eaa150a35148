use std::path::PathBuf;
use std::rc::Rc;

use formats::FeatureCollection;
use foundation::ids::SlideId;
use futures::future::LocalBoxFuture;

use crate::source::{FeatureCollectionSource, FetchError};

/// Reads `<root>/<slide_id>.json` from the local filesystem.
///
/// Used by the native tooling; reads are synchronous inside the future.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, slide_id: &SlideId) -> PathBuf {
        self.root.join(format!("{slide_id}.json"))
    }

    pub fn load(&self, slide_id: &SlideId) -> Result<FeatureCollection, FetchError> {
        let path = self.path_for(slide_id);
        let bytes = std::fs::read(&path).map_err(|e| FetchError::Io {
            path: path.clone(),
            source: e,
        })?;
        FeatureCollection::from_geojson_slice(&bytes).map_err(|e| FetchError::Decode {
            location: path.display().to_string(),
            source: e,
        })
    }
}

impl FeatureCollectionSource for FsSource {
    fn resolve<'a>(
        &'a self,
        slide_id: &'a SlideId,
    ) -> LocalBoxFuture<'a, Result<Rc<FeatureCollection>, FetchError>> {
        Box::pin(async move { self.load(slide_id).map(Rc::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::FsSource;
    use crate::source::{FeatureCollectionSource, FetchError};
    use foundation::ids::SlideId;

    #[test]
    fn reads_and_decodes_slide_dataset() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("quakes.json"),
            r#"{"type": "FeatureCollection", "bbox": [-10, -10, 10, 10], "features": []}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("broken.json"), "{").unwrap();

        let source = FsSource::new(dir.path());
        let fc = pollster::block_on(source.resolve(&SlideId::new("quakes"))).unwrap();
        assert!(fc.is_empty());
        assert!(fc.bbox.is_some());

        let err = pollster::block_on(source.resolve(&SlideId::new("broken"))).unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
        let err = pollster::block_on(source.resolve(&SlideId::new("absent"))).unwrap_err();
        assert!(matches!(err, FetchError::Io { .. }));
    }
}
