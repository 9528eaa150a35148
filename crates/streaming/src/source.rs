//! Resolution of a slide id to its geographic dataset.
//!
//! Sources are driven from a single-threaded event loop, so futures are
//! `!Send` and implementations may hold `Rc`/`RefCell` state.

use std::path::PathBuf;
use std::rc::Rc;

use formats::{FeatureCollection, FeatureCollectionError};
use foundation::ids::SlideId;
use futures::future::LocalBoxFuture;

/// Failure to resolve a slide's dataset.
#[derive(Debug)]
pub enum FetchError {
    /// The request never produced a response.
    Transport { url: String, message: String },
    /// The server answered with a non-success status.
    Status { url: String, status: u16 },
    /// The payload was not a valid GeoJSON FeatureCollection.
    Decode {
        location: String,
        source: FeatureCollectionError,
    },
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The source has no dataset for this slide.
    NotFound { slide_id: SlideId },
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Transport { url, message } => write!(f, "GET {url} failed: {message}"),
            FetchError::Status { url, status } => write!(f, "GET {url} returned HTTP {status}"),
            FetchError::Decode { location, source } => {
                write!(f, "failed to decode {location}: {source}")
            }
            FetchError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            FetchError::NotFound { slide_id } => write!(f, "no dataset for slide {slide_id}"),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Decode { source, .. } => Some(source),
            FetchError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Resolves a slide id to its dataset.
///
/// Implementations must not retry; failures surface to the caller.
pub trait FeatureCollectionSource {
    fn resolve<'a>(
        &'a self,
        slide_id: &'a SlideId,
    ) -> LocalBoxFuture<'a, Result<Rc<FeatureCollection>, FetchError>>;
}

impl<S: FeatureCollectionSource + ?Sized> FeatureCollectionSource for Rc<S> {
    fn resolve<'a>(
        &'a self,
        slide_id: &'a SlideId,
    ) -> LocalBoxFuture<'a, Result<Rc<FeatureCollection>, FetchError>> {
        (**self).resolve(slide_id)
    }
}

/// `<base>/<slide_id>.json`, tolerating a trailing slash on `base`.
pub fn dataset_location(base: &str, slide_id: &SlideId) -> String {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        format!("{slide_id}.json")
    } else {
        format!("{base}/{slide_id}.json")
    }
}
