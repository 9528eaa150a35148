use foundation::ids::SlideId;
use streaming::FetchError;

#[derive(Debug)]
pub enum DeckError {
    /// The entering slide's dataset could not be resolved; the previous
    /// overlay is still displayed.
    Fetch { slide_id: SlideId, source: FetchError },
    IndexOutOfRange { index: usize, len: usize },
    EmptyDeck,
    Config(String),
}

impl std::fmt::Display for DeckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeckError::Fetch { slide_id, source } => {
                write!(f, "failed to load dataset for slide {slide_id}: {source}")
            }
            DeckError::IndexOutOfRange { index, len } => {
                write!(f, "slide index {index} out of range for {len} slides")
            }
            DeckError::EmptyDeck => write!(f, "deck has no slides"),
            DeckError::Config(msg) => write!(f, "invalid deck config: {msg}"),
        }
    }
}

impl std::error::Error for DeckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DeckError::Fetch { source, .. } => Some(source),
            _ => None,
        }
    }
}
