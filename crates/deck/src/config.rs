use foundation::ids::SlideId;
use serde::{Deserialize, Serialize};

use crate::error::DeckError;
use crate::tracker::DEFAULT_TRIGGER_RATIO;

pub const DEFAULT_TITLE_SLIDE_ID: &str = "title-slide";
pub const DEFAULT_DATA_BASE_URL: &str = "data";

/// Deck-wide settings. Every field is optional in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Slide whose entry shows the legend.
    pub title_slide_id: SlideId,
    /// See [`crate::tracker::SlideIndexTracker`].
    pub trigger_ratio: f64,
    /// Datasets are fetched from `<data_base_url>/<slide_id>.json`.
    pub data_base_url: String,
    /// Warm the dataset cache for every slide at startup.
    pub preload: bool,
    /// Slides that open permanent tooltips once the viewport arrives, in
    /// addition to slides flagged in markup.
    pub permanent_tooltip_slides: Vec<SlideId>,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            title_slide_id: SlideId::new(DEFAULT_TITLE_SLIDE_ID),
            trigger_ratio: DEFAULT_TRIGGER_RATIO,
            data_base_url: DEFAULT_DATA_BASE_URL.to_string(),
            preload: true,
            permanent_tooltip_slides: Vec::new(),
        }
    }
}

impl DeckConfig {
    pub fn from_json_str(payload: &str) -> Result<Self, DeckError> {
        let config: DeckConfig =
            serde_json::from_str(payload).map_err(|e| DeckError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DeckError> {
        if !self.trigger_ratio.is_finite() || !(0.0..=1.0).contains(&self.trigger_ratio) {
            return Err(DeckError::Config(format!(
                "trigger_ratio must be within 0..=1, got {}",
                self.trigger_ratio
            )));
        }
        if self.title_slide_id.as_str().is_empty() {
            return Err(DeckError::Config("title_slide_id is empty".to_string()));
        }
        Ok(())
    }
}
