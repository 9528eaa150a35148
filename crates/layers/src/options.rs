use std::collections::BTreeMap;
use std::fmt;

use formats::Feature;
use foundation::ids::SlideId;

use crate::popup::describe_feature;
use crate::symbology::{FeatureStyle, default_style};

/// How one slide's features are drawn and described.
pub trait RenderOptions {
    fn style(&self, feature: &Feature) -> FeatureStyle;

    /// Popup HTML for `feature`; `None` binds no popup.
    fn enrich(&self, feature: &Feature) -> Option<String>;
}

/// Magnitude-coloured points and generated popup content.
#[derive(Debug, Copy, Clone, Default)]
pub struct DefaultRenderOptions;

impl RenderOptions for DefaultRenderOptions {
    fn style(&self, feature: &Feature) -> FeatureStyle {
        default_style(feature)
    }

    fn enrich(&self, feature: &Feature) -> Option<String> {
        Some(describe_feature(feature))
    }
}

/// One fixed style for every feature, popup taken from a single property.
#[derive(Debug, Clone)]
pub struct UniformRenderOptions {
    pub style: FeatureStyle,
    pub popup_property: Option<String>,
}

impl UniformRenderOptions {
    pub fn new(style: FeatureStyle) -> Self {
        Self {
            style,
            popup_property: None,
        }
    }

    pub fn with_popup_property(mut self, key: impl Into<String>) -> Self {
        self.popup_property = Some(key.into());
        self
    }
}

impl RenderOptions for UniformRenderOptions {
    fn style(&self, _feature: &Feature) -> FeatureStyle {
        self.style
    }

    fn enrich(&self, feature: &Feature) -> Option<String> {
        let key = self.popup_property.as_deref()?;
        feature
            .property_str(key)
            .map(|v| crate::popup::escape_html(&v))
    }
}

/// Closure-backed options for slides with bespoke styling.
pub struct FnRenderOptions<S, E> {
    style: S,
    enrich: E,
}

impl<S, E> FnRenderOptions<S, E>
where
    S: Fn(&Feature) -> FeatureStyle,
    E: Fn(&Feature) -> Option<String>,
{
    pub fn new(style: S, enrich: E) -> Self {
        Self { style, enrich }
    }
}

impl<S, E> RenderOptions for FnRenderOptions<S, E>
where
    S: Fn(&Feature) -> FeatureStyle,
    E: Fn(&Feature) -> Option<String>,
{
    fn style(&self, feature: &Feature) -> FeatureStyle {
        (self.style)(feature)
    }

    fn enrich(&self, feature: &Feature) -> Option<String> {
        (self.enrich)(feature)
    }
}

/// Per-slide render options, falling back to [`DefaultRenderOptions`].
///
/// Built once at startup; there is no way to remove an entry.
#[derive(Default)]
pub struct SlideRenderOptions {
    entries: BTreeMap<SlideId, Box<dyn RenderOptions>>,
    fallback: DefaultRenderOptions,
}

impl SlideRenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(
        mut self,
        slide_id: impl Into<SlideId>,
        options: impl RenderOptions + 'static,
    ) -> Self {
        self.entries.insert(slide_id.into(), Box::new(options));
        self
    }

    pub fn has_entry(&self, slide_id: &SlideId) -> bool {
        self.entries.contains_key(slide_id)
    }

    pub fn for_slide(&self, slide_id: &SlideId) -> &dyn RenderOptions {
        match self.entries.get(slide_id) {
            Some(opts) => opts.as_ref(),
            None => &self.fallback,
        }
    }
}

impl fmt::Debug for SlideRenderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlideRenderOptions")
            .field("slides", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
