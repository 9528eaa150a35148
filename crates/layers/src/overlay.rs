use formats::FeatureCollection;
use foundation::bounds::GeoBounds;
use foundation::handles::{FeatureHandle, GroupId};
use tracing::debug;

use crate::options::RenderOptions;
use crate::widget::{MapWidget, Tooltip};

/// Property bound as the hover tooltip of every rendered feature.
pub const LABEL_KEY: &str = "label";

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFeature {
    pub handle: FeatureHandle,
    pub label: Option<String>,
}

/// The features currently drawn for one slide.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLayer {
    group: GroupId,
    features: Vec<RenderedFeature>,
}

impl OverlayLayer {
    pub fn group(&self) -> GroupId {
        self.group
    }

    pub fn features(&self) -> &[RenderedFeature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn bounds<W: MapWidget + ?Sized>(&self, widget: &W) -> Option<GeoBounds> {
        widget.group_bounds(self.group)
    }

    /// Replaces each labelled feature's hover tooltip with a permanent one and
    /// opens it. Features without a label are left alone.
    pub fn reveal_tooltips<W: MapWidget + ?Sized>(&self, widget: &mut W) -> usize {
        let mut revealed = 0;
        for f in &self.features {
            let Some(label) = &f.label else {
                continue;
            };
            widget.unbind_tooltip(f.handle);
            widget.bind_tooltip(f.handle, &Tooltip::permanent(label.clone()));
            widget.open_tooltip(f.handle);
            revealed += 1;
        }
        revealed
    }
}

/// Owns the single overlay group and redraws it per slide.
#[derive(Debug, Default)]
pub struct OverlayRenderer {
    group: Option<GroupId>,
    current: Option<OverlayLayer>,
}

impl OverlayRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&OverlayLayer> {
        self.current.as_ref()
    }

    /// Clears whatever was drawn before, then draws `dataset`.
    ///
    /// Features without geometry are skipped.
    pub fn render<W: MapWidget + ?Sized>(
        &mut self,
        widget: &mut W,
        dataset: &FeatureCollection,
        options: &dyn RenderOptions,
    ) -> &OverlayLayer {
        let group = match self.group {
            Some(g) => g,
            None => {
                let g = widget.create_group();
                self.group = Some(g);
                g
            }
        };
        widget.clear_group(group);

        let mut features = Vec::with_capacity(dataset.len());
        for feature in &dataset.features {
            if feature.geometry.is_none() {
                continue;
            }
            let style = options.style(feature);
            let handle = widget.add_feature(group, feature, &style);
            if let Some(html) = options.enrich(feature) {
                widget.bind_popup(handle, &html);
            }
            let label = feature.property_str(LABEL_KEY);
            if let Some(text) = &label {
                widget.bind_tooltip(handle, &Tooltip::hover(text.clone()));
            }
            features.push(RenderedFeature { handle, label });
        }
        debug!(group = group.0, features = features.len(), "overlay rendered");

        self.current.insert(OverlayLayer { group, features })
    }
}

#[cfg(test)]
mod tests {
    use super::OverlayRenderer;
    use crate::options::DefaultRenderOptions;
    use crate::testing::RecordingWidget;
    use formats::{Feature, FeatureCollection, GeoPoint, Geometry};
    use foundation::bounds::GeoBounds;
    use pretty_assertions::assert_eq;

    fn points(n: usize) -> FeatureCollection {
        FeatureCollection::new(
            (0..n)
                .map(|i| {
                    Feature::new(Geometry::Point(GeoPoint::new(i as f64, -(i as f64))))
                        .with_property("label", format!("p{i}"))
                })
                .collect(),
        )
    }

    #[test]
    fn second_render_replaces_first() {
        let mut widget = RecordingWidget::new();
        let mut renderer = OverlayRenderer::new();

        renderer.render(&mut widget, &points(5), &DefaultRenderOptions);
        let layer = renderer.render(&mut widget, &points(2), &DefaultRenderOptions);

        assert_eq!(layer.len(), 2);
        assert_eq!(widget.feature_count(layer.group()), 2);
        assert_eq!(widget.total_features(), 2);
        assert_eq!(widget.groups_created(), 1);
    }

    #[test]
    fn binds_hover_tooltips_and_popups() {
        let mut widget = RecordingWidget::new();
        let mut renderer = OverlayRenderer::new();

        let mut fc = points(1);
        fc.features.push(Feature::new(Geometry::LineString(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 1.0),
        ])));
        let layer = renderer.render(&mut widget, &fc, &DefaultRenderOptions).clone();

        let labelled = widget.feature(layer.features()[0].handle).unwrap();
        let tooltip = labelled.tooltip.as_ref().unwrap();
        assert_eq!(tooltip.text, "p0");
        assert!(!tooltip.permanent);
        assert!(labelled.popup.as_deref().unwrap().contains("Magnitude: N/A"));

        let unlabelled = widget.feature(layer.features()[1].handle).unwrap();
        assert!(unlabelled.tooltip.is_none());
        assert_eq!(
            layer.bounds(&widget),
            Some(GeoBounds::new(0.0, 0.0, 1.0, 1.0))
        );
    }

    #[test]
    fn skips_features_without_geometry() {
        let mut widget = RecordingWidget::new();
        let mut renderer = OverlayRenderer::new();
        let mut fc = points(1);
        fc.features.push(formats::Feature {
            id: None,
            properties: Default::default(),
            geometry: None,
        });
        assert_eq!(renderer.render(&mut widget, &fc, &DefaultRenderOptions).len(), 1);
    }

    #[test]
    fn reveal_makes_labels_permanent_and_open() {
        let mut widget = RecordingWidget::new();
        let mut renderer = OverlayRenderer::new();
        let layer = renderer
            .render(&mut widget, &points(3), &DefaultRenderOptions)
            .clone();

        assert_eq!(layer.reveal_tooltips(&mut widget), 3);
        for f in layer.features() {
            let rec = widget.feature(f.handle).unwrap();
            assert!(rec.tooltip.as_ref().unwrap().permanent);
            assert!(rec.tooltip_open);
        }
    }
}
