use formats::FeatureCollection;
use foundation::bounds::GeoBounds;
use layers::{MapWidget, OverlayLayer};
use runtime::{Arrival, ArrivalSlot};
use tracing::debug;

/// Drives the map viewport toward the current dataset.
///
/// At most one arrival is pending: starting a new flight supersedes the
/// previous one, so its handle never reports arrival.
#[derive(Debug, Default)]
pub struct ViewportController {
    slot: ArrivalSlot,
    last_target: Option<GeoBounds>,
}

impl ViewportController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit `bbox` first, then the bounds of what was drawn, then the raw
    /// dataset geometry.
    pub fn target_bounds<W: MapWidget + ?Sized>(
        widget: &W,
        dataset: &FeatureCollection,
        layer: &OverlayLayer,
    ) -> Option<GeoBounds> {
        dataset
            .bbox
            .or_else(|| layer.bounds(widget))
            .or_else(|| dataset.geometry_bounds())
    }

    /// Starts a transition and returns its arrival handle.
    ///
    /// Returns `None` when no bounds can be derived (empty dataset); any
    /// earlier pending arrival is superseded either way.
    pub fn fly_to<W: MapWidget + ?Sized>(
        &mut self,
        widget: &mut W,
        dataset: &FeatureCollection,
        layer: &OverlayLayer,
    ) -> Option<Arrival> {
        let Some(bounds) = Self::target_bounds(widget, dataset, layer) else {
            self.slot.cancel();
            debug!("no bounds to fly to");
            return None;
        };
        widget.fly_to_bounds(bounds);
        self.last_target = Some(bounds);
        Some(self.slot.arm())
    }

    /// Reports that the widget finished its transition.
    ///
    /// Returns `true` if a pending arrival was resolved.
    pub fn notify_arrived(&mut self) -> bool {
        self.slot.fire()
    }

    pub fn in_flight(&self) -> bool {
        self.slot.is_armed()
    }

    pub fn last_target(&self) -> Option<GeoBounds> {
        self.last_target
    }
}

#[cfg(test)]
mod tests {
    use super::ViewportController;
    use formats::{Feature, FeatureCollection, GeoPoint, Geometry};
    use foundation::bounds::GeoBounds;
    use layers::testing::RecordingWidget;
    use layers::{DefaultRenderOptions, OverlayRenderer};
    use runtime::ArrivalState;

    fn far_point() -> FeatureCollection {
        FeatureCollection::new(vec![Feature::new(Geometry::Point(GeoPoint::new(
            120.0, 45.0,
        )))])
    }

    #[test]
    fn explicit_bbox_bypasses_geometry() {
        let mut widget = RecordingWidget::new();
        let mut renderer = OverlayRenderer::new();
        let fc = far_point().with_bbox(GeoBounds::new(-10.0, -10.0, 10.0, 10.0));
        let layer = renderer.render(&mut widget, &fc, &DefaultRenderOptions).clone();

        let mut vp = ViewportController::new();
        vp.fly_to(&mut widget, &fc, &layer).expect("arrival");

        assert_eq!(
            widget.last_flight(),
            Some(GeoBounds::new(-10.0, -10.0, 10.0, 10.0))
        );
    }

    #[test]
    fn falls_back_to_rendered_bounds() {
        let mut widget = RecordingWidget::new();
        let mut renderer = OverlayRenderer::new();
        let fc = far_point();
        let layer = renderer.render(&mut widget, &fc, &DefaultRenderOptions).clone();

        let mut vp = ViewportController::new();
        vp.fly_to(&mut widget, &fc, &layer);
        assert_eq!(widget.last_flight(), Some(GeoBounds::new(120.0, 45.0, 120.0, 45.0)));
    }

    #[test]
    fn new_flight_supersedes_pending_arrival() {
        let mut widget = RecordingWidget::new();
        let mut renderer = OverlayRenderer::new();
        let fc = far_point();
        let layer = renderer.render(&mut widget, &fc, &DefaultRenderOptions).clone();

        let mut vp = ViewportController::new();
        let mut first = vp.fly_to(&mut widget, &fc, &layer).unwrap();
        let mut second = vp.fly_to(&mut widget, &fc, &layer).unwrap();
        assert!(vp.in_flight());
        assert!(vp.notify_arrived());
        assert!(!vp.notify_arrived());

        assert_eq!(first.try_arrived(), ArrivalState::Superseded);
        assert_eq!(second.try_arrived(), ArrivalState::Arrived);
    }

    #[test]
    fn empty_dataset_issues_no_flight() {
        let mut widget = RecordingWidget::new();
        let mut renderer = OverlayRenderer::new();
        let empty = FeatureCollection::default();
        let layer = renderer.render(&mut widget, &empty, &DefaultRenderOptions).clone();

        let mut vp = ViewportController::new();
        assert!(vp.fly_to(&mut widget, &empty, &layer).is_none());
        assert!(widget.flights.is_empty());
        assert!(!vp.in_flight());
    }
}
