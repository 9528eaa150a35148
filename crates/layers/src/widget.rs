use formats::Feature;
use foundation::bounds::GeoBounds;
use foundation::handles::{ControlId, FeatureHandle, GroupId};

use crate::symbology::FeatureStyle;

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub text: String,
    /// Permanent tooltips stay visible instead of showing on hover.
    pub permanent: bool,
}

impl Tooltip {
    pub fn hover(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            permanent: false,
        }
    }

    pub fn permanent(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            permanent: true,
        }
    }
}

/// The external map widget, seen as a set of declarative commands.
///
/// The engine never draws; it issues these commands and reads back coarse
/// results (handles and bounds). All calls happen on the event-loop thread.
pub trait MapWidget {
    fn create_group(&mut self) -> GroupId;
    /// Removes every feature in `group`, including their tooltips and popups.
    fn clear_group(&mut self, group: GroupId);
    fn add_feature(
        &mut self,
        group: GroupId,
        feature: &Feature,
        style: &FeatureStyle,
    ) -> FeatureHandle;

    fn bind_popup(&mut self, feature: FeatureHandle, html: &str);
    fn bind_tooltip(&mut self, feature: FeatureHandle, tooltip: &Tooltip);
    fn unbind_tooltip(&mut self, feature: FeatureHandle);
    fn open_tooltip(&mut self, feature: FeatureHandle);

    /// Bounds of everything drawn in `group`, `None` when it is empty.
    fn group_bounds(&self, group: GroupId) -> Option<GeoBounds>;
    /// Starts an animated viewport transition; completion is reported by the
    /// widget's owner through the deck's arrival hook.
    ///
    /// Some maps report completion synchronously, from inside this call, so
    /// hosts sharing the deck must expect the arrival hook re-entrantly.
    fn fly_to_bounds(&mut self, bounds: GeoBounds);

    fn add_control(&mut self, control: ControlId);
    fn remove_control(&mut self, control: ControlId);
}
