//! In-memory [`MapWidget`] that records every command, for tests.

use std::collections::{BTreeMap, BTreeSet};

use formats::Feature;
use foundation::bounds::{BoundsBuilder, GeoBounds};
use foundation::handles::{ControlId, FeatureHandle, GroupId};

use crate::symbology::FeatureStyle;
use crate::widget::{MapWidget, Tooltip};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFeature {
    pub group: GroupId,
    pub feature: Feature,
    pub style: FeatureStyle,
    pub popup: Option<String>,
    pub tooltip: Option<Tooltip>,
    pub tooltip_open: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ControlCall {
    Add(ControlId),
    Remove(ControlId),
}

#[derive(Debug, Default)]
pub struct RecordingWidget {
    next_group: u32,
    next_feature: u64,
    features: BTreeMap<FeatureHandle, RecordedFeature>,
    controls: BTreeSet<ControlId>,
    pub flights: Vec<GeoBounds>,
    pub control_calls: Vec<ControlCall>,
}

impl RecordingWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groups_created(&self) -> u32 {
        self.next_group
    }

    pub fn feature(&self, handle: FeatureHandle) -> Option<&RecordedFeature> {
        self.features.get(&handle)
    }

    pub fn feature_count(&self, group: GroupId) -> usize {
        self.features.values().filter(|f| f.group == group).count()
    }

    pub fn total_features(&self) -> usize {
        self.features.len()
    }

    pub fn features(&self) -> impl Iterator<Item = &RecordedFeature> {
        self.features.values()
    }

    pub fn has_control(&self, control: ControlId) -> bool {
        self.controls.contains(&control)
    }

    pub fn last_flight(&self) -> Option<GeoBounds> {
        self.flights.last().copied()
    }

    fn feature_mut(&mut self, handle: FeatureHandle) -> &mut RecordedFeature {
        self.features
            .get_mut(&handle)
            .unwrap_or_else(|| panic!("unknown feature handle {handle:?}"))
    }
}

impl MapWidget for RecordingWidget {
    fn create_group(&mut self) -> GroupId {
        self.next_group += 1;
        GroupId(self.next_group)
    }

    fn clear_group(&mut self, group: GroupId) {
        self.features.retain(|_, f| f.group != group);
    }

    fn add_feature(
        &mut self,
        group: GroupId,
        feature: &Feature,
        style: &FeatureStyle,
    ) -> FeatureHandle {
        self.next_feature += 1;
        let handle = FeatureHandle(self.next_feature);
        self.features.insert(
            handle,
            RecordedFeature {
                group,
                feature: feature.clone(),
                style: *style,
                popup: None,
                tooltip: None,
                tooltip_open: false,
            },
        );
        handle
    }

    fn bind_popup(&mut self, feature: FeatureHandle, html: &str) {
        self.feature_mut(feature).popup = Some(html.to_string());
    }

    fn bind_tooltip(&mut self, feature: FeatureHandle, tooltip: &Tooltip) {
        let f = self.feature_mut(feature);
        f.tooltip = Some(tooltip.clone());
        f.tooltip_open = false;
    }

    fn unbind_tooltip(&mut self, feature: FeatureHandle) {
        let f = self.feature_mut(feature);
        f.tooltip = None;
        f.tooltip_open = false;
    }

    fn open_tooltip(&mut self, feature: FeatureHandle) {
        let f = self.feature_mut(feature);
        f.tooltip_open = f.tooltip.is_some();
    }

    fn group_bounds(&self, group: GroupId) -> Option<GeoBounds> {
        let mut b = BoundsBuilder::new();
        for f in self.features.values().filter(|f| f.group == group) {
            if let Some(gb) = f.feature.geometry.as_ref().and_then(|g| g.bounds()) {
                b.push_bounds(gb);
            }
        }
        b.finish()
    }

    fn fly_to_bounds(&mut self, bounds: GeoBounds) {
        self.flights.push(bounds);
    }

    fn add_control(&mut self, control: ControlId) {
        self.controls.insert(control);
        self.control_calls.push(ControlCall::Add(control));
    }

    fn remove_control(&mut self, control: ControlId) {
        self.controls.remove(&control);
        self.control_calls.push(ControlCall::Remove(control));
    }
}
