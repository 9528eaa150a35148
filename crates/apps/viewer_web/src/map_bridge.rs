use formats::Feature;
use foundation::bounds::GeoBounds;
use foundation::handles::{ControlId, FeatureHandle, GroupId};
use layers::{FeatureStyle, MapWidget, Tooltip};
use serde_json::json;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Adapter object supplied by the page around its map library.
    ///
    /// Features and styles cross the boundary as JSON strings; handles are
    /// plain numbers owned by the JS side.
    pub type MapBridge;

    #[wasm_bindgen(method, js_name = createGroup)]
    fn create_group(this: &MapBridge) -> u32;
    #[wasm_bindgen(method, js_name = clearGroup)]
    fn clear_group(this: &MapBridge, group: u32);
    #[wasm_bindgen(method, js_name = addFeature)]
    fn add_feature(this: &MapBridge, group: u32, feature_json: &str, style_json: &str) -> f64;
    #[wasm_bindgen(method, js_name = bindPopup)]
    fn bind_popup(this: &MapBridge, feature: f64, html: &str);
    #[wasm_bindgen(method, js_name = bindTooltip)]
    fn bind_tooltip(this: &MapBridge, feature: f64, text: &str, permanent: bool);
    #[wasm_bindgen(method, js_name = unbindTooltip)]
    fn unbind_tooltip(this: &MapBridge, feature: f64);
    #[wasm_bindgen(method, js_name = openTooltip)]
    fn open_tooltip(this: &MapBridge, feature: f64);
    /// `[west, south, east, north]`, or `null` for an empty group.
    #[wasm_bindgen(method, js_name = groupBounds)]
    fn group_bounds(this: &MapBridge, group: u32) -> JsValue;
    #[wasm_bindgen(method, js_name = flyToBounds)]
    fn fly_to_bounds(this: &MapBridge, west: f64, south: f64, east: f64, north: f64);
    #[wasm_bindgen(method, js_name = addControl)]
    fn add_control(this: &MapBridge, name: &str);
    #[wasm_bindgen(method, js_name = removeControl)]
    fn remove_control(this: &MapBridge, name: &str);
}

pub struct JsMapWidget {
    bridge: MapBridge,
}

impl JsMapWidget {
    pub fn new(bridge: MapBridge) -> Self {
        Self { bridge }
    }
}

fn control_name(control: ControlId) -> &'static str {
    match control {
        ControlId::Legend => "legend",
    }
}

fn style_json(style: &FeatureStyle) -> String {
    json!({
        "color": style.color.to_hex(),
        "fillColor": style.fill_color.to_hex(),
        "weight": style.weight,
        "opacity": style.opacity,
        "fillOpacity": style.fill_opacity,
        "radius": style.radius,
    })
    .to_string()
}

impl MapWidget for JsMapWidget {
    fn create_group(&mut self) -> GroupId {
        GroupId(self.bridge.create_group())
    }

    fn clear_group(&mut self, group: GroupId) {
        self.bridge.clear_group(group.0);
    }

    fn add_feature(
        &mut self,
        group: GroupId,
        feature: &Feature,
        style: &FeatureStyle,
    ) -> FeatureHandle {
        let feature_json = feature.to_geojson_value().to_string();
        let handle = self
            .bridge
            .add_feature(group.0, &feature_json, &style_json(style));
        FeatureHandle(handle as u64)
    }

    fn bind_popup(&mut self, feature: FeatureHandle, html: &str) {
        self.bridge.bind_popup(feature.0 as f64, html);
    }

    fn bind_tooltip(&mut self, feature: FeatureHandle, tooltip: &Tooltip) {
        self.bridge
            .bind_tooltip(feature.0 as f64, &tooltip.text, tooltip.permanent);
    }

    fn unbind_tooltip(&mut self, feature: FeatureHandle) {
        self.bridge.unbind_tooltip(feature.0 as f64);
    }

    fn open_tooltip(&mut self, feature: FeatureHandle) {
        self.bridge.open_tooltip(feature.0 as f64);
    }

    fn group_bounds(&self, group: GroupId) -> Option<GeoBounds> {
        let value = self.bridge.group_bounds(group.0);
        if value.is_null() || value.is_undefined() {
            return None;
        }
        let values: Vec<f64> = js_sys::Array::from(&value)
            .iter()
            .filter_map(|v| v.as_f64())
            .collect();
        GeoBounds::from_bbox_slice(&values)
    }

    fn fly_to_bounds(&mut self, bounds: GeoBounds) {
        self.bridge
            .fly_to_bounds(bounds.west, bounds.south, bounds.east, bounds.north);
    }

    fn add_control(&mut self, control: ControlId) {
        self.bridge.add_control(control_name(control));
    }

    fn remove_control(&mut self, control: ControlId) {
        self.bridge.remove_control(control_name(control));
    }
}
