use deck::{Slide, SlideLayout, SlideSurface};
use foundation::ids::SlideId;
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

pub const SLIDES_CONTAINER_ID: &str = "slides";
pub const SLIDE_SELECTOR: &str = ".slide";
pub const HIDDEN_CLASS: &str = "hidden";
pub const PERMANENT_TOOLTIPS_ATTR: &str = "data-permanent-tooltips";

/// The slide markup: a container element holding `.slide` elements.
pub struct DomSurface {
    container: HtmlElement,
    elements: Vec<Element>,
}

impl DomSurface {
    /// Reads slides in document order. Each slide's `id` attribute is its id.
    pub fn collect(document: &Document) -> Result<(Self, Vec<Slide>), JsValue> {
        let container = document
            .get_element_by_id(SLIDES_CONTAINER_ID)
            .ok_or_else(|| JsValue::from_str("missing #slides container"))?
            .dyn_into::<HtmlElement>()?;
        let nodes = container.query_selector_all(SLIDE_SELECTOR)?;

        let mut elements = Vec::with_capacity(nodes.length() as usize);
        let mut slides = Vec::with_capacity(nodes.length() as usize);
        for i in 0..nodes.length() {
            let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let id = el.id();
            if id.is_empty() {
                warn!(index = i, "slide without id skipped");
                continue;
            }
            slides.push(
                Slide::new(SlideId::new(id))
                    .with_permanent_tooltips(el.has_attribute(PERMANENT_TOOLTIPS_ATTR)),
            );
            elements.push(el);
        }
        Ok((
            Self {
                container,
                elements,
            },
            slides,
        ))
    }

    pub fn measure_layout(&self) -> SlideLayout {
        let offsets = self
            .elements
            .iter()
            .map(|el| {
                el.dyn_ref::<HtmlElement>()
                    .map(|h| h.offset_top() as f64)
                    .unwrap_or(0.0)
            })
            .collect();
        SlideLayout::new(self.container.offset_top() as f64, offsets)
    }
}

impl SlideSurface for DomSurface {
    fn set_hidden(&mut self, index: usize, slide_id: &SlideId, hidden: bool) {
        let Some(el) = self.elements.get(index) else {
            return;
        };
        let classes = el.class_list();
        let res = if hidden {
            classes.add_1(HIDDEN_CLASS)
        } else {
            classes.remove_1(HIDDEN_CLASS)
        };
        if let Err(err) = res {
            warn!(slide = %slide_id, ?err, "failed to toggle slide visibility");
        }
    }
}
