use std::cell::RefCell;
use std::rc::Rc;

use deck::{DeckConfig, SlideDeck, TransitionOutcome};
use streaming::{CachedSource, FeatureCollectionSource, HttpSource, preload_all};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::deferred::run_or_defer;
use crate::dom::DomSurface;
use crate::logging;
use crate::map_bridge::{JsMapWidget, MapBridge};

type WebDeck = SlideDeck<CachedSource<HttpSource>, JsMapWidget, DomSurface>;

thread_local! {
    static DECK: RefCell<Option<Rc<RefCell<WebDeck>>>> = const { RefCell::new(None) };
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn current_deck() -> Option<Rc<RefCell<WebDeck>>> {
    DECK.with(|d| d.borrow().clone())
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logging::init(tracing::Level::INFO);
}

/// Builds the deck from the page markup and enters the first slide.
///
/// `config_json` is an optional JSON object with any of the deck settings;
/// omitted fields take their defaults.
#[wasm_bindgen]
pub fn init_deck(map: MapBridge, config_json: Option<String>) -> Result<(), JsValue> {
    let config = match config_json {
        Some(json) => DeckConfig::from_json_str(&json).map_err(to_js)?,
        None => DeckConfig::default(),
    };
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let (surface, slides) = DomSurface::collect(&document)?;
    let layout = surface.measure_layout();
    let source = Rc::new(CachedSource::new(HttpSource::new(
        config.data_base_url.clone(),
    )));
    let preload = config.preload;
    let deck = SlideDeck::new(config, slides, source, JsMapWidget::new(map), surface)
        .map_err(to_js)?
        .with_layout(layout);
    let deck = Rc::new(RefCell::new(deck));
    DECK.with(|d| *d.borrow_mut() = Some(Rc::clone(&deck)));

    install_listener(&window, "scroll", on_scroll)?;
    install_listener(&window, "resize", refresh_layout)?;

    if preload {
        let (source, ids) = {
            let deck = deck.borrow();
            (deck.source(), deck.slide_ids())
        };
        spawn_local(async move {
            let loaded = preload_all(&*source, &ids).await;
            debug!(loaded, total = ids.len(), "preload finished");
        });
    }

    transition_to(&deck, 0);
    Ok(())
}

fn install_listener(
    window: &web_sys::Window,
    event: &str,
    handler: fn(),
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut()>::new(handler);
    window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    // Lives as long as the page.
    closure.forget();
    Ok(())
}

/// Starts a transition synchronously and completes it once the dataset is
/// in. The deck is not borrowed across the await, so scroll and button
/// events can start newer transitions meanwhile.
fn transition_to(deck: &Rc<RefCell<WebDeck>>, index: usize) {
    let transition = match deck.borrow_mut().begin_transition(index) {
        Ok(t) => t,
        Err(err) => {
            warn!(index, error = %err, "transition rejected");
            return;
        }
    };
    let source = deck.borrow().source();
    let deck = Rc::clone(deck);
    spawn_local(async move {
        let dataset = source.resolve(transition.slide_id()).await;
        // Failures are logged by the deck and leave the previous overlay up.
        if let Ok(TransitionOutcome::Stale) =
            deck.borrow_mut().complete_transition(transition, dataset)
        {
            debug!("superseded before data arrived");
        }
    });
}

fn on_scroll() {
    let Some(deck) = current_deck() else {
        return;
    };
    let Some(window) = web_sys::window() else {
        return;
    };
    let scroll = window.scroll_y().unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let target = deck.borrow().scroll_target(scroll, height);
    if let Some(index) = target {
        transition_to(&deck, index);
    }
}

#[wasm_bindgen]
pub fn next_slide() {
    if let Some(deck) = current_deck() {
        let index = {
            let deck = deck.borrow();
            deck::next_index(deck.current_index(), deck.len())
        };
        transition_to(&deck, index);
    }
}

#[wasm_bindgen]
pub fn previous_slide() {
    if let Some(deck) = current_deck() {
        let index = {
            let deck = deck.borrow();
            deck::previous_index(deck.current_index(), deck.len())
        };
        transition_to(&deck, index);
    }
}

/// Called by the page when the map's fly animation ends. Returns how many
/// permanent tooltips were opened.
///
/// Maps that finish instantly may call this from inside `flyToBounds`, while
/// the deck is still applying the slide; the reveal is then queued and this
/// returns 0.
#[wasm_bindgen]
pub fn viewport_arrived() -> u32 {
    let Some(deck) = current_deck() else {
        return 0;
    };
    run_or_defer(
        &deck,
        |deck| deck.on_viewport_arrived() as u32,
        |job| spawn_local(async move { job() }),
    )
    .unwrap_or(0)
}

/// Re-measures slide offsets, e.g. after images load or the window resizes.
#[wasm_bindgen]
pub fn refresh_layout() {
    if let Some(deck) = current_deck() {
        let layout = deck.borrow().surface().measure_layout();
        deck.borrow_mut().set_layout(layout);
    }
}

#[wasm_bindgen]
pub fn current_slide_id() -> Option<String> {
    current_deck().map(|deck| deck.borrow().current_slide().id.as_str().to_owned())
}
