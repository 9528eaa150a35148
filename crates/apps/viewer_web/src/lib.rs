//! Browser entry point: binds a `deck::SlideDeck` to the page's slides and map.

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod deferred;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod logging;
#[cfg(target_arch = "wasm32")]
mod map_bridge;

#[cfg(target_arch = "wasm32")]
pub use app::*;
#[cfg(target_arch = "wasm32")]
pub use dom::DomSurface;
#[cfg(target_arch = "wasm32")]
pub use map_bridge::{JsMapWidget, MapBridge};
