pub mod cache;
pub mod fs;
#[cfg(target_arch = "wasm32")]
pub mod http;
pub mod preload;
pub mod source;
pub mod static_source;

pub use cache::*;
pub use fs::*;
#[cfg(target_arch = "wasm32")]
pub use http::*;
pub use preload::*;
pub use source::*;
pub use static_source::*;
