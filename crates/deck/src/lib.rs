pub mod config;
pub mod deck;
pub mod error;
pub mod legend;
pub mod slide;
#[cfg(test)]
mod testing;
pub mod tracker;
pub mod viewport;

pub use config::*;
pub use deck::*;
pub use error::*;
pub use legend::*;
pub use slide::*;
pub use tracker::*;
pub use viewport::*;
