pub mod arrival;
pub mod generation;

pub use arrival::*;
pub use generation::*;
