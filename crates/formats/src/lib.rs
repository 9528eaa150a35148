pub mod feature_collection;
pub mod geometry;

pub use feature_collection::*;
pub use geometry::*;
