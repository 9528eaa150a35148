pub mod options;
pub mod overlay;
pub mod popup;
pub mod symbology;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod widget;

pub use options::*;
pub use overlay::*;
pub use symbology::*;
pub use widget::*;
