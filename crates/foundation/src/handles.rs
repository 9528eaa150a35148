/// Handle to one feature drawn by the map widget.
///
/// Handles are issued by the widget; the engine only stores and hands them back.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeatureHandle(pub u64);

/// Handle to a feature group (overlay) inside the map widget.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupId(pub u32);

/// Auxiliary positioned controls the engine may add to the map.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ControlId {
    Legend,
}
