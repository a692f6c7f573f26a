/// Counters accumulated by `add`/`remove` since the last
/// [`Octree::take_stats`](super::Octree::take_stats).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MaintenanceStats {
    pub splits: u64,
    pub merges: u64,
    pub cells_taken: u64,
    pub cells_returned: u64,
    /// Deepest cell materialized.
    pub max_depth: u32,
}
