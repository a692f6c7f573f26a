use super::*;
use crate::scene::Slot;

impl Octree {
    /// True when `cell_id` is internal, none of its children has split, and
    /// the children hold fewer objects than the merge threshold.
    pub fn should_merge(&self, cell_id: CellId) -> bool {
        let cell = &self.pool[cell_id];
        if cell.is_leaf() {
            return false;
        }
        let mut total = 0u32;
        for (_, child_id) in cell.children() {
            let child = &self.pool[child_id];
            match child.pending_count() {
                Some(pending) => total += child.straddling_count + pending,
                None => return false,
            }
        }
        total < self.config.merge_threshold
    }

    /// Pulls every child's objects into this cell's pending bucket, tagged
    /// with the child's octant, and returns the children to the pool.
    pub(crate) fn merge<S: ObjectStore + ?Sized>(&mut self, store: &mut S, cell_id: CellId) {
        assert!(
            !self.pool[cell_id].is_leaf(),
            "merge: cell {:?} has not split",
            cell_id
        );
        let mut pending = Bucket::new();
        let mut count = 0u32;
        let mut released = 0u32;

        for octant in Octant::ALL {
            let child_id = match self.pool[cell_id].children[octant.index()].take() {
                Some(child_id) => child_id,
                None => continue,
            };
            let owner = Owner {
                cell: cell_id,
                slot: Slot::Pending(octant),
            };
            let child = &mut self.pool[child_id];
            while let Some(object) = child.straddling.pop(store) {
                pending.push(store, object, owner);
                count += 1;
            }
            child.straddling_count = 0;
            match &mut child.state {
                CellState::Leaf {
                    pending: child_pending,
                    count: child_count,
                } => {
                    while let Some(object) = child_pending.pop(store) {
                        pending.push(store, object, owner);
                        count += 1;
                    }
                    *child_count = 0;
                }
                CellState::Internal => {
                    panic!("merge: child {:?} of {:?} has split", child_id, cell_id)
                }
            }
            self.pool.give(child_id);
            self.stats.cells_returned += 1;
            released += 1;
        }

        self.pool[cell_id].state = CellState::Leaf { pending, count };
        self.stats.merges += 1;
        tracing::debug!(
            cell = ?cell_id,
            depth = self.pool[cell_id].depth,
            objects = count,
            released,
            "merged cell"
        );
    }
}
