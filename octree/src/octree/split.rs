use super::*;
use crate::scene::Slot;

impl Octree {
    /// Turns a leaf into an internal cell, pushing every pending object down
    /// into the child for its octant.
    ///
    /// Children filled past the threshold here are not split in turn; they
    /// split on the next `add` that stops in them.
    pub(crate) fn split<S: ObjectStore + ?Sized>(
        &mut self,
        store: &mut S,
        cell_id: CellId,
    ) -> OctreeResult<()> {
        let state = std::mem::replace(&mut self.pool[cell_id].state, CellState::Internal);
        let (mut pending, count) = match state {
            CellState::Leaf { pending, count } => (pending, count),
            CellState::Internal => return Ok(()),
        };

        while let Some(object) = pending.head() {
            let octant = match store.links(object).owner {
                Some(Owner {
                    slot: Slot::Pending(octant),
                    ..
                }) => octant,
                other => panic!(
                    "split: pending object {:?} of cell {:?} carries tag {:?}",
                    object, cell_id, other
                ),
            };
            pending.pop(store);

            let child = match self.pool[cell_id].child(octant) {
                Some(child) => child,
                None => self.materialize(cell_id, octant)?,
            };
            let aabb = store.aabb(object);
            self.place(store, object, &aabb, child)?;
        }

        self.stats.splits += 1;
        tracing::debug!(
            cell = ?cell_id,
            depth = self.pool[cell_id].depth,
            objects = count,
            "split cell"
        );
        Ok(())
    }
}
