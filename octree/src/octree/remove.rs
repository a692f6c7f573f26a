use super::*;
use crate::scene::Slot;

impl Octree {
    /// Unlinks a tracked object and collapses its cell's parent when the
    /// parent's children have become too sparse.
    ///
    /// # Panics
    ///
    /// If `id` is not tracked.
    pub fn remove<S: ObjectStore + ?Sized>(&mut self, store: &mut S, id: ObjectId) {
        let owner = match store.links(id).owner {
            Some(owner) => owner,
            None => panic!("remove: object {:?} is not tracked", id),
        };

        let cell = &mut self.pool[owner.cell];
        match owner.slot {
            Slot::Straddling => {
                cell.straddling.unlink(store, id);
                cell.straddling_count -= 1;
            }
            Slot::Pending(_) => match &mut cell.state {
                CellState::Leaf { pending, count } => {
                    pending.unlink(store, id);
                    *count -= 1;
                }
                CellState::Internal => panic!(
                    "remove: object {:?} is tagged pending in internal cell {:?}",
                    id, owner.cell
                ),
            },
        }
        self.len -= 1;

        if let Some(parent) = self.pool[owner.cell].parent() {
            if self.should_merge(parent) {
                self.merge(store, parent);
            }
        }
    }
}
