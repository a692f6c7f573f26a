use super::*;
use crate::scene::Slot;
use common::shapes::Aabb3;

/// Where a descent stops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Placement {
    Straddling(CellId),
    Pending(CellId, Octant),
    /// Internal cell missing the child the object needs.
    Materialize(CellId, Octant),
}

impl Octree {
    /// Inserts a detached object.
    ///
    /// The whole operation is planned before anything is mutated, so an
    /// `OutOfCapacity` failure leaves both the tree and the object untouched.
    ///
    /// # Panics
    ///
    /// If `id` is already linked into a bucket.
    pub fn add<S: ObjectStore + ?Sized>(&mut self, store: &mut S, id: ObjectId) -> OctreeResult<()> {
        assert!(
            store.links(id).is_detached(id),
            "add: object {:?} is already tracked",
            id
        );
        let aabb = store.aabb(id);
        if !aabb.is_valid() {
            return Err(OctreeError::InvalidAabb {
                min: aabb.min,
                max: aabb.max,
            });
        }

        let needed = self.cells_needed(store, &aabb);
        let available = self.pool.free_len();
        if needed > available {
            tracing::warn!(?id, needed, available, "add rejected, cell pool exhausted");
            return Err(OctreeError::OutOfCapacity { needed, available });
        }

        let cell = self.place(store, id, &aabb, CellId::ROOT)?;
        self.len += 1;
        if self.should_split(cell) {
            self.split(store, cell)?;
        }
        Ok(())
    }

    pub(crate) fn descend(&self, start: CellId, aabb: &Aabb3) -> Placement {
        let mut cell_id = start;
        loop {
            let cell = &self.pool[cell_id];
            let octant = match classify_aabb(&cell.mid, aabb) {
                Some(octant) => octant,
                None => return Placement::Straddling(cell_id),
            };
            match cell.child(octant) {
                Some(child) => cell_id = child,
                None if cell.is_leaf() => return Placement::Pending(cell_id, octant),
                None => return Placement::Materialize(cell_id, octant),
            }
        }
    }

    /// Descends from `start`, materializing a missing child of an internal
    /// cell on the way, and links the object into the cell it stops at.
    pub(crate) fn place<S: ObjectStore + ?Sized>(
        &mut self,
        store: &mut S,
        id: ObjectId,
        aabb: &Aabb3,
        start: CellId,
    ) -> OctreeResult<CellId> {
        let mut start = start;
        loop {
            match self.descend(start, aabb) {
                Placement::Straddling(cell_id) => {
                    let cell = &mut self.pool[cell_id];
                    let owner = Owner {
                        cell: cell_id,
                        slot: Slot::Straddling,
                    };
                    cell.straddling.push(store, id, owner);
                    cell.straddling_count += 1;
                    return Ok(cell_id);
                }
                Placement::Pending(cell_id, octant) => {
                    let owner = Owner {
                        cell: cell_id,
                        slot: Slot::Pending(octant),
                    };
                    match &mut self.pool[cell_id].state {
                        CellState::Leaf { pending, count } => {
                            pending.push(store, id, owner);
                            *count += 1;
                        }
                        CellState::Internal => {
                            unreachable!("descent stopped on internal cell {:?}", cell_id)
                        }
                    }
                    return Ok(cell_id);
                }
                Placement::Materialize(cell_id, octant) => {
                    start = self.materialize(cell_id, octant)?;
                }
            }
        }
    }

    #[inline(always)]
    fn depth_allows_split(&self, depth: u32) -> bool {
        self.config.max_depth.map_or(true, |max| depth < max)
    }

    pub(crate) fn should_split(&self, cell_id: CellId) -> bool {
        let cell = &self.pool[cell_id];
        match cell.state {
            CellState::Leaf { count, .. } => {
                count >= self.config.split_threshold && self.depth_allows_split(cell.depth)
            }
            CellState::Internal => false,
        }
    }

    /// Cells an `add` of `aabb` draws from the pool, split included.
    fn cells_needed<S: ObjectStore + ?Sized>(&self, store: &S, aabb: &Aabb3) -> usize {
        match self.descend(CellId::ROOT, aabb) {
            Placement::Straddling(cell_id) => self.split_cost(store, cell_id, None),
            Placement::Pending(cell_id, octant) => self.split_cost(store, cell_id, Some(octant)),
            Placement::Materialize(cell_id, octant) => {
                // The fresh child is an empty leaf; it can only split when the
                // threshold is one.
                let parent = &self.pool[cell_id];
                let bounds = child_bounds(&parent.bounds, &parent.mid, octant);
                let lands_pending = classify_aabb(&bounds.mid(), aabb).is_some();
                let splits = lands_pending
                    && self.config.split_threshold <= 1
                    && self.depth_allows_split(parent.depth + 1);
                1 + splits as usize
            }
        }
    }

    /// Children a split of `cell_id` would materialize once the incoming
    /// object (pending under `incoming`, or straddling when `None`) lands.
    fn split_cost<S: ObjectStore + ?Sized>(
        &self,
        store: &S,
        cell_id: CellId,
        incoming: Option<Octant>,
    ) -> usize {
        let cell = &self.pool[cell_id];
        let (pending, count) = match cell.state {
            CellState::Leaf { pending, count } => (pending, count),
            CellState::Internal => return 0,
        };
        let count = count + incoming.is_some() as u32;
        if count < self.config.split_threshold || !self.depth_allows_split(cell.depth) {
            return 0;
        }
        let mut mask = incoming.map_or(0u8, |octant| 1 << octant.code());
        for object in pending.iter(store) {
            if let Some(Owner {
                slot: Slot::Pending(octant),
                ..
            }) = store.links(object).owner
            {
                mask |= 1 << octant.code();
            }
        }
        Octant::ALL
            .into_iter()
            .filter(|&octant| mask & (1 << octant.code()) != 0 && cell.child(octant).is_none())
            .count()
    }
}
