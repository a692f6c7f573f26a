//! Dynamic octree over a fixed root volume.
//!
//! Objects are kept in the deepest existing cell whose octant fully contains
//! their bounds. Cells hold two buckets: objects straddling the cell's midpoint
//! stay there for good, objects that fit one octant wait in the pending bucket
//! until the cell splits. Children are materialized lazily from a fixed
//! [`CellPool`] and handed back to it on merge, so `add` and `remove` never touch
//! the allocator.

mod audit;
mod bucket;
mod cell;
mod classify;
mod config;
mod insert;
mod merge;
mod pool;
mod remove;
mod split;
mod stats;

pub use audit::{AuditError, AuditReport};
pub use bucket::{Bucket, BucketIter};
pub use cell::{Cell, CellId, CellLink, CellState};
pub use classify::{child_bounds, classify_aabb, classify_point, Octant};
pub use config::Config;
pub use stats::MaintenanceStats;

use crate::error::{OctreeError, OctreeResult};
use crate::scene::{ObjectId, ObjectStore, Owner};
use common::shapes::Aabb3;
use pool::CellPool;
use smallvec::SmallVec;

pub(crate) type CellStack = SmallVec<[CellId; 64]>;

#[derive(Debug)]
pub struct Octree {
    pool: CellPool,
    config: Config,
    len: usize,
    stats: MaintenanceStats,
}

impl Octree {
    pub fn new(bounds: Aabb3) -> OctreeResult<Self> {
        Self::new_with_config(bounds, Config::default())
    }

    pub fn new_with_config(bounds: Aabb3, config: Config) -> OctreeResult<Self> {
        if !bounds.is_valid() {
            return Err(OctreeError::InvalidBounds {
                min: bounds.min,
                max: bounds.max,
            });
        }
        config.validate()?;
        Ok(Self {
            pool: CellPool::new(bounds, config.pool_size),
            config,
            len: 0,
            stats: MaintenanceStats::default(),
        })
    }

    #[inline(always)]
    pub fn root(&self) -> CellId {
        CellId::ROOT
    }

    pub fn bounds(&self) -> Aabb3 {
        self.pool[CellId::ROOT].bounds()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cell(&self, id: CellId) -> &Cell {
        &self.pool[id]
    }

    /// Number of objects currently tracked.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Cells reachable from the root, root included.
    pub fn cells_in_use(&self) -> usize {
        self.pool.total() - self.pool.free_len()
    }

    pub fn free_cells(&self) -> usize {
        self.pool.free_len()
    }

    /// Spare cells the pool was provisioned with, root excluded.
    pub fn capacity(&self) -> usize {
        self.pool.total() - 1
    }

    pub fn owner_of<S: ObjectStore + ?Sized>(&self, store: &S, id: ObjectId) -> Option<Owner> {
        store.links(id).owner()
    }

    pub fn stats(&self) -> MaintenanceStats {
        self.stats
    }

    pub fn take_stats(&mut self) -> MaintenanceStats {
        std::mem::take(&mut self.stats)
    }

    /// Detaches every object and returns every cell but the root to the pool.
    pub fn clear<S: ObjectStore + ?Sized>(&mut self, store: &mut S) {
        let mut stack = CellStack::new();
        let mut released = CellStack::new();
        stack.push(CellId::ROOT);
        while let Some(cell_id) = stack.pop() {
            let cell = &mut self.pool[cell_id];
            while cell.straddling.pop(store).is_some() {}
            cell.straddling_count = 0;
            if let CellState::Leaf { pending, count } = &mut cell.state {
                while pending.pop(store).is_some() {}
                *count = 0;
            }
            cell.state = CellState::empty_leaf();
            for slot in cell.children.iter_mut() {
                if let Some(child) = slot.take() {
                    stack.push(child);
                    released.push(child);
                }
            }
        }
        for cell_id in released {
            self.pool.give(cell_id);
            self.stats.cells_returned += 1;
        }
        self.len = 0;
        tracing::debug!(free = self.pool.free_len(), "octree cleared");
    }

    /// Draws a cell from the pool and hangs it under `parent` at `octant`.
    pub(crate) fn materialize(&mut self, parent: CellId, octant: Octant) -> OctreeResult<CellId> {
        let (bounds, depth) = {
            let parent_cell = &self.pool[parent];
            assert!(
                parent_cell.children[octant.index()].is_none(),
                "materialize: cell {:?} already has a child at octant {:?}",
                parent,
                octant
            );
            (
                child_bounds(&parent_cell.bounds, &parent_cell.mid, octant),
                parent_cell.depth + 1,
            )
        };
        let child = self.pool.take().ok_or(OctreeError::OutOfCapacity {
            needed: 1,
            available: 0,
        })?;
        self.pool[child].initialize(bounds, Some(parent), depth);
        self.pool[parent].children[octant.index()] = Some(child);
        self.stats.cells_taken += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);
        tracing::trace!(?parent, ?child, octant = octant.code(), depth, "materialized child cell");
        Ok(child)
    }
}
