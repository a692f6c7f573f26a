//! Full structural check of an [`Octree`] against the store it indexes.
//!
//! Walks every cell reachable from the root and the whole free list. Meant for
//! tests and debugging; it allocates and is linear in the tree size.

use super::*;
use crate::scene::Slot;
use fxhash::FxHashSet;
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AuditReport {
    pub objects: usize,
    pub cells_in_tree: usize,
    pub cells_free: usize,
    pub max_depth: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditError {
    CellInPool { cell: CellId },
    CellReachedTwice { cell: CellId },
    ParentMismatch { cell: CellId },
    DepthMismatch { cell: CellId },
    BoundsMismatch { cell: CellId },
    LeafHasChildren { cell: CellId },
    CountMismatch {
        cell: CellId,
        straddling: bool,
        recorded: u32,
        actual: u32,
    },
    OwnerMismatch { object: ObjectId, cell: CellId },
    BrokenLinks { object: ObjectId },
    Misclassified { object: ObjectId, cell: CellId },
    ObjectReachedTwice { object: ObjectId },
    FreeListCorrupt { cell: CellId },
    OrphanedCells { tree: usize, free: usize, total: usize },
    LenMismatch { recorded: usize, actual: usize },
}

impl fmt::Display for AuditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditError::CellInPool { cell } => {
                write!(f, "cell {:?} is reachable from the root but marked free", cell)
            }
            AuditError::CellReachedTwice { cell } => {
                write!(f, "cell {:?} is reachable through two parents", cell)
            }
            AuditError::ParentMismatch { cell } => {
                write!(f, "cell {:?} does not point back at the parent holding it", cell)
            }
            AuditError::DepthMismatch { cell } => {
                write!(f, "cell {:?} depth is not its parent's depth plus one", cell)
            }
            AuditError::BoundsMismatch { cell } => {
                write!(f, "cell {:?} bounds are not its octant of the parent", cell)
            }
            AuditError::LeafHasChildren { cell } => {
                write!(f, "leaf cell {:?} has children", cell)
            }
            AuditError::CountMismatch {
                cell,
                straddling,
                recorded,
                actual,
            } => {
                write!(
                    f,
                    "cell {:?} {} count is {} but the bucket holds {}",
                    cell,
                    if *straddling { "straddling" } else { "pending" },
                    recorded,
                    actual
                )
            }
            AuditError::OwnerMismatch { object, cell } => {
                write!(f, "object {:?} in cell {:?} carries a different owner tag", object, cell)
            }
            AuditError::BrokenLinks { object } => {
                write!(f, "object {:?} has inconsistent list links", object)
            }
            AuditError::Misclassified { object, cell } => {
                write!(f, "object {:?} does not belong in its bucket of cell {:?}", object, cell)
            }
            AuditError::ObjectReachedTwice { object } => {
                write!(f, "object {:?} is linked into more than one bucket", object)
            }
            AuditError::FreeListCorrupt { cell } => {
                write!(f, "free list is corrupt at cell {:?}", cell)
            }
            AuditError::OrphanedCells { tree, free, total } => {
                write!(
                    f,
                    "cells are neither in the tree nor free (tree: {}, free: {}, total: {})",
                    tree, free, total
                )
            }
            AuditError::LenMismatch { recorded, actual } => {
                write!(f, "octree records {} objects but holds {}", recorded, actual)
            }
        }
    }
}

impl std::error::Error for AuditError {}

impl Octree {
    pub fn audit<S: ObjectStore + ?Sized>(&self, store: &S) -> Result<AuditReport, AuditError> {
        let mut report = AuditReport::default();
        let mut cells_seen = FxHashSet::default();
        let mut objects_seen = FxHashSet::default();
        let mut stack = CellStack::new();
        stack.push(CellId::ROOT);

        while let Some(cell_id) = stack.pop() {
            if !cells_seen.insert(cell_id) {
                return Err(AuditError::CellReachedTwice { cell: cell_id });
            }
            let cell = &self.pool[cell_id];
            if !cell.is_in_tree() {
                return Err(AuditError::CellInPool { cell: cell_id });
            }
            if cell.mid != cell.bounds.mid() {
                return Err(AuditError::BoundsMismatch { cell: cell_id });
            }
            report.cells_in_tree += 1;
            report.max_depth = report.max_depth.max(cell.depth);

            let straddling = cell.straddling.iter(store);
            let actual = self.audit_bucket(store, cell_id, straddling, true, &mut objects_seen)?;
            if actual != cell.straddling_count {
                return Err(AuditError::CountMismatch {
                    cell: cell_id,
                    straddling: true,
                    recorded: cell.straddling_count,
                    actual,
                });
            }
            report.objects += actual as usize;

            if let CellState::Leaf { pending, count } = cell.state {
                if cell.children().next().is_some() {
                    return Err(AuditError::LeafHasChildren { cell: cell_id });
                }
                let actual = self.audit_bucket(
                    store,
                    cell_id,
                    pending.iter(store),
                    false,
                    &mut objects_seen,
                )?;
                if actual != count {
                    return Err(AuditError::CountMismatch {
                        cell: cell_id,
                        straddling: false,
                        recorded: count,
                        actual,
                    });
                }
                report.objects += actual as usize;
            }

            for (octant, child_id) in cell.children() {
                let child = &self.pool[child_id];
                if child.parent() != Some(cell_id) {
                    return Err(AuditError::ParentMismatch { cell: child_id });
                }
                if child.depth != cell.depth + 1 {
                    return Err(AuditError::DepthMismatch { cell: child_id });
                }
                if child.bounds != child_bounds(&cell.bounds, &cell.mid, octant) {
                    return Err(AuditError::BoundsMismatch { cell: child_id });
                }
                stack.push(child_id);
            }
        }

        let mut next = self.pool.free_head();
        while let Some(cell_id) = next {
            if cells_seen.contains(&cell_id) || report.cells_free >= self.pool.total() {
                return Err(AuditError::FreeListCorrupt { cell: cell_id });
            }
            next = match self.pool[cell_id].link {
                CellLink::InPool { next_free } => next_free,
                CellLink::InTree { .. } => {
                    return Err(AuditError::FreeListCorrupt { cell: cell_id })
                }
            };
            cells_seen.insert(cell_id);
            report.cells_free += 1;
        }
        if report.cells_free != self.pool.free_len()
            || report.cells_free + report.cells_in_tree != self.pool.total()
        {
            return Err(AuditError::OrphanedCells {
                tree: report.cells_in_tree,
                free: report.cells_free,
                total: self.pool.total(),
            });
        }

        if report.objects != self.len {
            return Err(AuditError::LenMismatch {
                recorded: self.len,
                actual: report.objects,
            });
        }
        Ok(report)
    }

    /// Checks one bucket's links, tags and classification; returns its length.
    fn audit_bucket<S: ObjectStore + ?Sized>(
        &self,
        store: &S,
        cell_id: CellId,
        bucket: BucketIter<'_, S>,
        straddling: bool,
        objects_seen: &mut FxHashSet<ObjectId>,
    ) -> Result<u32, AuditError> {
        let cell = &self.pool[cell_id];
        let mut len = 0u32;
        for object in bucket {
            if !objects_seen.insert(object) {
                return Err(AuditError::ObjectReachedTwice { object });
            }
            let links = store.links(object);
            if store.links(links.next).prev != object || store.links(links.prev).next != object {
                return Err(AuditError::BrokenLinks { object });
            }
            let owner = match links.owner {
                Some(owner) if owner.cell == cell_id => owner,
                _ => return Err(AuditError::OwnerMismatch { object, cell: cell_id }),
            };
            let classified = classify_aabb(&cell.mid, &store.aabb(object));
            let consistent = match (owner.slot, straddling) {
                (Slot::Straddling, true) => classified.is_none(),
                (Slot::Pending(octant), false) => classified == Some(octant),
                _ => return Err(AuditError::OwnerMismatch { object, cell: cell_id }),
            };
            if !consistent {
                return Err(AuditError::Misclassified { object, cell: cell_id });
            }
            len += 1;
        }
        Ok(len)
    }
}
