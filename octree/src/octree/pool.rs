use super::{Cell, CellId, CellLink};
use common::shapes::Aabb3;
use std::ops::{Index, IndexMut};

/// Fixed arena of cells. Slot 0 is the root and never leaves the tree; every
/// other slot is either reachable from the root or chained on the free list.
#[derive(Debug)]
pub(crate) struct CellPool {
    cells: Vec<Cell>,
    free_head: Option<CellId>,
    free_len: usize,
}

impl CellPool {
    pub(crate) fn new(root_bounds: Aabb3, spare: usize) -> Self {
        let mut cells = Vec::with_capacity(spare + 1);
        let mut root = Cell::vacant(None);
        root.initialize(root_bounds, None, 0);
        cells.push(root);
        for i in 1..=spare {
            let next_free = if i < spare {
                Some(CellId(i as u32 + 1))
            } else {
                None
            };
            cells.push(Cell::vacant(next_free));
        }
        Self {
            cells,
            free_head: if spare > 0 { Some(CellId(1)) } else { None },
            free_len: spare,
        }
    }

    /// Pops a cell off the free list. The caller initializes it.
    pub(crate) fn take(&mut self) -> Option<CellId> {
        let id = self.free_head?;
        self.free_head = match self.cells[id.index()].link {
            CellLink::InPool { next_free } => next_free,
            CellLink::InTree { .. } => {
                panic!("cell pool: free list head {:?} is owned by the tree", id)
            }
        };
        self.free_len -= 1;
        Some(id)
    }

    pub(crate) fn give(&mut self, id: CellId) {
        assert!(id != CellId::ROOT, "cell pool: the root cell cannot be released");
        let cell = &mut self.cells[id.index()];
        assert!(
            cell.is_in_tree(),
            "cell pool: cell {:?} is already on the free list",
            id
        );
        cell.release(self.free_head);
        self.free_head = Some(id);
        self.free_len += 1;
    }

    #[inline(always)]
    pub(crate) fn free_len(&self) -> usize {
        self.free_len
    }

    #[inline(always)]
    pub(crate) fn free_head(&self) -> Option<CellId> {
        self.free_head
    }

    /// All slots, root included.
    #[inline(always)]
    pub(crate) fn total(&self) -> usize {
        self.cells.len()
    }
}

impl Index<CellId> for CellPool {
    type Output = Cell;

    #[inline(always)]
    fn index(&self, id: CellId) -> &Cell {
        &self.cells[id.index()]
    }
}

impl IndexMut<CellId> for CellPool {
    #[inline(always)]
    fn index_mut(&mut self, id: CellId) -> &mut Cell {
        &mut self.cells[id.index()]
    }
}
