use super::{Bucket, Octant};
use common::shapes::{Aabb3, Point3};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub u32);

impl CellId {
    pub const ROOT: CellId = CellId(0);

    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Where a cell currently lives. A cell is never in both places.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellLink {
    InTree { parent: Option<CellId> },
    InPool { next_free: Option<CellId> },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    Leaf { pending: Bucket, count: u32 },
    Internal,
}

impl CellState {
    #[inline(always)]
    pub(crate) fn empty_leaf() -> Self {
        CellState::Leaf {
            pending: Bucket::new(),
            count: 0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Cell {
    pub(crate) bounds: Aabb3,
    pub(crate) mid: Point3,
    pub(crate) depth: u32,
    pub(crate) children: [Option<CellId>; 8],
    pub(crate) link: CellLink,
    pub(crate) straddling: Bucket,
    pub(crate) straddling_count: u32,
    pub(crate) state: CellState,
}

impl Cell {
    pub(crate) fn vacant(next_free: Option<CellId>) -> Self {
        Self {
            bounds: Aabb3::default(),
            mid: [0.0; 3],
            depth: 0,
            children: [None; 8],
            link: CellLink::InPool { next_free },
            straddling: Bucket::new(),
            straddling_count: 0,
            state: CellState::empty_leaf(),
        }
    }

    pub(crate) fn initialize(&mut self, bounds: Aabb3, parent: Option<CellId>, depth: u32) {
        self.bounds = bounds;
        self.mid = bounds.mid();
        self.depth = depth;
        self.children = [None; 8];
        self.link = CellLink::InTree { parent };
        self.straddling = Bucket::new();
        self.straddling_count = 0;
        self.state = CellState::empty_leaf();
    }

    /// Wipes the cell and threads it onto the free list.
    pub(crate) fn release(&mut self, next_free: Option<CellId>) {
        debug_assert!(self.straddling.is_empty() && self.pending_count().unwrap_or(0) == 0);
        *self = Self::vacant(next_free);
    }

    pub fn bounds(&self) -> Aabb3 {
        self.bounds
    }

    pub fn mid(&self) -> Point3 {
        self.mid
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn link(&self) -> CellLink {
        self.link
    }

    pub fn parent(&self) -> Option<CellId> {
        match self.link {
            CellLink::InTree { parent } => parent,
            CellLink::InPool { .. } => None,
        }
    }

    pub fn is_in_tree(&self) -> bool {
        matches!(self.link, CellLink::InTree { .. })
    }

    #[inline(always)]
    pub fn child(&self, octant: Octant) -> Option<CellId> {
        self.children[octant.index()]
    }

    pub fn children(&self) -> impl Iterator<Item = (Octant, CellId)> + '_ {
        Octant::ALL
            .into_iter()
            .filter_map(move |octant| self.child(octant).map(|child| (octant, child)))
    }

    pub fn state(&self) -> &CellState {
        &self.state
    }

    #[inline(always)]
    pub fn is_leaf(&self) -> bool {
        matches!(self.state, CellState::Leaf { .. })
    }

    pub fn straddling(&self) -> Bucket {
        self.straddling
    }

    pub fn straddling_count(&self) -> u32 {
        self.straddling_count
    }

    pub fn pending(&self) -> Option<Bucket> {
        match self.state {
            CellState::Leaf { pending, .. } => Some(pending),
            CellState::Internal => None,
        }
    }

    /// `None` once the cell has split.
    #[inline(always)]
    pub fn pending_count(&self) -> Option<u32> {
        match self.state {
            CellState::Leaf { count, .. } => Some(count),
            CellState::Internal => None,
        }
    }

    /// Objects held directly by this cell, both buckets.
    #[inline(always)]
    pub fn object_count(&self) -> u32 {
        self.straddling_count + self.pending_count().unwrap_or(0)
    }
}
