//! Host-side object model.
//!
//! The octree never owns tracked objects. It reads their bounds and threads its
//! buckets through the [`ObjectLinks`] record each object carries, both reached
//! through the [`ObjectStore`] trait. [`Scene`] is a plain `Vec`-backed host
//! that is enough for tests, benches and simple users.

use crate::octree::{CellId, Octant};
use common::shapes::{Aabb3, Shape};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

impl ObjectId {
    /// # Panics
    ///
    /// If `index` does not fit a `u32`.
    pub fn from_index(index: usize) -> Self {
        assert!(
            index <= u32::MAX as usize,
            "object index {} does not fit an ObjectId",
            index
        );
        ObjectId(index as u32)
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Which bucket of its owning cell an object sits in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    Straddling,
    Pending(Octant),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Owner {
    pub cell: CellId,
    pub slot: Slot,
}

/// Circular list linkage plus owner tag. Mutated only by the octree while the
/// object is tracked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObjectLinks {
    pub(crate) prev: ObjectId,
    pub(crate) next: ObjectId,
    pub(crate) owner: Option<Owner>,
}

impl ObjectLinks {
    pub fn detached(id: ObjectId) -> Self {
        Self {
            prev: id,
            next: id,
            owner: None,
        }
    }

    pub fn prev(&self) -> ObjectId {
        self.prev
    }

    pub fn next(&self) -> ObjectId {
        self.next
    }

    pub fn owner(&self) -> Option<Owner> {
        self.owner
    }

    /// Singleton list with no owning cell.
    pub fn is_detached(&self, id: ObjectId) -> bool {
        self.owner.is_none() && self.prev == id && self.next == id
    }
}

pub trait ObjectStore {
    fn aabb(&self, id: ObjectId) -> Aabb3;
    fn links(&self, id: ObjectId) -> &ObjectLinks;
    fn links_mut(&mut self, id: ObjectId) -> &mut ObjectLinks;
}

#[derive(Clone, Debug)]
struct SceneNode {
    aabb: Aabb3,
    links: ObjectLinks,
}

#[derive(Clone, Debug, Default)]
pub struct Scene {
    nodes: Vec<SceneNode>,
}

impl Scene {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub fn spawn(&mut self, aabb: Aabb3) -> ObjectId {
        let id = ObjectId::from_index(self.nodes.len());
        self.nodes.push(SceneNode {
            aabb,
            links: ObjectLinks::detached(id),
        });
        id
    }

    pub fn spawn_shape<S: Shape>(&mut self, shape: &S) -> ObjectId {
        self.spawn(shape.bounding_box())
    }

    /// Moves a detached object. Bounds of tracked objects are frozen.
    pub fn set_aabb(&mut self, id: ObjectId, aabb: Aabb3) {
        let node = &mut self.nodes[id.index()];
        assert!(
            node.links.is_detached(id),
            "set_aabb: object {:?} is still tracked by an octree",
            id
        );
        node.aabb = aabb;
    }

    pub fn is_detached(&self, id: ObjectId) -> bool {
        self.nodes[id.index()].links.is_detached(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        (0..self.nodes.len() as u32).map(ObjectId)
    }
}

impl ObjectStore for Scene {
    #[inline(always)]
    fn aabb(&self, id: ObjectId) -> Aabb3 {
        self.nodes[id.index()].aabb
    }

    #[inline(always)]
    fn links(&self, id: ObjectId) -> &ObjectLinks {
        &self.nodes[id.index()].links
    }

    #[inline(always)]
    fn links_mut(&mut self, id: ObjectId) -> &mut ObjectLinks {
        &mut self.nodes[id.index()].links
    }
}
