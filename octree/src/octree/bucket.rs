//! Circular doubly linked object lists threaded through [`ObjectLinks`].
//!
//! A bucket only stores its head. Links live on the objects, so pushing,
//! unlinking and popping are O(1) and allocation free.
//!
//! [`ObjectLinks`]: crate::scene::ObjectLinks

use crate::scene::{ObjectId, ObjectStore, Owner};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bucket {
    head: Option<ObjectId>,
}

impl Bucket {
    pub const fn new() -> Self {
        Self { head: None }
    }

    #[inline(always)]
    pub fn head(&self) -> Option<ObjectId> {
        self.head
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn iter<'a, S: ObjectStore + ?Sized>(&self, store: &'a S) -> BucketIter<'a, S> {
        BucketIter {
            store,
            head: self.head,
            next: self.head,
        }
    }

    /// Appends a detached object and tags it with `owner`.
    pub(crate) fn push<S: ObjectStore + ?Sized>(&mut self, store: &mut S, id: ObjectId, owner: Owner) {
        assert!(
            store.links(id).is_detached(id),
            "bucket push: object {:?} is already linked",
            id
        );
        match self.head {
            None => self.head = Some(id),
            Some(head) => {
                let tail = store.links(head).prev;
                store.links_mut(tail).next = id;
                store.links_mut(head).prev = id;
                let links = store.links_mut(id);
                links.prev = tail;
                links.next = head;
            }
        }
        store.links_mut(id).owner = Some(owner);
    }

    /// Splices `id` out and leaves it a detached singleton.
    pub(crate) fn unlink<S: ObjectStore + ?Sized>(&mut self, store: &mut S, id: ObjectId) {
        let links = *store.links(id);
        let next = if links.next == id { None } else { Some(links.next) };
        store.links_mut(links.prev).next = links.next;
        store.links_mut(links.next).prev = links.prev;
        if self.head == Some(id) {
            self.head = next;
        }
        let links = store.links_mut(id);
        links.prev = id;
        links.next = id;
        links.owner = None;
    }

    pub(crate) fn pop<S: ObjectStore + ?Sized>(&mut self, store: &mut S) -> Option<ObjectId> {
        let head = self.head?;
        self.unlink(store, head);
        Some(head)
    }
}

pub struct BucketIter<'a, S: ObjectStore + ?Sized> {
    store: &'a S,
    head: Option<ObjectId>,
    next: Option<ObjectId>,
}

impl<'a, S: ObjectStore + ?Sized> Iterator for BucketIter<'a, S> {
    type Item = ObjectId;

    fn next(&mut self) -> Option<ObjectId> {
        let current = self.next?;
        let following = self.store.links(current).next;
        self.next = if Some(following) == self.head {
            None
        } else {
            Some(following)
        };
        Some(current)
    }
}
