//! Generational arena with parent/child links and upward dirty propagation.
//!
//! The scene tree (assemblies, voids, sub-assemblies) is built on top of a
//! single [`Arena<T>`] per tree. Nodes never hold raw pointers to each
//! other — only [`NodeId`]s, looked up back through the arena — so there is
//! no way to build a reference cycle that outlives a `remove`.
//!
//! Dirty tracking here is bottom-up: [`Arena::mark_dirty`] sets a node's bit
//! and walks its ancestors up to the root, stopping as soon as it finds an
//! ancestor that is already dirty (an already-dirty ancestor implies every
//! ancestor above it is dirty too, so there is nothing left to mark). A
//! subtree's derived data is safe to reuse exactly when its root is clean.

mod node_id;

pub use node_id::NodeId;

use smallvec::SmallVec;

/// Small inline capacity for child lists; most scene nodes have a handful of
/// children (subdivision cells, faces) rather than hundreds.
const INLINE_CHILDREN: usize = 4;

struct Slot<T> {
    generation: u32,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; INLINE_CHILDREN]>,
    dirty: bool,
    value: T,
}

/// A generational arena of `T` values arranged into a forest.
///
/// `T` carries whatever payload a node type needs (void bounds, assembly
/// dimensions, ...); the arena owns only the tree shape and dirty state.
pub struct Arena<T> {
    slots: Vec<Option<Slot<T>>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Arena<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let alive = self.slots.iter().filter(|s| s.is_some()).count();
        f.debug_struct("Arena")
            .field("slots_total", &self.slots.len())
            .field("slots_alive", &alive)
            .field("free_list", &self.free_list.len())
            .finish()
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Insert `value` as a child of `parent` (or as a root if `None`).
    /// The new node starts dirty.
    pub fn insert(&mut self, parent: Option<NodeId>, value: T) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].wrapping_add(1);
            self.generations[idx] = generation;
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.slots.push(None);
            self.generations.push(generation);
            (self.slots.len() - 1, generation)
        };

        self.slots[idx] = Some(Slot {
            generation,
            parent,
            children: SmallVec::new(),
            dirty: true,
            value,
        });

        #[allow(clippy::cast_possible_truncation, reason = "arenas stay well under u32::MAX nodes")]
        let id = NodeId::new(idx as u32, generation);

        if let Some(p) = parent {
            if let Some(slot) = self.slot_mut(p) {
                slot.children.push(id);
            }
        }
        self.mark_dirty(id);
        id
    }

    /// Remove `id` and its entire subtree. No-op if `id` is already dangling.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.parent_of(id) {
            if let Some(slot) = self.slot_mut(parent) {
                slot.children.retain(|&c| c != id);
            }
        }
        let children: SmallVec<[NodeId; INLINE_CHILDREN]> = self
            .slot(id)
            .map(|s| s.children.clone())
            .unwrap_or_default();
        for child in children {
            self.remove(child);
        }
        self.slots[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Move `id` to a new parent (or to being a root), preserving its
    /// subtree, then mark it (and the new ancestor chain) dirty.
    pub fn reparent(&mut self, id: NodeId, new_parent: Option<NodeId>) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.parent_of(id) {
            if let Some(slot) = self.slot_mut(parent) {
                slot.children.retain(|&c| c != id);
            }
        }
        if let Some(p) = new_parent {
            if let Some(slot) = self.slot_mut(p) {
                slot.children.push(id);
            }
        }
        if let Some(slot) = self.slot_mut(id) {
            slot.parent = new_parent;
        }
        self.mark_dirty(id);
    }

    pub fn is_alive(&self, id: NodeId) -> bool {
        self.slots
            .get(id.idx())
            .and_then(|s| s.as_ref())
            .map(|s| s.generation == id.generation())
            .unwrap_or(false)
    }

    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.slot(id).map(|s| &s.value)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.slot_mut(id).map(|s| &mut s.value)
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.slot(id).and_then(|s| s.parent)
    }

    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.slot(id).map(|s| s.children.as_slice()).unwrap_or(&[])
    }

    /// Roots, in slot order (stable for a given insertion history, not
    /// sorted by id).
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            let s = s.as_ref()?;
            if s.parent.is_some() {
                return None;
            }
            #[allow(clippy::cast_possible_truncation, reason = "arenas stay well under u32::MAX nodes")]
            Some(NodeId::new(i as u32, s.generation))
        })
    }

    /// Mark `id` dirty and propagate the bit up through its ancestors,
    /// stopping early once an already-dirty ancestor is reached.
    pub fn mark_dirty(&mut self, id: NodeId) {
        let mut current = Some(id);
        while let Some(cur) = current {
            let Some(slot) = self.slot_mut(cur) else {
                break;
            };
            if slot.dirty {
                break;
            }
            slot.dirty = true;
            current = slot.parent;
        }
    }

    pub fn is_dirty(&self, id: NodeId) -> bool {
        self.slot(id).map(|s| s.dirty).unwrap_or(false)
    }

    /// Clear the dirty bit on `id` only (not its ancestors or descendants).
    /// Call after recomputing and caching the derived data for `id`.
    pub fn clear_dirty(&mut self, id: NodeId) {
        if let Some(slot) = self.slot_mut(id) {
            slot.dirty = false;
        }
    }

    fn slot(&self, id: NodeId) -> Option<&Slot<T>> {
        self.slots
            .get(id.idx())
            .and_then(|s| s.as_ref())
            .filter(|s| s.generation == id.generation())
    }

    fn slot_mut(&mut self, id: NodeId) -> Option<&mut Slot<T>> {
        self.slots
            .get_mut(id.idx())
            .and_then(|s| s.as_mut())
            .filter(|s| s.generation == id.generation())
    }
}

impl<T: Clone> Clone for Arena<T> {
    /// Deep clone: every slot, including free ones, to preserve `NodeId`
    /// stability across the clone. Used for preview-as-clone scene copies.
    fn clone(&self) -> Self {
        Self {
            slots: self
                .slots
                .iter()
                .map(|s| {
                    s.as_ref().map(|s| Slot {
                        generation: s.generation,
                        parent: s.parent,
                        children: s.children.clone(),
                        dirty: s.dirty,
                        value: s.value.clone(),
                    })
                })
                .collect(),
            generations: self.generations.clone(),
            free_list: self.free_list.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_root_and_child() {
        let mut arena: Arena<i32> = Arena::new();
        let root = arena.insert(None, 1);
        let child = arena.insert(Some(root), 2);
        assert_eq!(arena.children_of(root), &[child]);
        assert_eq!(arena.parent_of(child), Some(root));
        assert_eq!(arena.roots().collect::<Vec<_>>(), vec![root]);
    }

    #[test]
    fn remove_drops_subtree_and_frees_slots() {
        let mut arena: Arena<i32> = Arena::new();
        let root = arena.insert(None, 1);
        let child = arena.insert(Some(root), 2);
        let grandchild = arena.insert(Some(child), 3);
        arena.remove(child);
        assert!(!arena.is_alive(child));
        assert!(!arena.is_alive(grandchild));
        assert!(arena.is_alive(root));
        assert!(arena.children_of(root).is_empty());
    }

    #[test]
    fn generation_prevents_stale_id_aliasing() {
        let mut arena: Arena<i32> = Arena::new();
        let a = arena.insert(None, 1);
        arena.remove(a);
        let b = arena.insert(None, 2);
        assert_eq!(a.idx(), b.idx());
        assert!(!arena.is_alive(a));
        assert!(arena.is_alive(b));
        assert_eq!(arena.get(a), None);
        assert_eq!(*arena.get(b).unwrap(), 2);
    }

    #[test]
    fn mark_dirty_propagates_to_root_and_stops_early() {
        let mut arena: Arena<i32> = Arena::new();
        let root = arena.insert(None, 0);
        let mid = arena.insert(Some(root), 0);
        let leaf = arena.insert(Some(mid), 0);
        arena.clear_dirty(root);
        arena.clear_dirty(mid);
        arena.clear_dirty(leaf);

        arena.mark_dirty(leaf);
        assert!(arena.is_dirty(leaf));
        assert!(arena.is_dirty(mid));
        assert!(arena.is_dirty(root));
    }

    #[test]
    fn clear_dirty_only_affects_one_node() {
        let mut arena: Arena<i32> = Arena::new();
        let root = arena.insert(None, 0);
        let child = arena.insert(Some(root), 0);
        arena.clear_dirty(root);
        arena.clear_dirty(child);
        arena.mark_dirty(child);
        arena.clear_dirty(root);
        assert!(arena.is_dirty(child));
        assert!(!arena.is_dirty(root));
    }

    #[test]
    fn reparent_moves_child_list_membership() {
        let mut arena: Arena<i32> = Arena::new();
        let a = arena.insert(None, 0);
        let b = arena.insert(None, 0);
        let child = arena.insert(Some(a), 0);
        arena.reparent(child, Some(b));
        assert!(arena.children_of(a).is_empty());
        assert_eq!(arena.children_of(b), &[child]);
        assert_eq!(arena.parent_of(child), Some(b));
    }
}
