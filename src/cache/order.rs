//! Order List Module
//!
//! Arena-backed doubly-linked list used to track insertion or recency order.
//!
//! Nodes live in a `Vec` of slots and link to each other by [`SlotId`], so a
//! handle stays valid until its node is removed. Freed slots are recycled.
//!
//! ```text
//!   head ─► [id_2] ◄──► [id_0] ◄──► [id_1] ◄── tail
//! ```

// == Slot Id ==
/// Stable handle to a node in an [`OrderList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

impl SlotId {
    /// Returns the raw slot index.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

// == Order List ==
/// Doubly-linked list with O(1) push, pop, remove and move at both ends.
#[derive(Debug)]
pub struct OrderList<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
}

impl<T> OrderList<T> {
    // == Constructor ==
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    // == Length ==
    /// Returns the number of linked nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Accessors ==
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.node(id).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .map(|node| &mut node.value)
    }

    /// Returns the value at the head of the list.
    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|id| self.get(id))
    }

    /// Returns the value at the tail of the list.
    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.get(id))
    }

    // == Push ==
    /// Links a new node at the head and returns its handle.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.allocate(value);
        self.attach_front(id);
        id
    }

    /// Links a new node at the tail and returns its handle.
    pub fn push_back(&mut self, value: T) -> SlotId {
        let id = self.allocate(value);
        self.attach_back(id);
        id
    }

    // == Pop ==
    /// Unlinks and returns the head value.
    pub fn pop_front(&mut self) -> Option<T> {
        let id = self.head?;
        self.remove(id)
    }

    /// Unlinks and returns the tail value.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.tail?;
        self.remove(id)
    }

    // == Remove ==
    /// Unlinks the node and frees its slot for reuse.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.detach(id)?;
        let node = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(node.value)
    }

    // == Move ==
    /// Moves an existing node to the head. Returns false for stale handles.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if self.head == Some(id) {
            return self.node(id).is_some();
        }
        if self.detach(id).is_none() {
            return false;
        }
        self.attach_front(id);
        true
    }

    /// Moves an existing node to the tail. Returns false for stale handles.
    pub fn move_to_back(&mut self, id: SlotId) -> bool {
        if self.tail == Some(id) {
            return self.node(id).is_some();
        }
        if self.detach(id).is_none() {
            return false;
        }
        self.attach_back(id);
        true
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    // == Iteration ==
    /// Iterates values from head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    // == Internals ==
    fn node(&self, id: SlotId) -> Option<&Node<T>> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: SlotId) -> Option<&mut Node<T>> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    fn allocate(&mut self, value: T) -> SlotId {
        let node = Some(Node {
            value,
            prev: None,
            next: None,
        });
        self.len += 1;
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = node;
                SlotId(index)
            }
            None => {
                self.slots.push(node);
                SlotId(self.slots.len() - 1)
            }
        }
    }

    fn detach(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.node(id)?;
            (node.prev, node.next)
        };

        match prev {
            Some(prev_id) => {
                if let Some(prev_node) = self.node_mut(prev_id) {
                    prev_node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_id) => {
                if let Some(next_node) = self.node_mut(next_id) {
                    next_node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(node) = self.node_mut(id) {
            node.prev = None;
            node.next = None;
        }
        Some(())
    }

    fn attach_front(&mut self, id: SlotId) {
        let old_head = self.head;
        if let Some(node) = self.node_mut(id) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(head_id) => {
                if let Some(head_node) = self.node_mut(head_id) {
                    head_node.prev = Some(id);
                }
            }
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    fn attach_back(&mut self, id: SlotId) {
        let old_tail = self.tail;
        if let Some(node) = self.node_mut(id) {
            node.next = None;
            node.prev = old_tail;
        }
        match old_tail {
            Some(tail_id) => {
                if let Some(tail_node) = self.node_mut(tail_id) {
                    tail_node.next = Some(id);
                }
            }
            None => self.head = Some(id),
        }
        self.tail = Some(id);
    }

    /// Walks the list both ways and checks links and length agree.
    #[cfg(test)]
    pub(crate) fn debug_validate_invariants(&self) {
        let forward: Vec<SlotId> = {
            let mut ids = Vec::new();
            let mut cursor = self.head;
            while let Some(id) = cursor {
                ids.push(id);
                cursor = self.node(id).and_then(|node| node.next);
            }
            ids
        };
        let mut backward: Vec<SlotId> = {
            let mut ids = Vec::new();
            let mut cursor = self.tail;
            while let Some(id) = cursor {
                ids.push(id);
                cursor = self.node(id).and_then(|node| node.prev);
            }
            ids
        };
        backward.reverse();

        assert_eq!(forward.len(), self.len);
        assert_eq!(forward, backward);
        assert_eq!(self.slots.iter().filter(|slot| slot.is_some()).count(), self.len);
    }
}

impl<T> Default for OrderList<T> {
    fn default() -> Self {
        Self::new()
    }
}

// == Iterator ==
/// Head-to-tail iterator over an [`OrderList`].
pub struct Iter<'a, T> {
    list: &'a OrderList<T>,
    cursor: Option<SlotId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.list.node(id)?;
        self.cursor = node.next;
        Some(&node.value)
    }
}
