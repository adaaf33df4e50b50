//! The 12-ary prefix tries that back a [`crate::registry::Registry`].
//!
//! Two flavors share the same node shape (children array + parent
//! back-reference) but carry different payloads and are kept as distinct
//! types rather than one runtime-tagged union: a
//! [`ForwardNode`] carries at most one owned image string plus the
//! back-link into the reverse trie; a [`ReverseNode`] carries a
//! [`DList`] of source keys. The two id spaces (`FNodeId`, `RNodeId`)
//! are kept statically distinct so a caller cannot pass a reverse handle
//! where a forward handle is expected.

use crate::dlist::{DList, ListHandle};
use crate::symbol::{Number, ALPHABET_LEN};

/// A slot-reusing arena, addressed by an integer id rather than a raw
/// pointer: this keeps the forward-trie/reverse-trie cross-links
/// (`BackLink`) acyclic at the storage level, with no unsafe code or
/// reference-counting needed. Single-threaded, non-generational: no
/// lock-free bookkeeping, since the registry has no concurrent-mutation
/// feature to serve.
struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<u32>,
}

impl<T> Arena<T> {
    fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    fn alloc(&mut self, value: T) -> u32 {
        if let Some(idx) = self.free.pop() {
            self.slots[idx as usize] = Some(value);
            idx
        } else {
            self.slots.push(Some(value));
            (self.slots.len() - 1) as u32
        }
    }

    fn get(&self, idx: u32) -> &T {
        self.slots[idx as usize].as_ref().expect("live trie node")
    }

    fn get_mut(&mut self, idx: u32) -> &mut T {
        self.slots[idx as usize].as_mut().expect("live trie node")
    }

    fn free(&mut self, idx: u32) {
        self.slots[idx as usize] = None;
        self.free.push(idx);
    }
}

/// A back-reference from a forward-trie node with a payload to the
/// reverse-trie node and list entry that record the same rule.
#[derive(Clone, Copy)]
pub(crate) struct BackLink {
    pub reverse_node: RNodeId,
    pub handle: ListHandle,
}

pub(crate) struct ForwardNode {
    children: [Option<u32>; ALPHABET_LEN],
    parent: Option<u32>,
    payload: Option<String>,
    back_link: Option<BackLink>,
}

impl ForwardNode {
    fn new(parent: Option<u32>) -> Self {
        Self {
            children: [None; ALPHABET_LEN],
            parent,
            payload: None,
            back_link: None,
        }
    }

    fn is_live(&self) -> bool {
        self.payload.is_some() || self.children.iter().any(Option::is_some)
    }
}

pub(crate) struct ReverseNode {
    children: [Option<u32>; ALPHABET_LEN],
    parent: Option<u32>,
    sources: DList,
}

impl ReverseNode {
    fn new(parent: Option<u32>) -> Self {
        Self {
            children: [None; ALPHABET_LEN],
            parent,
            sources: DList::new(),
        }
    }

    fn is_live(&self) -> bool {
        !self.sources.is_empty() || self.children.iter().any(Option::is_some)
    }
}

/// A handle to a node in a [`ForwardTrie`]. Stable for the node's
/// lifetime; never meaningful against a [`ReverseTrie`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FNodeId(u32);

/// A handle to a node in a [`ReverseTrie`]. Stable for the node's
/// lifetime; never meaningful against a [`ForwardTrie`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RNodeId(u32);

/// The forward-trie: keyed by rule sources, payload is the rule's image.
pub(crate) struct ForwardTrie {
    arena: Arena<ForwardNode>,
    root: u32,
}

impl ForwardTrie {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.alloc(ForwardNode::new(None));
        Self { arena, root }
    }

    pub fn root(&self) -> FNodeId {
        FNodeId(self.root)
    }

    /// Walks from the root, creating any missing nodes, and returns the
    /// terminal node. Node allocation itself cannot fail in safe Rust
    /// without nightly fallible-`Box` support (see `DESIGN.md`); the
    /// payload written at the terminal is a separate, fallible step.
    pub fn insert_path(&mut self, num: &Number) -> FNodeId {
        let mut cur = self.root;
        for idx in num.indices() {
            cur = match self.arena.get(cur).children[idx] {
                Some(child) => child,
                None => {
                    let child = self.arena.alloc(ForwardNode::new(Some(cur)));
                    self.arena.get_mut(cur).children[idx] = Some(child);
                    child
                }
            };
        }
        FNodeId(cur)
    }

    /// The terminal node of `num`'s full path, if every symbol along it
    /// already has a child — independent of whether that node carries a
    /// payload.
    pub fn find_path(&self, num: &Number) -> Option<FNodeId> {
        let mut cur = self.root;
        for idx in num.indices() {
            cur = self.arena.get(cur).children[idx]?;
        }
        Some(FNodeId(cur))
    }

    /// The longest prefix of `num` that ends at a node with a payload
    /// set, together with the depth (prefix length) reached.
    pub fn longest_prefix_match(&self, num: &Number) -> Option<(FNodeId, usize)> {
        let mut cur = self.root;
        let mut best = None;
        for (depth, idx) in num.indices().enumerate() {
            match self.arena.get(cur).children[idx] {
                Some(child) => {
                    cur = child;
                    if self.arena.get(cur).payload.is_some() {
                        best = Some((FNodeId(cur), depth + 1));
                    }
                }
                None => break,
            }
        }
        best
    }

    pub fn payload(&self, node: FNodeId) -> Option<&str> {
        self.arena.get(node.0).payload.as_deref()
    }

    pub fn back_link(&self, node: FNodeId) -> Option<BackLink> {
        self.arena.get(node.0).back_link
    }

    pub fn has_payload(&self, node: FNodeId) -> bool {
        self.arena.get(node.0).payload.is_some()
    }

    /// Writes the payload and back-link of a node that is known to have
    /// no payload set (the caller must have cleared any previous rule
    /// first).
    pub fn set_payload(&mut self, node: FNodeId, image: String, back_link: BackLink) {
        let n = self.arena.get_mut(node.0);
        debug_assert!(n.payload.is_none() && n.back_link.is_none());
        n.payload = Some(image);
        n.back_link = Some(back_link);
    }

    /// Clears a node's payload and back-link without freeing the node
    /// itself.
    pub fn clear_payload(&mut self, node: FNodeId) -> Option<(String, BackLink)> {
        let n = self.arena.get_mut(node.0);
        let image = n.payload.take();
        let back_link = n.back_link.take();
        image.zip(back_link)
    }

    /// Starting at `node`, detaches and frees every node that is
    /// non-root, payload-less, and childless, continuing at the parent.
    /// Stops at the first live ancestor or at the root.
    pub fn prune_dead_path(&mut self, node: FNodeId) {
        let mut cur = node.0;
        loop {
            if cur == self.root || self.arena.get(cur).is_live() {
                break;
            }
            let parent = self.arena.get(cur).parent.expect("non-root has a parent");
            let slot = self
                .arena
                .get_mut(parent)
                .children
                .iter_mut()
                .find(|c| **c == Some(cur))
                .expect("parent links back to its child");
            *slot = None;
            self.arena.free(cur);
            cur = parent;
        }
    }

    /// Detaches `child` from `parent` at the slot for `symbol`, without
    /// freeing anything.
    pub fn detach_child(&mut self, parent: FNodeId, symbol: usize) {
        self.arena.get_mut(parent.0).children[symbol] = None;
    }

    pub fn child(&self, node: FNodeId, symbol: usize) -> Option<FNodeId> {
        self.arena.get(node.0).children[symbol].map(FNodeId)
    }

    pub fn parent(&self, node: FNodeId) -> Option<FNodeId> {
        self.arena.get(node.0).parent.map(FNodeId)
    }

    /// Recursively frees every node of the subtree rooted at `root`
    /// (iteratively, since rule chains can be long), invoking
    /// `on_payload` for every visited node that still has a payload set,
    /// before that node is freed. The forward payload-clearing hook
    /// itself needs mutable access to the *reverse* trie, so it is
    /// supplied by the caller rather than owned here.
    pub fn delete_subtree(&mut self, root: FNodeId, mut on_payload: impl FnMut(&mut Self, FNodeId)) {
        let mut stack = vec![root.0];
        while let Some(idx) = stack.pop() {
            if self.arena.get(idx).payload.is_some() {
                on_payload(self, FNodeId(idx));
            }
            stack.extend(self.arena.get(idx).children.iter().flatten().copied());
            self.arena.free(idx);
        }
    }
}

/// The reverse-trie: keyed by rule images, payload is the list of
/// source keys whose rule maps to this path.
pub(crate) struct ReverseTrie {
    arena: Arena<ReverseNode>,
    root: u32,
}

impl ReverseTrie {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.alloc(ReverseNode::new(None));
        Self { arena, root }
    }

    pub fn insert_path(&mut self, num: &Number) -> RNodeId {
        let mut cur = self.root;
        for idx in num.indices() {
            cur = match self.arena.get(cur).children[idx] {
                Some(child) => child,
                None => {
                    let child = self.arena.alloc(ReverseNode::new(Some(cur)));
                    self.arena.get_mut(cur).children[idx] = Some(child);
                    child
                }
            };
        }
        RNodeId(cur)
    }

    pub fn push_front(
        &mut self,
        node: RNodeId,
        source: &str,
    ) -> Result<ListHandle, crate::error::RegistryError> {
        self.arena.get_mut(node.0).sources.push_front(source)
    }

    pub fn unlink(&mut self, node: RNodeId, handle: ListHandle) {
        self.arena.get_mut(node.0).sources.unlink(handle);
    }

    pub fn prune_dead_path(&mut self, node: RNodeId) {
        let mut cur = node.0;
        loop {
            if cur == self.root || self.arena.get(cur).is_live() {
                break;
            }
            let parent = self.arena.get(cur).parent.expect("non-root has a parent");
            let slot = self
                .arena
                .get_mut(parent)
                .children
                .iter_mut()
                .find(|c| **c == Some(cur))
                .expect("parent links back to its child");
            *slot = None;
            self.arena.free(cur);
            cur = parent;
        }
    }

    /// Walks the reverse-trie along `num`'s symbols, collecting, at every
    /// visited node (including the root), every source-list entry as a
    /// candidate `source · num[depth..]` where `depth` is the number of
    /// symbols matched so far.
    pub fn collect_candidates(&self, num: &Number) -> Vec<String> {
        let mut candidates = Vec::new();
        let text = num.as_str();
        let mut cur = self.root;
        self.push_sources(cur, text, 0, &mut candidates);
        for (depth, idx) in num.indices().enumerate() {
            match self.arena.get(cur).children[idx] {
                Some(child) => {
                    cur = child;
                    self.push_sources(cur, text, depth + 1, &mut candidates);
                }
                None => break,
            }
        }
        candidates
    }

    fn push_sources(&self, node: u32, query: &str, depth: usize, out: &mut Vec<String>) {
        for source in self.arena.get(node).sources.iter() {
            let mut candidate = String::with_capacity(source.len() + query.len() - depth);
            candidate.push_str(source);
            candidate.push_str(&query[depth..]);
            out.push(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(s: &str) -> Number {
        Number::parse(s).unwrap()
    }

    #[test]
    fn insert_path_reuses_shared_prefixes() {
        let mut trie = ForwardTrie::new();
        let a = trie.insert_path(&n("12"));
        let b = trie.insert_path(&n("123"));
        assert_eq!(trie.parent(b), Some(trie.find_path(&n("12")).unwrap()));
        assert_ne!(a, b);
    }

    #[test]
    fn prune_dead_path_stops_at_live_ancestor() {
        let mut trie = ForwardTrie::new();
        let shallow = trie.insert_path(&n("1"));
        trie.set_payload(
            shallow,
            "x".to_owned(),
            BackLink {
                reverse_node: RNodeId(0),
                handle: crate::dlist::ListHandle::for_test(0),
            },
        );
        let deep = trie.insert_path(&n("12"));
        trie.prune_dead_path(deep);
        // "1" is still live (has a payload), so it must survive.
        assert!(trie.find_path(&n("1")).is_some());
        assert!(trie.child(trie.find_path(&n("1")).unwrap(), 2).is_none());
    }
}
