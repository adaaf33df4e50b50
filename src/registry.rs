//! The top-level owner of a forward-trie and a reverse-trie, and the
//! public CRUD+query surface over them: the type a caller actually
//! holds, composing the trie module into `Add`/`Remove`/`Get`/`Reverse`/
//! `GetReverse`.

use log::{debug, trace, warn};

use crate::phone_numbers::PhoneNumbers;
use crate::symbol::{cmp_numbers, Number};
use crate::trie::{BackLink, FNodeId, ForwardTrie, ReverseTrie};

/// Owns exactly one forward-trie and one reverse-trie, and maintains the
/// cross-trie invariants that bind them: every forward rule's back-link
/// points at a live reverse-trie list entry, and vice versa.
///
/// Not safe for concurrent mutation: multiple readers are safe
/// only while no writer is active. A caller wanting concurrent access
/// supplies its own synchronization around a `Registry`.
pub struct Registry {
    forward: ForwardTrie,
    reverse: ReverseTrie,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Creates an empty registry: a bare root node in each trie.
    pub fn new() -> Self {
        Self {
            forward: ForwardTrie::new(),
            reverse: ReverseTrie::new(),
        }
    }

    /// Adds the rule `num1 -> num2`, replacing any rule previously
    /// registered at `num1`. Returns `false` without changing anything
    /// observable if the input is invalid (`num1` or `num2` is not a
    /// valid phone number, or `num1 == num2`) or if an allocation fails
    /// partway through.
    pub fn add(&mut self, num1: &str, num2: &str) -> bool {
        let (n1, n2) = match (Number::parse(num1), Number::parse(num2)) {
            (Ok(a), Ok(b)) if a != b => (a, b),
            _ => {
                warn!("add({num1:?}, {num2:?}): invalid input");
                return false;
            }
        };

        trace!("add: locating forward path for {n1}");
        let f = self.forward.insert_path(&n1);
        if self.forward.has_payload(f) {
            trace!("add: replacing existing rule at {n1}");
            self.clear_forward_payload(f);
        }

        let r = self.reverse.insert_path(&n2);
        let handle = match self.reverse.push_front(r, n1.as_str()) {
            Ok(handle) => handle,
            Err(e) => {
                warn!("add({n1}, {n2}): {e}");
                self.reverse.prune_dead_path(r);
                self.forward.prune_dead_path(f);
                return false;
            }
        };

        let mut image = String::new();
        if image.try_reserve_exact(n2.len()).is_err() {
            warn!("add({n1}, {n2}): out of memory copying the image");
            self.reverse.unlink(r, handle);
            self.reverse.prune_dead_path(r);
            self.forward.prune_dead_path(f);
            return false;
        }
        image.push_str(n2.as_str());

        self.forward.set_payload(
            f,
            image,
            BackLink {
                reverse_node: r,
                handle,
            },
        );
        debug!("add: {n1} -> {n2}");
        true
    }

    /// Deletes the entire forward-trie subtree rooted at `num` (every rule
    /// whose source has `num` as a prefix, including `num` itself), and
    /// unlinks each deleted rule from the reverse-trie. A no-op if `num`
    /// is not a valid phone number or has no rule subtree.
    pub fn remove(&mut self, num: &str) {
        let Ok(n) = Number::parse(num) else {
            debug!("remove({num:?}): not a number, no-op");
            return;
        };
        let Some(terminal) = self.forward.find_path(&n) else {
            debug!("remove({n}): no such path, no-op");
            return;
        };
        let parent = self
            .forward
            .parent(terminal)
            .expect("terminal of a non-empty Number is never the root");
        let symbol = n
            .indices()
            .last()
            .expect("Number is non-empty by construction");

        self.forward.detach_child(parent, symbol);
        let reverse = &mut self.reverse;
        self.forward.delete_subtree(terminal, |forward, node| {
            if let Some((_, back_link)) = forward.clear_payload(node) {
                reverse.unlink(back_link.reverse_node, back_link.handle);
                reverse.prune_dead_path(back_link.reverse_node);
            }
        });
        self.forward.prune_dead_path(parent);
        debug!("remove: {n}");
    }

    /// The forwarded image of `num` under the longest matching rule, or
    /// `num` itself if no prefix of it has a rule. `None` means an
    /// allocation failed while building the result, distinct from the
    /// empty result returned for invalid input.
    pub fn get(&self, num: &str) -> Option<PhoneNumbers> {
        let n = match Number::parse(num) {
            Ok(n) => n,
            Err(_) => return Some(PhoneNumbers::empty()),
        };
        match self.forward.longest_prefix_match(&n) {
            Some((node, depth)) => {
                let image = self
                    .forward
                    .payload(node)
                    .expect("longest_prefix_match only returns nodes with a payload");
                let suffix = &n.as_str()[depth..];
                let mut result = String::new();
                result.try_reserve_exact(image.len() + suffix.len()).ok()?;
                result.push_str(image);
                result.push_str(suffix);
                Some(PhoneNumbers::single(result))
            }
            None => Some(PhoneNumbers::single(n.into_string())),
        }
    }

    /// The set of numbers `x` such that some rule `(s, t)` has `t` equal
    /// to a prefix of `num`, with `x = s` followed by the remainder of
    /// `num` past that prefix; `num` itself is always included. Sorted
    /// and deduplicated under the alphabet order in `symbol`.
    pub fn reverse(&self, num: &str) -> Option<PhoneNumbers> {
        let n = match Number::parse(num) {
            Ok(n) => n,
            Err(_) => return Some(PhoneNumbers::empty()),
        };
        let candidates = self.reverse_candidates(&n)?;
        Some(PhoneNumbers::from_sorted_deduped(candidates))
    }

    /// `Reverse(num)` filtered down to the candidates `x` for which
    /// `Get(x) == num`. Order is preserved from `Reverse`.
    pub fn get_reverse(&self, num: &str) -> Option<PhoneNumbers> {
        let n = match Number::parse(num) {
            Ok(n) => n,
            Err(_) => return Some(PhoneNumbers::empty()),
        };
        let candidates = self.reverse_candidates(&n)?;
        let mut filtered = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let redirects_to_num = match self.get(&candidate) {
                Some(result) => result.get(0) == Some(n.as_str()),
                // An allocation failure while re-checking a candidate
                // drops just that candidate rather than failing the
                // whole query.
                None => false,
            };
            if redirects_to_num {
                filtered.push(candidate);
            }
        }
        Some(PhoneNumbers::from_sorted_deduped(filtered))
    }

    fn reverse_candidates(&self, n: &Number) -> Option<Vec<String>> {
        let mut candidates = self.reverse.collect_candidates(n);
        let mut own = String::new();
        own.try_reserve_exact(n.len()).ok()?;
        own.push_str(n.as_str());
        candidates.push(own);
        candidates.sort_by(|a, b| cmp_numbers(a, b));
        candidates.dedup();
        Some(candidates)
    }

    fn clear_forward_payload(&mut self, node: FNodeId) {
        if let Some((_, back_link)) = self.forward.clear_payload(node) {
            self.reverse.unlink(back_link.reverse_node, back_link.handle);
            self.reverse.prune_dead_path(back_link.reverse_node);
        }
    }
}
