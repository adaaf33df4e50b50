//! The result type handed back across the public API boundary: an owned,
//! indexable, sized collection rather than a borrow into the trie.

/// A sized, indexable sequence of phone numbers returned by `Registry::get`,
/// `Registry::reverse`, and `Registry::get_reverse`.
///
/// Rust's `Drop` already frees the owned strings deterministically when a
/// `PhoneNumbers` goes out of scope, so there is no explicit `dispose`
/// method.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PhoneNumbers(Vec<String>);

impl PhoneNumbers {
    pub(crate) fn empty() -> Self {
        Self(Vec::new())
    }

    pub(crate) fn single(number: String) -> Self {
        Self(vec![number])
    }

    pub(crate) fn from_sorted_deduped(numbers: Vec<String>) -> Self {
        Self(numbers)
    }

    /// Number of entries.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The entry at `idx`, or `None` if `idx >= size()`.
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.0.get(idx).map(String::as_str)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl IntoIterator for PhoneNumbers {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PhoneNumbers {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
