//! Per-render selection state.

use crate::template::AreaId;
use std::collections::HashSet;

/// Set of highlighted area ids.
///
/// Transient UI state: callers rebuild it whenever their selection changes
/// and hand it to each render call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: HashSet<AreaId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<AreaId>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Returns `true` if the id was newly inserted.
    pub fn insert(&mut self, id: impl Into<AreaId>) -> bool {
        self.ids.insert(id.into())
    }

    /// Returns `true` if the id was present.
    pub fn remove(&mut self, id: &str) -> bool {
        self.ids.remove(id)
    }

    /// Flip membership and return whether the id is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl<S: Into<AreaId>> FromIterator<S> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_ids(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut selection = SelectionSet::new();
        assert!(selection.toggle("a"));
        assert!(selection.contains("a"));
        assert!(!selection.toggle("a"));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_from_ids_dedups() {
        let selection: SelectionSet = ["a", "b", "a"].into_iter().collect();
        assert_eq!(selection.len(), 2);
        assert!(selection.contains("b"));
        assert!(!selection.contains("c"));
    }

    #[test]
    fn test_insert_remove_clear() {
        let mut selection = SelectionSet::new();
        assert!(selection.insert("x"));
        assert!(!selection.insert("x"));
        assert!(selection.remove("x"));
        assert!(!selection.remove("x"));
        selection.insert("y");
        selection.clear();
        assert!(selection.is_empty());
    }
}
