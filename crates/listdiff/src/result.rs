//! Comparison result representation

use serde::{Deserialize, Serialize};

/// The classification of an item in a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaKind {
    /// Present in the incoming sequence with no original counterpart
    Added,
    /// Matched an original item but differs in value (or position)
    Changed,
    /// Present in the original sequence and matched by nothing incoming
    Removed,
}

/// A single classified item, borrowed from a [`ComparisonResult`]
#[derive(Debug, PartialEq, Eq)]
pub struct Delta<'a, T> {
    pub kind: DeltaKind,
    pub item: &'a T,
}

/// Result of comparing an original sequence with an incoming one
///
/// `added` and `changed` keep the order of the incoming sequence, `removed`
/// keeps the order of the original sequence. Unchanged items appear nowhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComparisonResult<T> {
    added: Vec<T>,
    changed: Vec<T>,
    removed: Vec<T>,
}

impl<T> ComparisonResult<T> {
    /// A result with nothing added, changed or removed
    pub const EMPTY: Self = Self {
        added: Vec::new(),
        changed: Vec::new(),
        removed: Vec::new(),
    };

    pub fn new(added: Vec<T>, changed: Vec<T>, removed: Vec<T>) -> Self {
        Self {
            added,
            changed,
            removed,
        }
    }

    pub const fn empty() -> Self {
        Self::EMPTY
    }

    pub fn added(&self) -> &[T] {
        &self.added
    }

    pub fn changed(&self) -> &[T] {
        &self.changed
    }

    pub fn removed(&self) -> &[T] {
        &self.removed
    }

    /// Total number of classified items across all three lists
    pub fn len(&self) -> usize {
        self.added.len() + self.changed.len() + self.removed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if anything was classified at all
    pub fn has_changes(&self) -> bool {
        !self.is_empty()
    }

    /// Number of items of the given kind
    pub fn count(&self, kind: DeltaKind) -> usize {
        self.items(kind).len()
    }

    /// Items of the given kind, in result order
    pub fn items(&self, kind: DeltaKind) -> &[T] {
        match kind {
            DeltaKind::Added => &self.added,
            DeltaKind::Changed => &self.changed,
            DeltaKind::Removed => &self.removed,
        }
    }

    /// Iterate over every classified item: added first, then changed, then removed
    pub fn deltas(&self) -> impl Iterator<Item = Delta<'_, T>> {
        let added = self.added.iter().map(|item| Delta {
            kind: DeltaKind::Added,
            item,
        });
        let changed = self.changed.iter().map(|item| Delta {
            kind: DeltaKind::Changed,
            item,
        });
        let removed = self.removed.iter().map(|item| Delta {
            kind: DeltaKind::Removed,
            item,
        });
        added.chain(changed).chain(removed)
    }

    /// Convert every item while keeping its classification and order
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> ComparisonResult<U> {
        ComparisonResult {
            added: self.added.into_iter().map(&mut f).collect(),
            changed: self.changed.into_iter().map(&mut f).collect(),
            removed: self.removed.into_iter().map(&mut f).collect(),
        }
    }

    /// Split into `(added, changed, removed)`
    pub fn into_parts(self) -> (Vec<T>, Vec<T>, Vec<T>) {
        (self.added, self.changed, self.removed)
    }
}

impl<T> Default for ComparisonResult<T> {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_equals_any_empty_result() {
        let built: ComparisonResult<i32> = ComparisonResult::new(vec![], vec![], vec![]);

        assert_eq!(ComparisonResult::EMPTY, built);
        assert_eq!(ComparisonResult::<i32>::empty(), built);
        assert_eq!(ComparisonResult::<i32>::default(), ComparisonResult::EMPTY);
        assert!(built.is_empty());
        assert!(!built.has_changes());
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let a = ComparisonResult::new(vec![1, 2], vec![], vec![]);
        let b = ComparisonResult::new(vec![2, 1], vec![], vec![]);

        assert_ne!(a, b);
    }

    #[test]
    fn test_equality_distinguishes_lists() {
        let added = ComparisonResult::new(vec![1], vec![], vec![]);
        let removed = ComparisonResult::new(vec![], vec![], vec![1]);

        assert_ne!(added, removed);
    }

    #[test]
    fn test_deltas_order_and_kinds() {
        let result = ComparisonResult::new(vec!['a'], vec!['b', 'c'], vec!['d']);

        let deltas: Vec<_> = result.deltas().map(|d| (d.kind, *d.item)).collect();

        assert_eq!(
            deltas,
            vec![
                (DeltaKind::Added, 'a'),
                (DeltaKind::Changed, 'b'),
                (DeltaKind::Changed, 'c'),
                (DeltaKind::Removed, 'd'),
            ]
        );
        assert_eq!(result.len(), 4);
        assert_eq!(result.count(DeltaKind::Changed), 2);
    }

    #[test]
    fn test_items_by_kind() {
        let result = ComparisonResult::new(vec![1, 2], vec![3], vec![]);

        assert_eq!(result.items(DeltaKind::Added), [1, 2]);
        assert_eq!(result.items(DeltaKind::Changed), [3]);
        assert!(result.items(DeltaKind::Removed).is_empty());
    }

    #[test]
    fn test_into_parts_keeps_order() {
        let result = ComparisonResult::new(vec![5, 4], vec![3], vec![2, 1]);

        let (added, changed, removed) = result.into_parts();

        assert_eq!(added, [5, 4]);
        assert_eq!(changed, [3]);
        assert_eq!(removed, [2, 1]);
    }

    #[test]
    fn test_map_keeps_classification() {
        let result = ComparisonResult::new(vec![1], vec![2], vec![3]);

        let mapped = result.map(|n| n.to_string());

        assert_eq!(mapped.added(), ["1".to_string()]);
        assert_eq!(mapped.changed(), ["2".to_string()]);
        assert_eq!(mapped.removed(), ["3".to_string()]);
    }

    #[test]
    fn test_serialized_shape() {
        let result = ComparisonResult::new(vec![4], vec![3], vec![2]);

        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "added": [4], "changed": [3], "removed": [2] })
        );
        let back: ComparisonResult<i32> = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
        assert_eq!(
            serde_json::to_string(&DeltaKind::Removed).unwrap(),
            "\"removed\""
        );
    }
}
