//! Sequence comparison

use crate::result::ComparisonResult;
use std::fmt;
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompareError {
    #[error("Invalid argument: {name} is required")]
    InvalidArgument { name: &'static str },
}

/// A boxed equality predicate, called as `predicate(original_item, incoming_item)`
pub type Predicate<'a, T> = Box<dyn Fn(&T, &T) -> bool + 'a>;

/// How incoming items are matched against original items
pub enum Strategy<'a, T> {
    /// Match by the first equal value in the original sequence; an item is
    /// changed when it sits at a different index (or no longer compares equal)
    Positional(Predicate<'a, T>),
    /// Match by the first unconsumed item with an equal key; an item is
    /// changed when its value differs, regardless of position
    KeyValue {
        key: Predicate<'a, T>,
        value: Predicate<'a, T>,
    },
}

impl<'a, T: 'a> Strategy<'a, T> {
    /// Positional matching with `PartialEq`
    pub fn positional() -> Self
    where
        T: PartialEq,
    {
        Self::Positional(Box::new(|a: &T, b: &T| a == b))
    }

    /// Positional matching with a custom equality
    pub fn positional_by(equality: impl Fn(&T, &T) -> bool + 'a) -> Self {
        Self::Positional(Box::new(equality))
    }

    /// Key/value matching from an identity and a content predicate
    pub fn key_value(
        key: impl Fn(&T, &T) -> bool + 'a,
        value: impl Fn(&T, &T) -> bool + 'a,
    ) -> Self {
        Self::KeyValue {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Positional(_) => "positional",
            Self::KeyValue { .. } => "key_value",
        }
    }
}

impl<T> fmt::Debug for Strategy<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positional(_) => f.write_str("Positional"),
            Self::KeyValue { .. } => f.write_str("KeyValue"),
        }
    }
}

/// Working state shared by both matching modes
///
/// `consumed[j]` marks `original[j]` as matched; whatever is left unmarked
/// becomes the removed list, in original order.
struct Tally<T> {
    added: Vec<T>,
    changed: Vec<T>,
    consumed: Vec<bool>,
}

impl<T: Clone> Tally<T> {
    fn new(original_len: usize) -> Self {
        Self {
            added: Vec::new(),
            changed: Vec::new(),
            consumed: vec![false; original_len],
        }
    }

    /// Consume the first not-yet-matched original item satisfying `matches`
    fn consume_first(
        &mut self,
        original: &[T],
        mut matches: impl FnMut(&T) -> bool,
    ) -> Option<usize> {
        let slot = original
            .iter()
            .zip(&self.consumed)
            .position(|(candidate, &used)| !used && matches(candidate))?;
        self.consumed[slot] = true;
        Some(slot)
    }

    fn finish(self, original: &[T], mode: &'static str) -> ComparisonResult<T> {
        let removed: Vec<T> = original
            .iter()
            .zip(&self.consumed)
            .filter(|(_, used)| !**used)
            .map(|(item, _)| item.clone())
            .collect();

        debug!(
            mode,
            added = self.added.len(),
            changed = self.changed.len(),
            removed = removed.len(),
            "compared sequences"
        );

        ComparisonResult::new(self.added, self.changed, removed)
    }
}

/// Compare two sequences positionally using `PartialEq`
///
/// Equal values at the same index are unchanged, equal values at a different
/// index are changed. This cannot tell a reorder from an in-place edit when
/// `T`'s equality only looks at an identity field; use [`compare_by_key`]
/// for that.
pub fn compare<T>(original: &[T], incoming: &[T]) -> ComparisonResult<T>
where
    T: Clone + PartialEq,
{
    compare_with(original, incoming, |a: &T, b: &T| a == b)
}

/// Compare two sequences positionally with a caller-supplied equality
///
/// The predicate both locates the match in `original` and decides whether
/// the matched value changed.
pub fn compare_with<T, F>(original: &[T], incoming: &[T], equality: F) -> ComparisonResult<T>
where
    T: Clone,
    F: Fn(&T, &T) -> bool,
{
    let mut tally = Tally::new(original.len());

    for (index, item) in incoming.iter().enumerate() {
        // Each equal original value is consumed once, left to right. Surplus
        // copies fall back to the first equal value overall.
        let position = tally
            .consume_first(original, |candidate| equality(candidate, item))
            .or_else(|| original.iter().position(|candidate| equality(candidate, item)));

        let Some(position) = position else {
            trace!(index, "no equal value in original");
            tally.added.push(item.clone());
            continue;
        };

        if position != index || !equality(&original[position], item) {
            tally.changed.push(item.clone());
        }
    }

    tally.finish(original, "positional")
}

/// Compare two sequences by identity, then by content
///
/// Each incoming item is matched to the first original item, not already
/// matched, for which `key_equality` holds. Matched items are changed when
/// `value_equality` fails. Position plays no part.
pub fn compare_by_key<T, K, V>(
    original: &[T],
    incoming: &[T],
    key_equality: K,
    value_equality: V,
) -> ComparisonResult<T>
where
    T: Clone,
    K: Fn(&T, &T) -> bool,
    V: Fn(&T, &T) -> bool,
{
    let mut tally = Tally::new(original.len());

    for (index, item) in incoming.iter().enumerate() {
        match tally.consume_first(original, |candidate| key_equality(candidate, item)) {
            Some(slot) => {
                if !value_equality(&original[slot], item) {
                    tally.changed.push(item.clone());
                }
            }
            None => {
                trace!(index, "no matching key in original");
                tally.added.push(item.clone());
            }
        }
    }

    tally.finish(original, "key_value")
}

/// Compare two sequences with an explicitly chosen strategy
pub fn compare_using<T: Clone>(
    original: &[T],
    incoming: &[T],
    strategy: &Strategy<'_, T>,
) -> ComparisonResult<T> {
    match strategy {
        Strategy::Positional(equality) => compare_with(original, incoming, &**equality),
        Strategy::KeyValue { key, value } => {
            compare_by_key(original, incoming, &**key, &**value)
        }
    }
}

enum Mode<'a, T> {
    Unset,
    Positional(Predicate<'a, T>),
    KeyValue {
        key: Option<Predicate<'a, T>>,
        value: Option<Predicate<'a, T>>,
    },
}

/// A checked comparison
///
/// Every input is optional until [`Comparison::run`], which rejects missing
/// sequences or predicates with [`CompareError::InvalidArgument`] before
/// any predicate is called.
///
/// ```
/// use listdiff::Comparison;
///
/// let cached = vec![1, 2, 3];
/// let fetched = vec![1, 3, 4];
/// let result = Comparison::new()
///     .original(&cached)
///     .incoming(&fetched)
///     .run()
///     .unwrap();
///
/// assert_eq!(result.added(), [4]);
/// assert_eq!(result.changed(), [3]);
/// assert_eq!(result.removed(), [2]);
/// ```
pub struct Comparison<'a, T> {
    original: Option<&'a [T]>,
    incoming: Option<&'a [T]>,
    mode: Mode<'a, T>,
}

impl<'a, T: PartialEq + 'a> Default for Comparison<'a, T> {
    fn default() -> Self {
        Self {
            original: None,
            incoming: None,
            mode: Mode::Positional(Box::new(|a: &T, b: &T| a == b)),
        }
    }
}

impl<'a, T: PartialEq + 'a> Comparison<'a, T> {
    /// Positional comparison with `PartialEq` unless told otherwise
    pub fn new() -> Self {
        Self::default()
    }
}

impl<'a, T: 'a> Comparison<'a, T> {
    /// A comparison with no predicate; one must be set before running
    pub fn without_equality() -> Self {
        Self {
            original: None,
            incoming: None,
            mode: Mode::Unset,
        }
    }

    /// Set the baseline sequence
    pub fn original(mut self, original: &'a [T]) -> Self {
        self.original = Some(original);
        self
    }

    /// Set the candidate sequence compared against the baseline
    pub fn incoming(mut self, incoming: &'a [T]) -> Self {
        self.incoming = Some(incoming);
        self
    }

    /// Switch to positional matching with a custom equality
    pub fn equality(mut self, equality: impl Fn(&T, &T) -> bool + 'a) -> Self {
        self.mode = Mode::Positional(Box::new(equality));
        self
    }

    /// Switch to key/value matching and set the identity predicate
    pub fn key_equality(mut self, key: impl Fn(&T, &T) -> bool + 'a) -> Self {
        let value = match std::mem::replace(&mut self.mode, Mode::Unset) {
            Mode::KeyValue { value, .. } => value,
            _ => None,
        };
        self.mode = Mode::KeyValue {
            key: Some(Box::new(key)),
            value,
        };
        self
    }

    /// Switch to key/value matching and set the content predicate
    pub fn value_equality(mut self, value: impl Fn(&T, &T) -> bool + 'a) -> Self {
        let key = match std::mem::replace(&mut self.mode, Mode::Unset) {
            Mode::KeyValue { key, .. } => key,
            _ => None,
        };
        self.mode = Mode::KeyValue {
            key,
            value: Some(Box::new(value)),
        };
        self
    }

    /// Replace the matching mode and any predicates set so far
    pub fn strategy(mut self, strategy: Strategy<'a, T>) -> Self {
        self.mode = match strategy {
            Strategy::Positional(equality) => Mode::Positional(equality),
            Strategy::KeyValue { key, value } => Mode::KeyValue {
                key: Some(key),
                value: Some(value),
            },
        };
        self
    }

    /// Run the comparison
    ///
    /// Fails with `InvalidArgument` naming `original`, `incoming`, `equality`,
    /// `key_equality` or `value_equality`, checked in that order.
    pub fn run(self) -> Result<ComparisonResult<T>, CompareError>
    where
        T: Clone,
    {
        let original = self.original.ok_or(CompareError::InvalidArgument { name: "original" })?;
        let incoming = self.incoming.ok_or(CompareError::InvalidArgument { name: "incoming" })?;

        let strategy = match self.mode {
            Mode::Unset => return Err(CompareError::InvalidArgument { name: "equality" }),
            Mode::Positional(equality) => Strategy::Positional(equality),
            Mode::KeyValue { key, value } => Strategy::KeyValue {
                key: key.ok_or(CompareError::InvalidArgument {
                    name: "key_equality",
                })?,
                value: value.ok_or(CompareError::InvalidArgument {
                    name: "value_equality",
                })?,
            },
        };

        debug!(
            strategy = strategy.name(),
            original = original.len(),
            incoming = incoming.len(),
            "running comparison"
        );

        Ok(compare_using(original, incoming, &strategy))
    }
}
