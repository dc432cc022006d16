use std::{collections::HashMap, hash::Hash};

/// Canonical ordering of unique values by first appearance in a sequence.
///
/// The metrics tables never sort teams or events lexically; they follow the
/// order in which each value first occurs in the disaggregated input. This
/// index makes that ordering reusable across derivation steps.
///
/// # Example
///
/// ```
/// use podium_core::FirstSeen;
///
/// let order = FirstSeen::from_iter(["b", "a", "b", "c"]);
/// assert_eq!(order.rank(&"a"), Some(1));
/// assert_eq!(order.values(), ["b", "a", "c"]);
/// ```
#[derive(Debug, Clone)]
pub struct FirstSeen<T> {
    values: Vec<T>,
    ranks: HashMap<T, usize>,
}

impl<T> FirstSeen<T>
where
    T: Eq + Hash + Clone,
{
    /// Rank of a value, `None` if it never appeared.
    #[must_use]
    pub fn rank(&self, value: &T) -> Option<usize> {
        self.ranks.get(value).copied()
    }

    /// Unique values in first-appearance order.
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<T> FromIterator<T> for FirstSeen<T>
where
    T: Eq + Hash + Clone,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut values = Vec::new();
        let mut ranks = HashMap::new();
        for value in iter {
            if !ranks.contains_key(&value) {
                ranks.insert(value.clone(), values.len());
                values.push(value);
            }
        }
        Self { values, ranks }
    }
}
