use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;

/// A value together with how often it was seen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Counted<K> {
    pub value: K,
    pub count: usize,
}

/// Occurrence counter that remembers first-seen order
///
/// Every ranking derived from it breaks ties by first appearance, so results
/// never depend on hash iteration order.
#[derive(Debug, Clone)]
pub struct FrequencyTable<K> {
    index: HashMap<K, usize>,
    entries: Vec<Counted<K>>,
}

impl<K> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> FrequencyTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `value`
    pub fn record(&mut self, value: K) {
        if let Some(&slot) = self.index.get(&value) {
            self.entries[slot].count += 1;
        } else {
            self.index.insert(value.clone(), self.entries.len());
            self.entries.push(Counted { value, count: 1 });
        }
    }

    /// Occurrences of `value`, zero if never seen
    pub fn get(&self, value: &K) -> usize {
        self.index
            .get(value)
            .map_or(0, |&slot| self.entries[slot].count)
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &Counted<K>> {
        self.entries.iter()
    }

    /// Entries in first-seen order, owned
    pub fn counts(&self) -> Vec<Counted<K>> {
        self.entries.clone()
    }

    /// The `n` most frequent values, ties by first appearance
    pub fn most_common(&self, n: usize) -> Vec<Counted<K>> {
        let mut ranked = self.entries.clone();
        // Stable sort keeps first-seen order among equal counts
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(n);
        ranked
    }
}

/// Entry with the highest count; the earliest one wins a tie
pub fn most_frequent<'a, E>(
    entries: impl IntoIterator<Item = &'a E>,
    count: impl Fn(&E) -> usize,
) -> Option<&'a E> {
    entries.into_iter().fold(None, |best, entry| match best {
        Some(b) if count(b) >= count(entry) => Some(b),
        _ => Some(entry),
    })
}

impl<K: Eq + Hash + Clone> FromIterator<K> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut table = Self::new();
        for value in iter {
            table.record(value);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_keep_first_seen_order() {
        let table: FrequencyTable<&str> = ["b", "a", "b", "c", "a", "b"].into_iter().collect();
        let order: Vec<_> = table.iter().map(|e| (e.value, e.count)).collect();
        assert_eq!(order, vec![("b", 3), ("a", 2), ("c", 1)]);
        assert_eq!(table.total(), 6);
    }

    #[test]
    fn test_most_common_breaks_ties_by_first_seen() {
        let table: FrequencyTable<&str> = ["x", "y", "z", "y", "x", "w"].into_iter().collect();
        let top: Vec<_> = table.most_common(3).into_iter().map(|e| e.value).collect();
        assert_eq!(top, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_most_frequent_prefers_earliest_on_tie() {
        let table: FrequencyTable<&str> = ["resolved", "new", "new", "resolved", "closed"]
            .into_iter()
            .collect();
        let counts = table.counts();
        let top = most_frequent(&counts, |e| e.count).unwrap();
        assert_eq!(top.value, "resolved");

        let later_wins = [("a", 1), ("b", 3), ("c", 3)];
        assert_eq!(most_frequent(&later_wins, |e| e.1).unwrap().0, "b");

        let empty: Vec<Counted<&str>> = Vec::new();
        assert!(most_frequent(&empty, |e| e.count).is_none());
    }
}
