//! Counting primitives shared by every view.
//!
//! [`FrequencyTable`] remembers the order in which keys were first seen so
//! that equal counts rank first-seen-first. Sorting is stable and only by
//! count; keys are never compared.

use std::collections::HashMap;
use std::hash::Hash;

/// Insertion-ordered occurrence counter.
#[derive(Debug, Clone)]
pub struct FrequencyTable<K> {
    entries: Vec<(K, u64)>,
    index: HashMap<K, usize>,
}

impl<K> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> FrequencyTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `key`.
    pub fn add(&mut self, key: K) {
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    /// Occurrences of `key` so far.
    pub fn count(&self, key: &K) -> u64 {
        self.index
            .get(key)
            .map(|&pos| self.entries[pos].1)
            .unwrap_or(0)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// All keys ordered by count descending, ties in first-seen order.
    pub fn most_common(&self) -> Vec<(K, u64)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// All keys in first-seen order.
    pub fn into_entries(self) -> Vec<(K, u64)> {
        self.entries
    }
}

impl<K: Eq + Hash + Clone> FromIterator<K> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut table = Self::new();
        for key in iter {
            table.add(key);
        }
        table
    }
}

impl<K: Eq + Hash + Clone> Extend<K> for FrequencyTable<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.add(key);
        }
    }
}

/// Count each key, most frequent first.
pub fn value_counts<K, I>(keys: I) -> Vec<(K, u64)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    keys.into_iter().collect::<FrequencyTable<K>>().most_common()
}

/// The `n` most frequent non-empty tokens.
///
/// Empty tokens are dropped before truncating, so the result holds up to
/// `n` real names.
pub fn top_tags<'a, I>(tokens: I, n: usize) -> Vec<(String, u64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let table: FrequencyTable<&str> = tokens.into_iter().collect();
    table
        .most_common()
        .into_iter()
        .filter(|(token, _)| !token.is_empty())
        .take(n)
        .map(|(token, count)| (token.to_string(), count))
        .collect()
}

/// Each count as a share of the total, in percent.
///
/// All zeros when the total is zero.
pub fn percentages<K>(counts: &[(K, u64)]) -> Vec<f64> {
    let total: u64 = counts.iter().map(|(_, c)| c).sum();
    if total == 0 {
        return vec![0.0; counts.len()];
    }
    counts
        .iter()
        .map(|(_, c)| 100.0 * *c as f64 / total as f64)
        .collect()
}

/// Split a count list into parallel label/value vectors.
pub fn unzip_labels<K: ToString>(counts: &[(K, u64)]) -> (Vec<String>, Vec<u64>) {
    counts
        .iter()
        .map(|(k, c)| (k.to_string(), *c))
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_table_counts() {
        let table: FrequencyTable<&str> = ["A", "B", "A"].into_iter().collect();
        assert_eq!(table.count(&"A"), 2);
        assert_eq!(table.count(&"B"), 1);
        assert_eq!(table.count(&"C"), 0);
        assert_eq!(table.len(), 2);
        assert_eq!(table.total(), 3);
    }

    #[test]
    fn test_most_common_tie_break_is_first_seen() {
        let table: FrequencyTable<&str> =
            ["x", "y", "z", "y", "x", "w"].into_iter().collect();
        let ranked = table.most_common();
        assert_eq!(ranked, vec![("x", 2), ("y", 2), ("z", 1), ("w", 1)]);
    }

    #[test]
    fn test_into_entries_keeps_first_seen_order() {
        let table: FrequencyTable<u32> = [3, 1, 3, 2].into_iter().collect();
        assert_eq!(table.into_entries(), vec![(3, 2), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_extend() {
        let mut table = FrequencyTable::new();
        table.extend(["a", "b"]);
        table.extend(["b"]);
        assert_eq!(table.count(&"b"), 2);
    }

    #[test]
    fn test_value_counts() {
        let counts = value_counts(vec!["Movie", "TV Show", "Movie"]);
        assert_eq!(counts, vec![("Movie", 2), ("TV Show", 1)]);
        assert!(value_counts(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_top_tags_excludes_empty() {
        let tokens = ["", "", "", "A", "B", "A"];
        let top = top_tags(tokens, 5);
        assert_eq!(
            top,
            vec![("A".to_string(), 2), ("B".to_string(), 1)]
        );
        assert!(top.iter().all(|(t, _)| !t.is_empty()));
    }

    #[test]
    fn test_top_tags_respects_bound() {
        let tokens: Vec<String> = (0..40).map(|i| format!("name-{i}")).collect();
        let top = top_tags(tokens.iter().map(String::as_str), 25);
        assert_eq!(top.len(), 25);
        assert_eq!(top[0].0, "name-0");
        assert!(top_tags(tokens.iter().map(String::as_str), 0).is_empty());
    }

    #[test]
    fn test_percentages_sum_to_100() {
        let counts = vec![("a", 3), ("b", 5), ("c", 7)];
        let pct = percentages(&counts);
        let sum: f64 = pct.iter().sum();
        assert!((sum - 100.0).abs() < 1e-9);
        assert!((pct[0] - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_percentages_zero_total() {
        let counts: Vec<(&str, u64)> = vec![("a", 0)];
        assert_eq!(percentages(&counts), vec![0.0]);
    }

    #[test]
    fn test_unzip_labels() {
        let (labels, values) = unzip_labels(&[(2019, 4), (2018, 1)]);
        assert_eq!(labels, vec!["2019", "2018"]);
        assert_eq!(values, vec![4, 1]);
    }
}
