//! # Prefix Index
//!
//! [`PrefixIndex`] buckets candidate strings by the Unicode code point of
//! their first character, so a lookaround probe only scans the bucket
//! sharing the query's first code point.
//!
//! Grouping is by code point, not UTF-16 unit: an entry starting with a
//! supplementary-plane character buckets under the combined code point.

use crate::errors::{MWResult, MatchweaveError};
use crate::text::{code_point_at, encode_units};
use crate::types::{CodePoint, MWHashMap};

/// Derived views over the index, rebuilt after every mutation.
#[derive(Clone, Debug, Default)]
struct IndexViews {
    /// Total entry count.
    count: usize,

    /// Sorted ascending distinct entry lengths, in UTF-16 units.
    key_lengths: Vec<usize>,
}

/// A set of UTF-16 strings bucketed by first code point.
#[derive(Clone, Debug, Default)]
pub struct PrefixIndex {
    buckets: MWHashMap<CodePoint, Vec<Vec<u16>>>,
    views: IndexViews,
}

impl PrefixIndex {
    /// An empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from strings.
    ///
    /// ## Returns
    /// The index, or an error if any entry is empty.
    pub fn from_strings<I, S>(entries: I) -> MWResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::new();
        index.add_all(entries)?;
        Ok(index)
    }

    /// Add one entry.
    ///
    /// ## Returns
    /// An error if the entry is empty.
    pub fn add<S: AsRef<str>>(
        &mut self,
        entry: S,
    ) -> MWResult<()> {
        self.insert_units(encode_units(entry.as_ref()))?;
        self.rebuild_views();
        Ok(())
    }

    /// Add many entries, rebuilding the derived views once.
    pub fn add_all<I, S>(
        &mut self,
        entries: I,
    ) -> MWResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for entry in entries {
            self.insert_units(encode_units(entry.as_ref()))?;
        }
        self.rebuild_views();
        Ok(())
    }

    /// Remove one entry.
    ///
    /// ## Returns
    /// Whether the entry was present.
    pub fn remove<S: AsRef<str>>(
        &mut self,
        entry: S,
    ) -> bool {
        let units = encode_units(entry.as_ref());
        let Some(key) = code_point_at(&units, 0) else {
            return false;
        };
        let Some(bucket) = self.buckets.get_mut(&key) else {
            return false;
        };
        let Some(pos) = bucket.iter().position(|e| *e == units) else {
            return false;
        };
        bucket.remove(pos);
        if bucket.is_empty() {
            self.buckets.remove(&key);
        }
        self.rebuild_views();
        true
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.rebuild_views();
    }

    /// The number of indexed entries.
    pub fn len(&self) -> usize {
        self.views.count
    }

    /// Is the index empty?
    pub fn is_empty(&self) -> bool {
        self.views.count == 0
    }

    /// Sorted ascending distinct entry lengths, in UTF-16 units.
    ///
    /// Lookaround probes the adjacent slice at each of these lengths.
    pub fn all_key_lengths(&self) -> &[usize] {
        &self.views.key_lengths
    }

    /// Iterate over all indexed entries, in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = &[u16]> {
        self.buckets.values().flatten().map(Vec::as_slice)
    }

    /// Is this exact string indexed?
    pub fn has_string<S: AsRef<str>>(
        &self,
        query: S,
    ) -> bool {
        self.has_slice(&encode_units(query.as_ref()))
    }

    /// Is this exact unit slice indexed?
    ///
    /// Only the bucket sharing the query's first code point is scanned.
    pub fn has_slice(
        &self,
        query: &[u16],
    ) -> bool {
        let Some(key) = code_point_at(query, 0) else {
            return false;
        };
        match self.buckets.get(&key) {
            Some(bucket) => bucket.iter().any(|e| e == query),
            None => false,
        }
    }

    fn insert_units(
        &mut self,
        units: Vec<u16>,
    ) -> MWResult<()> {
        let Some(key) = code_point_at(&units, 0) else {
            return Err(MatchweaveError::EmptyIndexKey);
        };
        let bucket = self.buckets.entry(key).or_default();
        if !bucket.contains(&units) {
            bucket.push(units);
        }
        Ok(())
    }

    fn rebuild_views(&mut self) {
        let mut count = 0;
        let mut lengths: Vec<usize> = Vec::new();
        for bucket in self.buckets.values() {
            count += bucket.len();
            for entry in bucket {
                if !lengths.contains(&entry.len()) {
                    lengths.push(entry.len());
                }
            }
        }
        lengths.sort_unstable();
        self.views = IndexViews {
            count,
            key_lengths: lengths,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucketing_by_code_point() {
        let index = PrefixIndex::from_strings(["😀x", "😀yz", "ab"]).unwrap();
        assert_eq!(index.len(), 3);

        // "😀x" is 3 units; "😀yz" is 4; "ab" is 2.
        assert_eq!(index.all_key_lengths(), &[2, 3, 4]);

        assert!(index.has_string("😀x"));
        assert!(index.has_string("ab"));
        // Shares the first code point with "😀x", but is not indexed.
        assert!(!index.has_string("😀q"));
        assert!(!index.has_string(""));
    }

    #[test]
    fn test_mutation_rebuilds_views() {
        let mut index = PrefixIndex::new();
        index.add("abc").unwrap();
        index.add("de").unwrap();
        assert_eq!(index.all_key_lengths(), &[2, 3]);
        assert_eq!(index.len(), 2);

        assert!(index.remove("abc"));
        assert!(!index.remove("abc"));
        assert_eq!(index.all_key_lengths(), &[2]);
        assert_eq!(index.len(), 1);

        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.all_key_lengths(), &[] as &[usize]);
    }

    #[test]
    fn test_duplicate_add_is_idempotent() {
        let mut index = PrefixIndex::new();
        index.add_all(["aa", "aa"]).unwrap();
        index.add("aa").unwrap();
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_empty_entry_rejected() {
        let mut index = PrefixIndex::new();
        assert!(matches!(
            index.add(""),
            Err(MatchweaveError::EmptyIndexKey)
        ));
    }
}
