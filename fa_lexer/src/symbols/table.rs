//! Positional hash table for identifiers and constants
//!
//! Separate chaining over a fixed number of buckets. A key's position is the
//! pair (bucket, offset in chain); positions are stable until a removal from
//! the same bucket.

use crate::config::compile_time::symbols::TABLE_CAPACITY;
use crate::logging::codes;
use crate::log_warning;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Location of a key inside the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SymbolPosition {
    pub bucket: usize,
    pub offset: usize,
}

impl SymbolPosition {
    /// Pair rendered for tokens that have no table entry
    pub const MISSING: (i64, i64) = (-1, -1);

    pub fn new(bucket: usize, offset: usize) -> Self {
        Self { bucket, offset }
    }

    pub fn as_pair(self) -> (i64, i64) {
        (self.bucket as i64, self.offset as i64)
    }

    /// `(-1,-1)` for `None`
    pub fn pair_or_missing(position: Option<Self>) -> (i64, i64) {
        position.map_or(Self::MISSING, Self::as_pair)
    }
}

impl fmt::Display for SymbolPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.bucket, self.offset)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolTable {
    buckets: Vec<Vec<String>>,
}

impl SymbolTable {
    /// Table with the configured number of buckets
    pub fn new() -> Self {
        Self::with_capacity(TABLE_CAPACITY)
    }

    /// Table with `capacity` buckets (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buckets: vec![Vec::new(); capacity.max(1)],
        }
    }

    /// Sum of the key's UTF-8 bytes modulo capacity
    pub fn hash(&self, key: &str) -> usize {
        key.bytes().map(usize::from).sum::<usize>() % self.buckets.len()
    }

    /// Append `key` to its bucket chain.
    ///
    /// Does not deduplicate; callers check `exists` first or use
    /// `insert_if_absent`.
    pub fn insert(&mut self, key: &str) -> SymbolPosition {
        let bucket = self.hash(key);
        let chain = &mut self.buckets[bucket];
        chain.push(key.to_string());
        SymbolPosition::new(bucket, chain.len() - 1)
    }

    /// Insert the decimal rendering of `value`
    pub fn insert_integer(&mut self, value: i64) -> SymbolPosition {
        self.insert(&value.to_string())
    }

    /// Position of `key`, inserting it first when missing
    pub fn insert_if_absent(&mut self, key: &str) -> SymbolPosition {
        match self.search(key) {
            Some(position) => position,
            None => self.insert(key),
        }
    }

    pub fn exists(&self, key: &str) -> bool {
        self.search(key).is_some()
    }

    /// Position of the first chain entry equal to `key`
    pub fn search(&self, key: &str) -> Option<SymbolPosition> {
        let bucket = self.hash(key);
        self.buckets[bucket]
            .iter()
            .position(|entry| entry == key)
            .map(|offset| SymbolPosition::new(bucket, offset))
    }

    /// Position as a pair, `(-1,-1)` on a miss
    pub fn search_elem(&self, key: &str) -> (i64, i64) {
        SymbolPosition::pair_or_missing(self.search(key))
    }

    /// Unlink the first entry equal to `key`. A miss is reported and ignored.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.search(key) {
            Some(position) => {
                self.buckets[position.bucket].remove(position.offset);
                true
            }
            None => {
                log_warning!(code = codes::symbols::KEY_NOT_FOUND,
                    "Key not found in the symbol table",
                    "key" => key);
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn bucket(&self, index: usize) -> Option<&[String]> {
        self.buckets.get(index).map(Vec::as_slice)
    }

    /// Entries in bucket order, then chain order
    pub fn iter(&self) -> impl Iterator<Item = (SymbolPosition, &str)> + '_ {
        self.buckets.iter().enumerate().flat_map(|(bucket, chain)| {
            chain
                .iter()
                .enumerate()
                .map(move |(offset, key)| (SymbolPosition::new(bucket, offset), key.as_str()))
        })
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, chain) in self.buckets.iter().enumerate() {
            write!(f, "Bucket {}: ", index)?;
            for key in chain {
                write!(f, "{} <-> ", key)?;
            }
            writeln!(f, "NULL")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_byte_sum_modulo_capacity() {
        let table = SymbolTable::with_capacity(100);
        // 'a' = 97, 'b' = 98
        assert_eq!(table.hash("a"), 97);
        assert_eq!(table.hash("ab"), 95);
        assert_eq!(table.hash(""), 0);
    }

    #[test]
    fn test_exists_before_and_after_insert() {
        let mut table = SymbolTable::new();
        assert!(!table.exists("x"));

        let position = table.insert("x");
        assert!(table.exists("x"));
        assert_eq!(table.search("x"), Some(position));
        assert_eq!(position.offset, 0);
    }

    #[test]
    fn test_same_bucket_offsets() {
        let mut table = SymbolTable::with_capacity(100);
        // "ab" and "ba" share a byte sum
        let first = table.insert("ab");
        let second = table.insert("ba");

        assert_eq!(first.bucket, second.bucket);
        assert_eq!(second.offset, first.offset + 1);
        assert_eq!(table.search("ba").unwrap().offset, table.search("ab").unwrap().offset + 1);
    }

    #[test]
    fn test_insert_if_absent_keeps_position() {
        let mut table = SymbolTable::new();
        let first = table.insert_if_absent("count");
        let again = table.insert_if_absent("count");

        assert_eq!(first, again);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_search_miss_sentinel() {
        let table = SymbolTable::new();
        assert_eq!(table.search("missing"), None);
        assert_eq!(table.search_elem("missing"), (-1, -1));
    }

    #[test]
    fn test_remove() {
        let mut table = SymbolTable::with_capacity(100);
        table.insert("ab");
        table.insert("ba");

        assert!(table.remove("ab"));
        assert_eq!(table.search("ba").map(|p| p.offset), Some(0));
        assert!(!table.remove("ab"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_repeated_raw_insert_keeps_first_position() {
        let mut table = SymbolTable::new();
        let bucket = table.hash("k");

        table.insert("k");
        table.insert("k");

        assert_eq!(table.search_elem("k"), (bucket as i64, 0));
        assert_eq!(table.bucket(bucket).map(<[String]>::len), Some(2));
    }

    #[test]
    fn test_remove_miss_is_reported() {
        let logger = crate::logging::test_logger();
        let mut table = SymbolTable::new();

        assert!(!table.remove("never-inserted-key"));
        assert!(logger
            .get_events_with_code(codes::symbols::KEY_NOT_FOUND)
            .iter()
            .any(|e| e.is_warning()
                && e.context.get("key").map(String::as_str) == Some("never-inserted-key")));
    }

    #[test]
    fn test_insert_integer() {
        let mut table = SymbolTable::new();
        let position = table.insert_integer(-42);
        assert_eq!(table.search("-42"), Some(position));
    }

    #[test]
    fn test_display_and_iteration() {
        let mut table = SymbolTable::with_capacity(3);
        table.insert("a"); // 97 % 3 = 1
        table.insert("d"); // 100 % 3 = 1

        let rendered = table.to_string();
        assert_eq!(
            rendered,
            "Bucket 0: NULL\nBucket 1: a <-> d <-> NULL\nBucket 2: NULL\n"
        );

        let entries: Vec<_> = table.iter().collect();
        assert_eq!(
            entries,
            vec![
                (SymbolPosition::new(1, 0), "a"),
                (SymbolPosition::new(1, 1), "d")
            ]
        );
        assert_eq!(table.bucket(1).map(<[String]>::len), Some(2));
        assert_eq!(table.bucket(3), None);
        assert_eq!(table.capacity(), 3);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_position_display() {
        assert_eq!(SymbolPosition::new(4, 2).to_string(), "(4,2)");
        assert_eq!(SymbolPosition::pair_or_missing(None), (-1, -1));
    }
}
