use std::collections::HashMap;
use std::hash::Hash;

/// Insertion-ordered value interner with a usage counter per index.
///
/// Entries are never removed and counters only increase; emission order is
/// strictly first-seen order, which keeps compiled output reproducible for
/// identical input ordering.
#[derive(Debug, Clone)]
pub struct InternTable<T> {
    entries: Vec<T>,
    counts: Vec<u32>,
    index: HashMap<T, usize>,
}

impl<T: Eq + Hash + Clone> InternTable<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            counts: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Table with index 0 pre-seeded with the given zero value, so unused
    /// slots share index 0 across the whole compiled output. The seed's
    /// usage count stays 0 until it is actually interned.
    pub fn with_reserved(zero: T) -> Self {
        let mut table = Self::new();
        table.index.insert(zero.clone(), 0);
        table.entries.push(zero);
        table.counts.push(0);
        table
    }

    /// Intern a value: an existing value increments its usage counter and
    /// returns its index, a new value is appended at the next index.
    pub fn intern(&mut self, value: T) -> usize {
        if let Some(&i) = self.index.get(&value) {
            self.counts[i] += 1;
            return i;
        }
        let i = self.entries.len();
        self.index.insert(value.clone(), i);
        self.entries.push(value);
        self.counts.push(1);
        i
    }

    /// Lookup without mutation.
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.index.get(value).copied()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(index)
    }

    pub fn use_count(&self, index: usize) -> u32 {
        self.counts.get(index).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries with their usage counts, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, u32)> {
        self.entries.iter().zip(self.counts.iter().copied())
    }

    /// Rebuild a table from serialized (value, count) entries, preserving
    /// their order. Used by the binary loader.
    pub fn from_entries(entries: impl IntoIterator<Item = (T, u32)>) -> Self {
        let mut table = Self::new();
        for (value, count) in entries {
            let i = table.entries.len();
            table.index.insert(value.clone(), i);
            table.entries.push(value);
            table.counts.push(count);
        }
        table
    }
}

impl<T: Eq + Hash + Clone> Default for InternTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash + Clone> PartialEq for InternTable<T> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries && self.counts == other.counts
    }
}
