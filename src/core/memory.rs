//! Sparse address-indexed memory.
//!
//! One generic store backs both memory segments: the text segment holds
//! instruction lines (`Memory<String>`) and the data segment holds words
//! (`Memory<i64>`). Absent cells read as the default value, so every address
//! is valid and no access can fault.

use std::collections::HashMap;

/// A sparse mapping from word-aligned addresses to values.
#[derive(Clone, Debug, Default)]
pub struct Memory<T> {
    cells: HashMap<u64, T>,
    limit: u64,
}

impl<T: Clone + Default> Memory<T> {
    /// Creates an empty memory.
    pub fn new() -> Self {
        Self {
            cells: HashMap::new(),
            limit: 0,
        }
    }

    /// Reads the value at `addr`, or the default value if the cell is unset.
    pub fn read(&self, addr: u64) -> T {
        self.cells.get(&addr).cloned().unwrap_or_default()
    }

    /// Writes `value` at `addr`, creating or overwriting the cell.
    pub fn write(&mut self, addr: u64, value: T) {
        self.limit = self.limit.max(addr + 4);
        let _ = self.cells.insert(addr, value);
    }

    /// Merges address/value pairs directly into the store.
    pub fn load_map(&mut self, entries: impl IntoIterator<Item = (u64, T)>) {
        for (addr, value) in entries {
            self.write(addr, value);
        }
    }

    /// Lays values out at successive 4-byte strides starting at address 0.
    pub fn load_seq(&mut self, values: impl IntoIterator<Item = T>) {
        for (i, value) in values.into_iter().enumerate() {
            self.write(i as u64 * 4, value);
        }
    }

    /// One past the highest address ever written; the program-end mark for
    /// the text segment.
    pub fn extent(&self) -> u64 {
        self.limit
    }

    /// Number of populated cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell has been written.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates populated cells in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&u64, &T)> {
        self.cells.iter()
    }
}
