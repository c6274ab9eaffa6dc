//! Module: in-memory ordered store
//!
//! `BTreeMap` behind a shared handle, used for index fixtures in tests
//! and as the backing tree of sorter temp regions. Traversal semantics
//! here are the reference the cursor layer is written against.

use crate::{
    codec::KeySentinel,
    store::{MAX_ROW_BYTES, SeekComparison, StoreFault, StoreScan},
};
use std::{cell::RefCell, collections::BTreeMap, ops::Bound, rc::Rc};

type EntryTree = BTreeMap<Vec<u8>, Vec<u8>>;

///
/// MemoryStore
///
/// Ordered byte-key store with interior mutability, so independent scan
/// handles and the owning session can share one tree.
///

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<EntryTree>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, returning the value it displaced.
    pub fn insert(&self, key: Vec<u8>, record: Vec<u8>) -> Result<Option<Vec<u8>>, StoreFault> {
        if record.len() > MAX_ROW_BYTES {
            return Err(StoreFault::RecordTooLarge {
                len: record.len(),
                max: MAX_ROW_BYTES,
            });
        }

        Ok(self.entries.borrow_mut().insert(key, record))
    }

    pub fn remove(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.entries.borrow_mut().remove(key)
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    #[must_use]
    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.entries.borrow().contains_key(key)
    }

    /// Snapshot of every key in order. Intended for assertions.
    #[must_use]
    pub fn keys(&self) -> Vec<Vec<u8>> {
        self.entries.borrow().keys().cloned().collect()
    }

    /// Open an independent traversal handle over this store.
    #[must_use]
    pub fn scan(&self) -> MemoryScan {
        MemoryScan {
            entries: Rc::clone(&self.entries),
            buffer: Vec::new(),
            divergence: 0,
        }
    }
}

///
/// MemoryScan
///

#[derive(Clone, Debug)]
pub struct MemoryScan {
    entries: Rc<RefCell<EntryTree>>,
    buffer: Vec<u8>,
    divergence: usize,
}

impl StoreScan for MemoryScan {
    fn clear(&mut self) {
        self.buffer.clear();
        self.divergence = 0;
    }

    fn append(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    fn append_sentinel(&mut self, sentinel: KeySentinel) {
        self.buffer.push(sentinel.byte());
    }

    fn cut(&mut self, len: usize) {
        self.buffer.truncate(len);
    }

    fn traverse(&mut self, cmp: SeekComparison, deep: bool) -> Result<bool, StoreFault> {
        let found = {
            let entries = self.entries.borrow();

            match (cmp, deep) {
                // Enter the buffer's subtree at its first entry.
                (SeekComparison::Gteq, true) => first_at_or_after(&entries, &self.buffer),
                // Exact hit, or the first entry past the subtree.
                (SeekComparison::Gteq, false) => {
                    if entries.contains_key(&self.buffer) {
                        Some(self.buffer.clone())
                    } else {
                        prefix_successor(&self.buffer)
                            .and_then(|succ| first_at_or_after(&entries, &succ))
                    }
                }
                (SeekComparison::Gt, true) => first_after(&entries, &self.buffer),
                (SeekComparison::Gt, false) => prefix_successor(&self.buffer)
                    .and_then(|succ| first_at_or_after(&entries, &succ)),
                // Land on the last entry of the buffer's subtree.
                (SeekComparison::Lteq, true) => match prefix_successor(&self.buffer) {
                    Some(succ) => last_before(&entries, &succ),
                    None => entries.keys().next_back().cloned(),
                },
                (SeekComparison::Lteq, false) => last_at_or_before(&entries, &self.buffer),
                (SeekComparison::Lt, _) => last_before(&entries, &self.buffer),
            }
        };

        match found {
            Some(key) => {
                self.divergence = common_prefix_len(&self.buffer, &key);
                self.buffer = key;

                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn record(&self) -> Result<Vec<u8>, StoreFault> {
        self.entries
            .borrow()
            .get(&self.buffer)
            .cloned()
            .ok_or(StoreFault::MissingRecord)
    }

    fn key(&self) -> &[u8] {
        &self.buffer
    }

    fn first_unique_byte_index(&self) -> usize {
        self.divergence
    }
}

fn first_at_or_after(entries: &EntryTree, probe: &[u8]) -> Option<Vec<u8>> {
    entries
        .range::<[u8], _>((Bound::Included(probe), Bound::Unbounded))
        .next()
        .map(|(key, _)| key.clone())
}

fn first_after(entries: &EntryTree, probe: &[u8]) -> Option<Vec<u8>> {
    entries
        .range::<[u8], _>((Bound::Excluded(probe), Bound::Unbounded))
        .next()
        .map(|(key, _)| key.clone())
}

fn last_before(entries: &EntryTree, probe: &[u8]) -> Option<Vec<u8>> {
    entries
        .range::<[u8], _>((Bound::Unbounded, Bound::Excluded(probe)))
        .next_back()
        .map(|(key, _)| key.clone())
}

fn last_at_or_before(entries: &EntryTree, probe: &[u8]) -> Option<Vec<u8>> {
    entries
        .range::<[u8], _>((Bound::Unbounded, Bound::Included(probe)))
        .next_back()
        .map(|(key, _)| key.clone())
}

/// Smallest key strictly above every extension of `key`: increment the
/// last non-`0xFF` byte and drop what follows. `None` when no such key
/// exists, i.e. the buffer is empty or all `0xFF`.
pub(super) fn prefix_successor(key: &[u8]) -> Option<Vec<u8>> {
    let mut out = key.to_vec();

    while let Some(&last) = out.last() {
        if last == 0xFF {
            out.pop();
        } else {
            let end = out.len() - 1;
            out[end] = last + 1;

            return Some(out);
        }
    }

    None
}

pub(super) fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}
