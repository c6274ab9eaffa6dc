//! Ordered store primitive: the traversal seam between per-column scan
//! states and whatever B-tree holds the encoded keys. The engine never
//! talks to a store except through [`StoreScan`].

mod memory;


pub use memory::{MemoryScan, MemoryStore};

use crate::{
    codec::KeySentinel,
    error::{EngineError, ErrorClass, ErrorOrigin},
};
use thiserror::Error as ThisError;

/// Max serialized bytes for a single stored row record.
pub const MAX_ROW_BYTES: usize = 4 * 1024 * 1024;

///
/// StoreFault
///
/// Low-level failures raised at the store seam, wrapped into the engine
/// taxonomy by the cursor and sorter layers.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum StoreFault {
    #[error("store record missing for the current key")]
    MissingRecord,

    #[error("store corruption: {detail}")]
    Corrupt { detail: String },

    #[error("store rejected a record of {len} bytes (limit {max})")]
    RecordTooLarge { len: usize, max: usize },
}

impl From<StoreFault> for EngineError {
    fn from(err: StoreFault) -> Self {
        let class = match &err {
            StoreFault::RecordTooLarge { .. } => ErrorClass::Unsupported,
            StoreFault::MissingRecord | StoreFault::Corrupt { .. } => ErrorClass::Storage,
        };

        Self::new(class, ErrorOrigin::Store, err.to_string())
    }
}

///
/// SeekComparison
///
/// Comparison a traversal positions with, relative to the scan's key
/// buffer.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SeekComparison {
    Gteq,
    Gt,
    Lteq,
    Lt,
}

impl SeekComparison {
    #[must_use]
    pub const fn is_forward(self) -> bool {
        matches!(self, Self::Gteq | Self::Gt)
    }
}

///
/// StoreScan
///
/// One traversal handle over an ordered byte-key store. The scan owns a
/// key buffer: `traverse`/`next`/`previous` position relative to it and,
/// on success, replace it with the entry key found; on a miss the buffer
/// is unchanged. *Deep* movement descends into entries extending the
/// buffer; *shallow* movement skips the buffer's whole prefix subtree.
///

pub trait StoreScan {
    /// Reset the key buffer to empty.
    fn clear(&mut self);

    /// Append raw encoded bytes onto the key buffer.
    fn append(&mut self, bytes: &[u8]);

    /// Append one sentinel byte onto the key buffer.
    fn append_sentinel(&mut self, sentinel: KeySentinel);

    /// Truncate the key buffer to `len` bytes.
    fn cut(&mut self, len: usize);

    /// Seek relative to the buffer with the given comparison.
    fn traverse(&mut self, cmp: SeekComparison, deep: bool) -> Result<bool, StoreFault>;

    /// Forward step from the current buffer.
    fn next(&mut self, deep: bool) -> Result<bool, StoreFault> {
        self.traverse(SeekComparison::Gt, deep)
    }

    /// Backward step from the current buffer. A key's extensions sort
    /// above it, so backward movement never re-enters the buffer's own
    /// subtree and deep/shallow coincide.
    fn previous(&mut self, deep: bool) -> Result<bool, StoreFault> {
        self.traverse(SeekComparison::Lt, deep)
    }

    /// Fetch the record stored under the buffer's exact key.
    fn record(&self) -> Result<Vec<u8>, StoreFault>;

    /// Current key buffer contents.
    fn key(&self) -> &[u8];

    fn encoded_size(&self) -> usize {
        self.key().len()
    }

    /// Index of the first byte where the last successful positioning
    /// diverged from the buffer contents it replaced.
    fn first_unique_byte_index(&self) -> usize;
}
