use std::collections::TryReserveError;
use thiserror::Error;

/// Errors reported by [`ChainedHashTable`](crate::ChainedHashTable) operations.
///
/// A failed operation leaves the table's contents and counters untouched,
/// except for `initialize`, which always discards the previous table first.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("hash table has not been initialized")]
    Uninitialized,

    #[error("a hash table needs at least one slot")]
    ZeroSlots,

    #[error("could not allocate {slot_count} buckets")]
    BucketAllocation {
        slot_count: usize,
        #[source]
        source: TryReserveError,
    },

    #[error("entry arena is full ({limit} entries)")]
    EntryArenaFull { limit: usize },

    #[error("hasher returned slot {slot}, outside 0..{slot_count}")]
    SlotOutOfRange { slot: usize, slot_count: usize },

    #[error("key of {len} bytes exceeds the {max} byte limit")]
    KeyTooLong { len: usize, max: usize },
}

impl TableError {
    /// True for failures to obtain memory for buckets or entries.
    pub fn is_allocation(&self) -> bool {
        matches!(
            self,
            TableError::BucketAllocation { .. } | TableError::EntryArenaFull { .. }
        )
    }
}

/// Errors from loading a word list into a table.
#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("failed to read dictionary")]
    Io(#[from] std::io::Error),

    #[error("could not initialize table")]
    Init(#[source] TableError),

    #[error("could not insert word on line {line}")]
    Table {
        line: usize,
        #[source]
        source: TableError,
    },
}
