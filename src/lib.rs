//! chained-hashtable: a fixed-capacity, separate-chaining hash table of short
//! string keys with a caller-supplied hash function.
//!
//! Internal Design:
//!
//! Summary
//! - `ChainedHashTable<H>` owns a fixed array of buckets. Each bucket is a
//!   singly linked chain (head and tail) of entries that hash to its slot.
//! - Entries live in a `SlotMap` arena; buckets and `next` links hold arena
//!   keys. Teardown drops the arena in one go; no entry is ever aliased or
//!   handed out mutably.
//! - Hashing is injected through `SlotHasher`. Any `Fn(&str, usize) -> usize`
//!   qualifies; `PjwHash` is the default and `BuildSlotHasher` adapts std
//!   hasher builders.
//!
//! Lifecycle
//! - `new()` yields an uninitialized table. `initialize(slots, hasher)` tears
//!   down any previous contents and allocates empty slots; `teardown()` (or
//!   drop) releases everything. Both are safe to repeat.
//! - Insert on an uninitialized table fails with `TableError::Uninitialized`;
//!   lookup degrades to not-found.
//!
//! Constraints
//! - The slot count is fixed between initializations; there is no resize,
//!   rehash, or delete.
//! - Keys are stored inline in a 127-byte payload. Longer keys are truncated
//!   on a character boundary (the default) or rejected, per `Overlong`.
//! - Duplicate keys are stored as separate entries. Chains append at the tail
//!   and lookups scan from the head, so the first inserted duplicate wins.
//! - Single-threaded: no internal locking. Mutation needs `&mut`, so callers
//!   wanting concurrency serialize externally or keep one table per thread.
//! - The hasher runs mid-operation. It can only reach the table through a
//!   shared reference, so at most it nests `lookup`s, which are plain reads.
//!
//! Clients
//! - `dictionary` loads newline-delimited word lists and tallies collisions.
//! - `dump` prints every payload in slot and chain order.
//! - The `wordtable` binary (feature `cli`) drives both from a shell.

pub mod dictionary;
pub mod dump;
mod error;
pub mod hasher;
mod payload;
mod stats;
mod table;
mod table_proptest;

pub use error::{DictionaryError, TableError};
pub use hasher::{BuildSlotHasher, PjwHash, SlotHasher};
pub use payload::{truncate, Overlong, KEY_CAPACITY, MAX_KEY_LEN};
pub use stats::ChainStats;
pub use table::{ChainedHashTable, Chain, Insertion, Iter};
