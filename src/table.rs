//! ChainedHashTable: fixed slot count, arena-owned chains, pluggable hasher.

use crate::error::TableError;
use crate::hasher::{PjwHash, SlotHasher};
use crate::payload::{Overlong, Payload, MAX_KEY_LEN};
use crate::stats::ChainStats;
use core::fmt;
use log::{debug, trace, warn};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    struct EntryKey;
}

/// `SlotMap` refuses to grow past `u32::MAX - 1` live keys.
const ENTRY_LIMIT: usize = u32::MAX as usize - 1;

/// Head and tail of one slot's chain. Both `None` when the slot is empty.
#[derive(Copy, Clone, Debug, Default)]
struct Bucket {
    head: Option<EntryKey>,
    tail: Option<EntryKey>,
}

#[derive(Debug)]
struct Entry {
    payload: Payload,
    next: Option<EntryKey>,
}

/// Storage of an initialized table. Every entry is owned by `entries`;
/// buckets and `next` links only hold keys into it.
struct Slots<H> {
    hasher: H,
    buckets: Vec<Bucket>,
    entries: SlotMap<EntryKey, Entry>,
}

/// Outcome of a successful [`ChainedHashTable::insert`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Insertion {
    /// Slot the entry was appended to.
    pub slot: usize,
    /// The slot already held at least one entry.
    pub collision: bool,
    /// The key was longer than `MAX_KEY_LEN` and only a prefix was stored.
    pub truncated: bool,
}

/// Fixed-capacity separate-chaining hash table of short string keys.
///
/// A table starts uninitialized. [`initialize`](Self::initialize) allocates
/// the slots and installs the hasher; [`teardown`](Self::teardown) (or drop)
/// releases everything. The slot count never changes while initialized.
///
/// Keys are their own values: `lookup` returns the stored payload. Duplicate
/// keys are kept as separate entries, and since chains grow at the tail and
/// are scanned from the head, the first inserted duplicate is the one found.
pub struct ChainedHashTable<H = PjwHash> {
    slots: Option<Slots<H>>,
    overlong: Overlong,
}

impl<H> ChainedHashTable<H> {
    /// An uninitialized table that truncates overlong keys.
    pub const fn new() -> Self {
        Self {
            slots: None,
            overlong: Overlong::Truncate,
        }
    }

    /// Sets the policy for keys longer than `MAX_KEY_LEN`.
    pub fn overlong_keys(mut self, policy: Overlong) -> Self {
        self.overlong = policy;
        self
    }

    /// Changes the overlong-key policy for later inserts.
    pub fn set_overlong_keys(&mut self, policy: Overlong) {
        self.overlong = policy;
    }

    /// The current overlong-key policy.
    pub fn overlong_policy(&self) -> Overlong {
        self.overlong
    }

    /// Drops every entry and the slot array. No-op when uninitialized.
    pub fn teardown(&mut self) {
        // Detach first so the structure is consistent while `H` drops.
        if let Some(old) = self.slots.take() {
            debug!(
                "tearing down table: {} slots, {} entries",
                old.buckets.len(),
                old.entries.len()
            );
            drop(old);
        }
    }

    /// Slot count; 0 when uninitialized.
    pub fn size(&self) -> usize {
        self.slots.as_ref().map_or(0, |s| s.buckets.len())
    }

    /// Number of stored entries; 0 when uninitialized.
    pub fn occupancy(&self) -> usize {
        self.slots.as_ref().map_or(0, |s| s.entries.len())
    }

    /// True when no entries are stored, including when uninitialized.
    pub fn is_empty(&self) -> bool {
        self.occupancy() == 0
    }

    /// True between a successful `initialize` and the next `teardown`.
    pub fn is_initialized(&self) -> bool {
        self.slots.is_some()
    }

    /// The active hasher, if initialized.
    pub fn hasher(&self) -> Option<&H> {
        self.slots.as_ref().map(|s| &s.hasher)
    }

    /// Every payload, in slot order and then chain (insertion) order.
    pub fn iter(&self) -> Iter<'_> {
        match &self.slots {
            Some(s) => Iter {
                buckets: s.buckets.iter(),
                chain: Chain {
                    entries: Some(&s.entries),
                    cursor: None,
                },
            },
            None => Iter {
                buckets: Default::default(),
                chain: Chain::empty(),
            },
        }
    }

    /// The chain stored in `slot`, head first. Empty for an out-of-range slot
    /// or an uninitialized table.
    pub fn chain(&self, slot: usize) -> Chain<'_> {
        match &self.slots {
            Some(s) => Chain {
                entries: Some(&s.entries),
                cursor: s.buckets.get(slot).and_then(|b| b.head),
            },
            None => Chain::empty(),
        }
    }

    /// Number of entries chained in `slot`.
    pub fn chain_len(&self, slot: usize) -> usize {
        self.chain(slot).count()
    }

    /// Walks every chain to summarize the slot distribution.
    pub fn stats(&self) -> ChainStats {
        ChainStats::from_chain_lengths((0..self.size()).map(|slot| self.chain_len(slot)))
    }

    /// Panics unless every chain is well formed and the entry count matches
    /// what the chains reach.
    #[cfg(test)]
    pub(crate) fn assert_chains_consistent(&self) {
        let Some(s) = &self.slots else {
            return;
        };
        let mut reachable = 0;
        for (slot, bucket) in s.buckets.iter().enumerate() {
            match (bucket.head, bucket.tail) {
                (None, None) => {}
                (Some(head), Some(tail)) => {
                    let mut cursor = head;
                    loop {
                        reachable += 1;
                        match s.entries[cursor].next {
                            Some(next) => cursor = next,
                            None => break,
                        }
                    }
                    assert_eq!(cursor, tail, "slot {slot}: chain does not end at tail");
                }
                _ => panic!("slot {slot}: head and tail disagree on emptiness"),
            }
        }
        assert_eq!(reachable, s.entries.len(), "unreachable entries in arena");
    }
}

impl<H: SlotHasher> ChainedHashTable<H> {
    /// Creates and initializes a table in one step.
    pub fn with_slots(slot_count: usize, hasher: H) -> Result<Self, TableError> {
        let mut table = Self::new();
        table.initialize(slot_count, hasher)?;
        Ok(table)
    }

    /// Discards any current contents and allocates `slot_count` empty slots
    /// hashed with `hasher`.
    ///
    /// On failure the table is left uninitialized.
    pub fn initialize(&mut self, slot_count: usize, hasher: H) -> Result<(), TableError> {
        self.teardown();
        if slot_count == 0 {
            return Err(TableError::ZeroSlots);
        }

        let mut buckets = Vec::new();
        buckets
            .try_reserve_exact(slot_count)
            .map_err(|source| TableError::BucketAllocation { slot_count, source })?;
        buckets.resize(slot_count, Bucket::default());

        self.slots = Some(Slots {
            hasher,
            buckets,
            entries: SlotMap::with_key(),
        });
        debug!("initialized table with {slot_count} slots");
        Ok(())
    }

    /// Appends `key` to the chain of the slot it hashes to.
    ///
    /// The slot is computed from the stored payload, so a truncated key is
    /// later found by its stored prefix. On error nothing is modified.
    pub fn insert(&mut self, key: &str) -> Result<Insertion, TableError> {
        let slots = self.slots.as_mut().ok_or(TableError::Uninitialized)?;

        if self.overlong == Overlong::Reject && key.len() > MAX_KEY_LEN {
            return Err(TableError::KeyTooLong {
                len: key.len(),
                max: MAX_KEY_LEN,
            });
        }
        let (payload, truncated) = Payload::new(key);

        let slot_count = slots.buckets.len();
        let slot = slots.hasher.slot(payload.as_str(), slot_count);
        if slot >= slot_count {
            warn!("hasher returned slot {slot} for a table of {slot_count} slots");
            return Err(TableError::SlotOutOfRange { slot, slot_count });
        }
        if slots.entries.len() >= ENTRY_LIMIT {
            return Err(TableError::EntryArenaFull { limit: ENTRY_LIMIT });
        }

        let id = slots.entries.insert(Entry {
            payload,
            next: None,
        });
        let bucket = &mut slots.buckets[slot];
        let collision = match bucket.tail.replace(id) {
            None => {
                bucket.head = Some(id);
                false
            }
            Some(tail) => {
                slots.entries[tail].next = Some(id);
                true
            }
        };
        if collision {
            trace!("collision in slot {slot} for {:?}", payload);
        }

        Ok(Insertion {
            slot,
            collision,
            truncated,
        })
    }

    /// Finds the first stored payload equal to `key`.
    ///
    /// Not-found for an uninitialized table and for keys longer than
    /// `MAX_KEY_LEN`, which can never be stored whole.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        let slots = self.slots.as_ref()?;
        if key.len() > MAX_KEY_LEN {
            return None;
        }

        let slot_count = slots.buckets.len();
        let slot = slots.hasher.slot(key, slot_count);
        let Some(bucket) = slots.buckets.get(slot) else {
            warn!("hasher returned slot {slot} for a table of {slot_count} slots");
            return None;
        };
        Chain {
            entries: Some(&slots.entries),
            cursor: bucket.head,
        }
        .find(|&payload| payload == key)
    }

    /// Shorthand for `self.lookup(key).is_some()`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }
}

impl<H> Default for ChainedHashTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for ChainedHashTable<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainedHashTable")
            .field("size", &self.size())
            .field("occupancy", &self.occupancy())
            .field("overlong", &self.overlong)
            .finish()
    }
}

impl<'a, H> IntoIterator for &'a ChainedHashTable<H> {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Iterator over one slot's chain, head to tail.
#[derive(Clone, Debug)]
pub struct Chain<'a> {
    entries: Option<&'a SlotMap<EntryKey, Entry>>,
    cursor: Option<EntryKey>,
}

impl Chain<'_> {
    fn empty() -> Self {
        Chain {
            entries: None,
            cursor: None,
        }
    }
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<&'a str> {
        let entry = self.entries?.get(self.cursor?)?;
        self.cursor = entry.next;
        Some(entry.payload.as_str())
    }
}

/// Iterator over every payload of a table, see [`ChainedHashTable::iter`].
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    buckets: core::slice::Iter<'a, Bucket>,
    chain: Chain<'a>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            if let Some(payload) = self.chain.next() {
                return Some(payload);
            }
            self.chain.cursor = self.buckets.next()?.head;
        }
    }
}
