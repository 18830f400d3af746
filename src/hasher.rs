//! Slot hashing: the capability a table uses to place and find keys.

use core::hash::BuildHasher;

/// Maps a key to a slot of a table with `slot_count` buckets.
///
/// Implementations perform the modulo reduction themselves; the table does
/// not re-reduce. A slot outside `0..slot_count` is a contract violation that
/// the table reports (`TableError::SlotOutOfRange` on insert, not-found on
/// lookup) rather than indexing out of bounds.
///
/// Any `Fn(&str, usize) -> usize` is a `SlotHasher`, so plain functions and
/// closures can be injected directly.
pub trait SlotHasher {
    fn slot(&self, key: &str, slot_count: usize) -> usize;
}

impl<F> SlotHasher for F
where
    F: Fn(&str, usize) -> usize,
{
    #[inline]
    fn slot(&self, key: &str, slot_count: usize) -> usize {
        self(key, slot_count)
    }
}

/// P. J. Weinberger's shift-and-fold string hash, the table's default.
///
/// Each byte is added after shifting the accumulator left by four bits.
/// Whenever the top nibble becomes non-zero it is folded back into the low
/// bits and cleared. The constants match the classic 32-bit formulation, so
/// bucket distribution is bit-compatible with it for ASCII keys.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct PjwHash;

impl PjwHash {
    const HIGH_NIBBLE: u32 = 0xf000_0000;

    /// The unreduced 32-bit hash of `key`.
    pub fn raw(key: &str) -> u32 {
        key.bytes().fold(0u32, |acc, b| {
            let mut result = (acc << 4).wrapping_add(u32::from(b));
            let high = result & Self::HIGH_NIBBLE;
            if high != 0 {
                result ^= high >> 24;
                result ^= high;
            }
            result
        })
    }
}

impl SlotHasher for PjwHash {
    #[inline]
    fn slot(&self, key: &str, slot_count: usize) -> usize {
        Self::raw(key) as usize % slot_count
    }
}

/// Adapts a std [`BuildHasher`] (e.g. `RandomState`) into a `SlotHasher` by
/// reducing its 64-bit output modulo the slot count.
#[derive(Clone, Debug, Default)]
pub struct BuildSlotHasher<S>(pub S);

impl<S: BuildHasher> SlotHasher for BuildSlotHasher<S> {
    #[inline]
    fn slot(&self, key: &str, slot_count: usize) -> usize {
        (self.0.hash_one(key) % slot_count as u64) as usize
    }
}
