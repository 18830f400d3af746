//! Chain-length statistics for a table.

/// Snapshot of how entries are spread over a table's slots.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ChainStats {
    /// Slot count of the table.
    pub slots: usize,
    /// Entries across all chains.
    pub entries: usize,
    /// Slots whose chain is non-empty.
    pub occupied_slots: usize,
    /// Length of the longest chain.
    pub longest_chain: usize,
}

impl ChainStats {
    /// Builds stats from the length of every chain, in slot order.
    pub(crate) fn from_chain_lengths<I>(lengths: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        lengths
            .into_iter()
            .fold(ChainStats::default(), |mut stats, len| {
                stats.slots += 1;
                stats.entries += len;
                if len > 0 {
                    stats.occupied_slots += 1;
                    stats.longest_chain = stats.longest_chain.max(len);
                }
                stats
            })
    }

    /// Inserts that landed in an already occupied slot.
    ///
    /// Entries are never removed, so this equals the number of inserts that
    /// reported a collision.
    pub fn collisions(&self) -> usize {
        self.entries - self.occupied_slots
    }

    /// Entries per slot; 0.0 for a table with no slots.
    pub fn load_factor(&self) -> f64 {
        if self.slots == 0 {
            0.0
        } else {
            self.entries as f64 / self.slots as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ChainStats;

    #[test]
    fn empty_input_is_all_zero() {
        let s = ChainStats::from_chain_lengths([]);
        assert_eq!(s, ChainStats::default());
        assert_eq!(s.collisions(), 0);
        assert_eq!(s.load_factor(), 0.0);
    }

    #[test]
    fn counts_occupied_and_longest() {
        let s = ChainStats::from_chain_lengths([0, 3, 1, 0, 2]);
        assert_eq!(s.slots, 5);
        assert_eq!(s.entries, 6);
        assert_eq!(s.occupied_slots, 3);
        assert_eq!(s.longest_chain, 3);
        assert_eq!(s.collisions(), 3);
        assert!((s.load_factor() - 1.2).abs() < f64::EPSILON);
    }
}
