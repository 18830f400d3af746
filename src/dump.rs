//! Diagnostic dump of a table's payloads.

use crate::table::ChainedHashTable;
use std::io::{self, Write};

/// Writes every stored payload on its own line, in slot order and then chain
/// order. Returns the number of lines written.
pub fn dump<H, W: Write>(table: &ChainedHashTable<H>, mut out: W) -> io::Result<usize> {
    let mut lines = 0;
    for payload in table {
        writeln!(out, "{payload}")?;
        lines += 1;
    }
    out.flush()?;
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::dump;
    use crate::{ChainedHashTable, PjwHash};

    #[test]
    fn uninitialized_table_dumps_nothing() {
        let t: ChainedHashTable<PjwHash> = ChainedHashTable::new();
        let mut out = Vec::new();
        assert_eq!(dump(&t, &mut out).unwrap(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn dumps_chain_order_within_a_slot() {
        let mut t = ChainedHashTable::with_slots(1, |_: &str, _: usize| 0usize).unwrap();
        for k in ["zeta", "alpha", "zeta", "mid"] {
            t.insert(k).unwrap();
        }
        let mut out = Vec::new();
        assert_eq!(dump(&t, &mut out).unwrap(), 4);
        assert_eq!(String::from_utf8(out).unwrap(), "zeta\nalpha\nzeta\nmid\n");
    }
}
