//! Loading newline-delimited word lists into a table.

use crate::error::DictionaryError;
use crate::hasher::{PjwHash, SlotHasher};
use crate::table::ChainedHashTable;
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Slot count used by [`build_dictionary`].
pub const DEFAULT_DICTIONARY_SLOTS: usize = 20_000_000;

/// Totals gathered while loading a word list.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct LoadReport {
    /// Words inserted.
    pub words: usize,
    /// Inserts that landed in an occupied slot.
    pub collisions: usize,
    /// Words stored as a truncated prefix.
    pub truncated: usize,
    /// Empty lines that were not inserted.
    pub skipped: usize,
}

/// Inserts every line of `reader` into `table`.
///
/// The line terminator (`\n` or `\r\n`) is stripped and empty lines are
/// skipped. Loading stops at the first I/O or table error; words inserted
/// before the failure stay in the table.
pub fn load_words<H, R>(
    table: &mut ChainedHashTable<H>,
    reader: R,
) -> Result<LoadReport, DictionaryError>
where
    H: SlotHasher,
    R: BufRead,
{
    let mut report = LoadReport::default();
    for (idx, line) in reader.lines().enumerate() {
        let word = line?;
        if word.is_empty() {
            report.skipped += 1;
            continue;
        }
        let ins = table
            .insert(&word)
            .map_err(|source| DictionaryError::Table {
                line: idx + 1,
                source,
            })?;
        report.words += 1;
        report.collisions += usize::from(ins.collision);
        report.truncated += usize::from(ins.truncated);
    }
    debug!(
        "loaded {} words ({} collisions, {} truncated, {} skipped)",
        report.words, report.collisions, report.truncated, report.skipped
    );
    Ok(report)
}

/// Loads the word list at `path` into a new table of
/// [`DEFAULT_DICTIONARY_SLOTS`] slots hashed with [`PjwHash`].
pub fn build_dictionary<P: AsRef<Path>>(
    path: P,
) -> Result<(ChainedHashTable<PjwHash>, LoadReport), DictionaryError> {
    build_dictionary_with_slots(path, DEFAULT_DICTIONARY_SLOTS)
}

/// Like [`build_dictionary`] with an explicit slot count.
pub fn build_dictionary_with_slots<P: AsRef<Path>>(
    path: P,
    slot_count: usize,
) -> Result<(ChainedHashTable<PjwHash>, LoadReport), DictionaryError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut table = ChainedHashTable::with_slots(slot_count, PjwHash)
        .map_err(DictionaryError::Init)?;
    let report = load_words(&mut table, BufReader::new(file))?;
    info!(
        "built dictionary from {}: {} words in {} slots",
        path.display(),
        report.words,
        slot_count
    );
    Ok((table, report))
}
