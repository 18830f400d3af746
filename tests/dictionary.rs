use chained_hashtable::dictionary::{build_dictionary_with_slots, load_words};
use chained_hashtable::dump::dump;
use chained_hashtable::{ChainedHashTable, DictionaryError, PjwHash, TableError};
use std::io::{Cursor, Write};

const WORDS: &[&str] = &[
    "aardvark", "abacus", "abandon", "bramble", "cactus", "dandelion", "eel", "fjord",
];

fn word_file(lines: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().expect("temp file");
    f.write_all(lines.as_bytes()).expect("write words");
    f.flush().expect("flush words");
    f
}

#[test]
fn build_from_crlf_file() {
    let contents: String = WORDS.iter().map(|w| format!("{w}\r\n")).collect();
    let file = word_file(&contents);

    let (table, report) = build_dictionary_with_slots(file.path(), 1009).unwrap();
    assert_eq!(report.words, WORDS.len());
    assert_eq!(report.skipped, 0);
    assert_eq!(table.size(), 1009);
    assert_eq!(table.occupancy(), WORDS.len());
    for w in WORDS {
        assert_eq!(table.lookup(w), Some(*w));
    }
    assert_eq!(report.collisions, table.stats().collisions());
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = build_dictionary_with_slots(dir.path().join("absent.txt"), 8).unwrap_err();
    assert!(matches!(err, DictionaryError::Io(_)));
}

#[test]
fn zero_slots_is_init_error() {
    let file = word_file("a\n");
    let err = build_dictionary_with_slots(file.path(), 0).unwrap_err();
    assert!(matches!(err, DictionaryError::Init(TableError::ZeroSlots)));
    assert_eq!(err.to_string(), "could not initialize table");
    let source = std::error::Error::source(&err).expect("init error has a source");
    assert_eq!(source.to_string(), "a hash table needs at least one slot");
}

#[test]
fn dump_lists_every_loaded_word_once() {
    let mut t = ChainedHashTable::with_slots(3, PjwHash).unwrap();
    let input: String = WORDS.iter().map(|w| format!("{w}\n")).collect();
    load_words(&mut t, Cursor::new(input)).unwrap();

    let mut out = Vec::new();
    let lines = dump(&t, &mut out).unwrap();
    assert_eq!(lines, WORDS.len());

    let text = String::from_utf8(out).unwrap();
    let mut dumped: Vec<&str> = text.lines().collect();
    dumped.sort_unstable();
    let mut expected = WORDS.to_vec();
    expected.sort_unstable();
    assert_eq!(dumped, expected);
}

#[test]
fn load_into_populated_table_accumulates() {
    let mut t = ChainedHashTable::with_slots(1, PjwHash).unwrap();
    let first = load_words(&mut t, Cursor::new("x\ny\n")).unwrap();
    let second = load_words(&mut t, Cursor::new("z\n")).unwrap();
    assert_eq!(first.collisions, 1);
    assert_eq!(second.collisions, 1);
    assert_eq!(t.occupancy(), 3);
}
