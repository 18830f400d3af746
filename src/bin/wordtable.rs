//! CLI tool for loading word lists into a chained hash table

use chained_hashtable::dictionary::{load_words, DEFAULT_DICTIONARY_SLOTS};
use chained_hashtable::dump::dump;
use chained_hashtable::{
    BuildSlotHasher, ChainedHashTable, DictionaryError, Overlong, PjwHash, SlotHasher,
};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use log::{info, LevelFilter};
use std::collections::hash_map::RandomState;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Load newline-delimited word lists into a fixed-size chained hash table
#[derive(Parser, Debug)]
#[command(name = "wordtable")]
#[command(about = "Load word lists into a chained hash table and inspect it")]
struct ToolArgs {
    /// Suppress all output except for errors. This overrides the -v flag.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Turn on verbose output. Supply -v multiple times to increase verbosity.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: ToolCommand,
}

#[derive(Args, Debug, Clone)]
struct TableArgs {
    /// Word list, one word per line
    path: PathBuf,

    /// Number of slots in the table
    #[arg(short, long, default_value_t = DEFAULT_DICTIONARY_SLOTS)]
    slots: usize,

    /// Hash function used to place words
    #[arg(long, value_enum, default_value_t = HashKind::Pjw)]
    hash: HashKind,

    /// Fail on words longer than the key limit instead of truncating them
    #[arg(long)]
    reject_long: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum HashKind {
    /// Shift-and-fold PJW hash
    Pjw,
    /// std's randomly seeded SipHash
    Sip,
}

#[derive(Subcommand, Debug, Clone)]
enum ToolCommand {
    /// Load a word list and print collision and chain statistics
    Load {
        #[command(flatten)]
        table: TableArgs,
    },
    /// Load a word list and print every stored word in slot order
    Dump {
        #[command(flatten)]
        table: TableArgs,
    },
    /// Load a word list and check whether words are present
    Lookup {
        #[command(flatten)]
        table: TableArgs,

        /// Words to look up
        #[arg(required = true)]
        words: Vec<String>,
    },
}

impl ToolCommand {
    fn table_args(&self) -> &TableArgs {
        match self {
            ToolCommand::Load { table }
            | ToolCommand::Dump { table }
            | ToolCommand::Lookup { table, .. } => table,
        }
    }
}

/// How a command finished, mapped to the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Success,
    /// `lookup` found at least one word missing.
    WordsMissing,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => ExitCode::SUCCESS,
            Status::WordsMissing => ExitCode::FAILURE,
        }
    }
}

fn init_logging(quiet: bool, verbose: u8) {
    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };
    // RUST_LOG, then WORDTABLE_LOG, override the flag-derived level.
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .parse_env("WORDTABLE_LOG")
        .init();
}

fn execute<H, W>(command: &ToolCommand, hasher: H, mut out: W) -> Result<Status, DictionaryError>
where
    H: SlotHasher,
    W: Write,
{
    let args = command.table_args();
    let policy = if args.reject_long {
        Overlong::Reject
    } else {
        Overlong::Truncate
    };

    let mut table = ChainedHashTable::new().overlong_keys(policy);
    table
        .initialize(args.slots, hasher)
        .map_err(DictionaryError::Init)?;
    let file = File::open(&args.path)?;
    let report = load_words(&mut table, BufReader::new(file))?;
    info!("loaded {} into {table:?}", args.path.display());

    match command {
        ToolCommand::Load { .. } => {
            let stats = table.stats();
            writeln!(out, "words:          {}", report.words)?;
            writeln!(out, "skipped lines:  {}", report.skipped)?;
            writeln!(out, "truncated:      {}", report.truncated)?;
            writeln!(out, "collisions:     {}", report.collisions)?;
            writeln!(out, "slots:          {}", stats.slots)?;
            writeln!(out, "occupied slots: {}", stats.occupied_slots)?;
            writeln!(out, "longest chain:  {}", stats.longest_chain)?;
            writeln!(out, "load factor:    {:.4}", stats.load_factor())?;
            Ok(Status::Success)
        }
        ToolCommand::Dump { .. } => {
            dump(&table, out)?;
            Ok(Status::Success)
        }
        ToolCommand::Lookup { words, .. } => {
            let mut status = Status::Success;
            for word in words {
                if table.contains_key(word) {
                    writeln!(out, "found   {word}")?;
                } else {
                    writeln!(out, "missing {word}")?;
                    status = Status::WordsMissing;
                }
            }
            Ok(status)
        }
    }
}

fn run<W: Write>(command: &ToolCommand, out: W) -> Result<Status, DictionaryError> {
    match command.table_args().hash {
        HashKind::Pjw => execute(command, PjwHash, out),
        HashKind::Sip => execute(command, BuildSlotHasher(RandomState::new()), out),
    }
}

fn main() -> ExitCode {
    let args = ToolArgs::parse();
    init_logging(args.quiet, args.verbose);

    match run(&args.command, io::stdout().lock()) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("error: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
