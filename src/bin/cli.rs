//! StrataKV CLI
//!
//! Command-line interface for inspecting and editing a store on disk.

use std::process::ExitCode;

use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use stratakv::config::parse_pair;
use stratakv::{Config, ConfigValue, Store};
use tracing_subscriber::{fmt, EnvFilter};

/// StrataKV CLI
#[derive(Parser, Debug)]
#[command(name = "stratakv")]
#[command(about = "Read and write an embedded key-value store")]
#[command(version)]
struct Args {
    /// Store directory
    #[arg(short, long, default_value = "./stratakv_data")]
    db: String,

    /// Create the store if it does not exist
    #[arg(long)]
    create_if_missing: bool,

    /// Fail if the store already exists
    #[arg(long)]
    error_if_exists: bool,

    /// Disable block compression
    #[arg(long)]
    no_compression: bool,

    /// Sync every write to disk
    #[arg(long)]
    sync: bool,

    /// Extra engine option as key=value (repeatable)
    #[arg(short = 'o', long = "option", value_parser = parse_pair)]
    options: Vec<(String, ConfigValue)>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Put {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Delete a key
    Delete {
        /// The key to delete
        key: String,
    },

    /// List entries in key order
    Scan {
        /// Start at the first key >= this one
        #[arg(long)]
        from: Option<String>,

        /// Walk from the largest key down
        #[arg(long)]
        reverse: bool,

        /// Stop after this many entries
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Apply several puts and deletes atomically, in command-line order
    Batch {
        /// key=value to put (repeatable)
        #[arg(long = "put", value_parser = parse_kv)]
        puts: Vec<(String, String)>,

        /// key to delete (repeatable)
        #[arg(long = "delete")]
        deletes: Vec<String>,
    },

    /// Delete all on-disk state of the store
    Destroy,

    /// Reopen the store so the engine replays its logs
    Repair,
}

/// Log filter used when `RUST_LOG` is not set
const DEFAULT_LOG_FILTER: &str = "info,stratakv=debug";

/// One edit of a `batch` command
#[derive(Debug, Clone, PartialEq, Eq)]
enum BatchEdit {
    Put(String, String),
    Delete(String),
}

fn parse_kv(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{s}`"))
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let matches = Args::command().get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
    tracing::debug!("StrataKV CLI v{}", stratakv::VERSION);

    match run(args, &matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Per-call configs built from the global flags
///
/// Every `-o key=value` goes to all three; each options type ignores the keys
/// it does not recognize.
struct Configs {
    open: Config,
    read: Config,
    write: Config,
}

impl Configs {
    fn from_args(args: &Args) -> Self {
        let mut configs = Self {
            open: Config::new()
                .set("create_if_missing", args.create_if_missing)
                .set("error_if_exists", args.error_if_exists)
                .set("compression", !args.no_compression),
            read: Config::new(),
            write: Config::new().set("sync", args.sync),
        };
        for (key, value) in &args.options {
            configs.open.insert(key.clone(), *value);
            configs.read.insert(key.clone(), *value);
            configs.write.insert(key.clone(), *value);
        }
        configs
    }
}

/// Merge `--put` and `--delete` values back into the order they were given
///
/// clap collects each flag into its own list, so the order comes from the
/// argument indices of the `batch` subcommand.
fn batch_edits(
    matches: &ArgMatches,
    puts: Vec<(String, String)>,
    deletes: Vec<String>,
) -> Vec<BatchEdit> {
    let batch = matches.subcommand_matches("batch");
    let indices = |id: &str| -> Vec<usize> {
        batch
            .and_then(|m| m.indices_of(id))
            .map(|i| i.collect())
            .unwrap_or_default()
    };

    let mut edits: Vec<(usize, BatchEdit)> = indices("puts")
        .into_iter()
        .zip(puts)
        .map(|(i, (k, v))| (i, BatchEdit::Put(k, v)))
        .chain(
            indices("deletes")
                .into_iter()
                .zip(deletes)
                .map(|(i, k)| (i, BatchEdit::Delete(k))),
        )
        .collect();
    edits.sort_by_key(|(i, _)| *i);
    edits.into_iter().map(|(_, edit)| edit).collect()
}

fn run(args: Args, matches: &ArgMatches) -> stratakv::Result<()> {
    let configs = Configs::from_args(&args);

    match args.command {
        Commands::Destroy => stratakv::destroy_store(&args.db, &configs.open)?,
        Commands::Repair => stratakv::repair_store(&args.db, &configs.open)?,
        command => {
            let store = Store::open(&args.db, &configs.open)?;
            return run_command(&store, command, &configs, matches);
        }
    }
    println!("OK");
    Ok(())
}

fn run_command(
    store: &Store,
    command: Commands,
    configs: &Configs,
    matches: &ArgMatches,
) -> stratakv::Result<()> {
    let Configs {
        read: read_config,
        write: write_config,
        ..
    } = configs;

    match command {
        Commands::Get { key } => match store.get(key.as_bytes(), read_config)? {
            Some(value) => println!("{}", String::from_utf8_lossy(&value)),
            None => println!("(not found)"),
        },
        Commands::Put { key, value } => {
            store.put(key.as_bytes(), value.as_bytes(), write_config)?;
            println!("OK");
        }
        Commands::Delete { key } => {
            store.delete(key.as_bytes(), write_config)?;
            println!("OK");
        }
        Commands::Scan {
            from,
            reverse,
            limit,
        } => {
            let mut iter = store.iterator(read_config)?;
            match (&from, reverse) {
                (Some(start), _) => iter.seek(start.as_bytes()),
                (None, false) => iter.seek_to_first(),
                (None, true) => iter.seek_to_last(),
            }
            let limit = limit.unwrap_or(usize::MAX);
            let mut printed = 0;
            while printed < limit {
                let entry = if reverse { iter.retreat() } else { iter.advance() };
                let Some((key, value)) = entry else { break };
                println!(
                    "{}\t{}",
                    String::from_utf8_lossy(&key),
                    String::from_utf8_lossy(&value)
                );
                printed += 1;
            }
        }
        Commands::Batch { puts, deletes } => {
            let mut batch = store.batch(write_config)?;
            for edit in batch_edits(matches, puts, deletes) {
                match edit {
                    BatchEdit::Put(key, value) => batch.put(key.as_bytes(), value.as_bytes()),
                    BatchEdit::Delete(key) => batch.delete(key.as_bytes()),
                };
            }
            batch.write()?;
            println!("OK ({} operations)", batch.len());
        }
        // admin commands never reach an open store
        Commands::Destroy | Commands::Repair => {}
    }

    Ok(())
}
