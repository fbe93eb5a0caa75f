//! ccg-catalog - command-line front end over a snapshot file.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use ccg_catalog::{
    default_cards, load_seeds, seed_catalog, Card, CardId, CardService, InMemoryCatalog,
    InMemoryCollectionStore, PackConfig, PackOpener, Snapshot, StateLock, UserId,
};

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "ccg-catalog", version, about = "Browse cards and open packs")]
struct Cli {
    /// Snapshot file holding the catalog and collections
    #[arg(long, global = true, default_value = "ccg-state.bin")]
    state: PathBuf,

    /// Log level (overrides RUST_LOG)
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a fresh snapshot with the stock cards or cards from a JSON file
    Seed {
        #[arg(long)]
        from: Option<PathBuf>,
        /// Replace an existing snapshot, dropping every collection in it
        #[arg(long)]
        force: bool,
    },
    /// List every card
    List,
    /// Show one card
    Show { id: u32 },
    /// Search names, descriptions and rarities
    Search { query: String },
    /// Open a pack for a user
    Open {
        user: u64,
        /// Fixed RNG seed (defaults to CCG_PACK_SEED, then entropy)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List a user's owned cards
    Collection { user: u64 },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_ref());
    debug!(?cli, "parsed arguments");

    match cli.command {
        Command::Seed { from, force } => seed(&cli.state, from, force),
        Command::List => {
            let service = load_service(&cli.state, PackConfig::new())?;
            print_cards(&service.list_catalog()?);
            Ok(())
        }
        Command::Show { id } => {
            let service = load_service(&cli.state, PackConfig::new())?;
            let card = service
                .get_card(CardId::new(id))
                .with_context(|| format!("looking up card {id}"))?;
            print_cards(std::slice::from_ref(&card));
            println!("{}", card.description);
            Ok(())
        }
        Command::Search { query } => {
            let service = load_service(&cli.state, PackConfig::new())?;
            print_cards(&service.search(&query)?);
            Ok(())
        }
        Command::Open { user, seed } => {
            let mut config = PackConfig::from_env()?;
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            // held until the new snapshot is in place
            let _lock = StateLock::acquire(&cli.state)
                .with_context(|| format!("locking {}", cli.state.display()))?;
            let service = load_service(&cli.state, config)?;
            let pack = service
                .open_pack(UserId::new(user))
                .with_context(|| format!("opening a pack for user {user}"))?;

            print_cards(&pack.cards);
            println!(
                "{} new, {} owned",
                pack.newly_added.len(),
                pack.collection_size
            );

            let (catalog, collections) = service.into_inner().into_stores();
            Snapshot::capture(&catalog, &collections)?.save(&cli.state)?;
            Ok(())
        }
        Command::Collection { user } => {
            let service = load_service(&cli.state, PackConfig::new())?;
            print_cards(&service.collection(UserId::new(user))?);
            Ok(())
        }
    }
}

fn init_logging(level: Option<&LogLevel>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level.to_filter_directive()),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn seed(state: &Path, from: Option<PathBuf>, force: bool) -> Result<()> {
    let seeds = match from {
        Some(path) => {
            let file = File::open(&path)
                .with_context(|| format!("opening seed file {}", path.display()))?;
            load_seeds(file).with_context(|| format!("parsing {}", path.display()))?
        }
        None => default_cards(),
    };

    let mut catalog = InMemoryCatalog::new();
    seed_catalog(&mut catalog, seeds)?;

    let _lock = StateLock::acquire(state)
        .with_context(|| format!("locking {}", state.display()))?;
    if state.exists() && !force {
        bail!(
            "{} already exists; pass --force to replace it and its collections",
            state.display()
        );
    }
    Snapshot::capture(&catalog, &InMemoryCollectionStore::new())?
        .save(state)
        .with_context(|| format!("writing {}", state.display()))?;

    println!("done.");
    Ok(())
}

fn load_service(
    state: &Path,
    config: PackConfig,
) -> Result<CardService<InMemoryCatalog, InMemoryCollectionStore>> {
    let snapshot = Snapshot::load(state).with_context(|| {
        format!("reading {} (run `ccg-catalog seed` first)", state.display())
    })?;
    let (catalog, collections) = snapshot.restore()?;
    Ok(CardService::new(PackOpener::new(catalog, collections, config)?))
}

fn print_cards(cards: &[Card]) {
    for card in cards {
        println!(
            "{}\t{}\t{}\t{}",
            card.id.raw(),
            card.name,
            card.rarity.label(),
            card.image
        );
    }
}
