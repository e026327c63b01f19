//! namegen: generate names from the command line.
//!
//! Usage:
//!   namegen [--config <path>] [--store <path>] [--seed <n>] <command>
//!
//! Commands:
//!   pick                 draw stored names
//!   compound             join syllables of two stored names
//!   syllable             build names from pooled syllables
//!   list <what>          list names, cultures, genders, kinds or sources
//!   copy-store <dst>     write the bundled store to a file
//!   export <dst>         write the active store to a new file
//!   import <src>         append a store file to a writable store
//!
//! Names go to stdout, one per line. Diagnostics go to stderr and follow
//! `RUST_LOG` (default `name_engine=warn`).

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use name_engine::core::config::NameConfig;
use name_engine::core::engine::{EngineError, NameEngine};
use name_engine::core::mods::SimpleMod;
use name_engine::core::store::{resolve_store_path, NameStore};
use name_engine::schema::filter::NameFilter;
use name_engine::schema::name::{KIND_GIVEN, KIND_SURNAME};

#[derive(Debug, Parser)]
#[command(name = "namegen", about = "Generate names from fragments of real names", version)]
struct Cli {
    /// Config file, or a directory holding `name_engine.ron`.
    #[arg(long, global = true, value_name = "path")]
    config: Option<PathBuf>,
    /// Name store file, or a directory holding `names.ron`.
    #[arg(long, global = true, value_name = "path")]
    store: Option<PathBuf>,
    /// Seed for reproducible output. Seeded from entropy when omitted.
    #[arg(long, global = true, value_name = "n")]
    seed: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Draw names from the store.
    Pick(GenerateArgs),
    /// Join the first syllable of one name to the last syllable of another.
    Compound(GenerateArgs),
    /// Build names from syllables pooled across several stored names.
    Syllable {
        /// Syllables per generated name.
        #[arg(long, default_value_t = 2)]
        syllables: usize,
        #[command(flatten)]
        args: GenerateArgs,
    },
    /// List stored values.
    List {
        #[arg(value_enum)]
        what: Listing,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Copy the bundled name store to a file for editing.
    CopyStore {
        dst: PathBuf,
    },
    /// Write the active store to a new file. Existing files are kept.
    Export {
        dst: PathBuf,
    },
    /// Append the records of a store file to another store, renumbering
    /// them after its highest id.
    Import {
        src: PathBuf,
        /// Store to import into. Defaults to the store namegen would read;
        /// the bundled store is read-only.
        #[arg(long, value_name = "path")]
        into: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Listing {
    Names,
    Cultures,
    Genders,
    Kinds,
    Sources,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// How many names to generate.
    #[arg(long, short = 'n', default_value_t = 1)]
    count: usize,
    /// Mod applied to every generated name.
    #[arg(long = "mod", value_name = "name")]
    modifier: Option<SimpleMod>,
    #[command(flatten)]
    filter: FilterArgs,
}

#[derive(Debug, Args)]
struct FilterArgs {
    /// Only names of this kind.
    #[arg(long, conflicts_with_all = ["given", "surname"])]
    kind: Option<String>,
    /// Shorthand for `--kind given`.
    #[arg(long, conflicts_with = "surname")]
    given: bool,
    /// Shorthand for `--kind surname`.
    #[arg(long)]
    surname: bool,
    #[arg(long)]
    culture: Option<String>,
    #[arg(long)]
    gender: Option<String>,
    #[arg(long)]
    source: Option<String>,
    /// Year; negative for BCE.
    #[arg(long, allow_negative_numbers = true)]
    date: Option<i64>,
}

impl FilterArgs {
    fn to_filter(&self) -> NameFilter {
        let kind = if self.given {
            Some(KIND_GIVEN.to_string())
        } else if self.surname {
            Some(KIND_SURNAME.to_string())
        } else {
            self.kind.clone()
        };
        NameFilter {
            kind,
            culture: self.culture.clone(),
            gender: self.gender.clone(),
            source: self.source.clone(),
            date: self.date,
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("name_engine=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<(), EngineError> {
    match &cli.command {
        Command::CopyStore { dst } => {
            NameStore::copy_bundled_to(dst)?;
            eprintln!("Copied bundled name store to {}", dst.display());
            return Ok(());
        }
        Command::Import { src, into } => {
            let cwd = std::env::current_dir()?;
            let config = NameConfig::load_from(&cwd, cli.config.as_deref())?;
            let configured = config.store_path.as_ref().map(|path| cwd.join(path));
            let explicit = into.as_deref().or(cli.store.as_deref());
            let target = resolve_store_path(explicit, configured.as_deref(), &cwd);
            let added = NameStore::import_file(src, &target)?;
            eprintln!("Imported {added} names from {}", src.display());
            return Ok(());
        }
        _ => {}
    }

    let mut builder = NameEngine::builder();
    if let Some(seed) = cli.seed {
        builder = builder.seed(seed);
    }
    if let Some(config) = cli.config {
        builder = builder.config_path(config);
    }
    if let Some(store) = cli.store {
        builder = builder.store_path(store);
    }
    let mut engine = builder.build()?;

    let lines: Vec<String> = match cli.command {
        Command::Pick(args) => engine.pick_names(&args.filter.to_filter(), args.count, args.modifier)?,
        Command::Compound(args) => engine.compound_names(&args.filter.to_filter(), args.count, args.modifier)?,
        Command::Syllable { syllables, args } => {
            engine.syllable_names(&args.filter.to_filter(), syllables, args.count, args.modifier)?
        }
        Command::List { what, filter } => match what {
            Listing::Names => engine
                .list_names(&filter.to_filter())
                .into_iter()
                .map(str::to_string)
                .collect(),
            Listing::Cultures => engine.cultures().into_iter().collect(),
            Listing::Genders => engine.genders().into_iter().collect(),
            Listing::Kinds => engine.kinds().into_iter().collect(),
            Listing::Sources => engine.sources().into_iter().collect(),
        },
        Command::Export { dst } => {
            engine.store().export_to(&dst)?;
            eprintln!("Exported {} names to {}", engine.store().len(), dst.display());
            Vec::new()
        }
        Command::CopyStore { .. } | Command::Import { .. } => Vec::new(),
    };

    for line in lines {
        println!("{line}");
    }
    Ok(())
}
