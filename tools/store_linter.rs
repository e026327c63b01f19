//! Store Linter: validates name store files.
//!
//! Usage: store_linter <store_file_or_dir> [--config <path>]
//!
//! Errors: duplicate ids, empty names, fields over their length limit.
//! Warnings: unusual kinds, names with no configured vowel.

use clap::Parser;
use name_engine::core::config::{CharClasses, NameConfig};
use name_engine::core::store::NameStore;
use name_engine::schema::name::{NameRecord, KIND_GIVEN, KIND_SURNAME};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Debug, Parser)]
#[command(name = "store_linter", about = "Validate name store files", version)]
struct LinterArgs {
    /// Store file, or a directory searched recursively for `.ron` files.
    #[arg(value_name = "store_file_or_dir")]
    store: PathBuf,
    /// Config file, or a directory holding `name_engine.ron`.
    #[arg(long, value_name = "path")]
    config: Option<PathBuf>,
}

fn main() {
    let args = LinterArgs::parse();
    let store_path = args.store.as_path();

    let config = match std::env::current_dir() {
        Ok(cwd) => NameConfig::load_from(&cwd, args.config.as_deref()),
        Err(e) => {
            eprintln!("ERROR: Cannot read working directory: {}", e);
            process::exit(1);
        }
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: Failed to load config: {}", e);
            process::exit(1);
        }
    };

    let mut files = Vec::new();
    if store_path.is_file() {
        files.push(store_path.to_path_buf());
    } else if store_path.is_dir() {
        collect_ron_files(store_path, &mut files);
    } else {
        eprintln!("ERROR: Path '{}' does not exist", store_path.display());
        process::exit(1);
    }

    let mut total_errors = 0;
    let mut total_warnings = 0;
    for file in &files {
        let contents = match std::fs::read_to_string(file) {
            Ok(contents) => contents,
            Err(e) => {
                eprintln!("ERROR: Failed to read {}: {}", file.display(), e);
                total_errors += 1;
                continue;
            }
        };
        let records = match NameStore::parse_records(&contents) {
            Ok(records) => records,
            Err(e) => {
                eprintln!("ERROR: Failed to parse {}: {}", file.display(), e);
                total_errors += 1;
                continue;
            }
        };

        println!("Loaded {} records from {}", records.len(), file.display());
        let (errors, warnings) = lint_records(&records, &config.classes);

        println!("\n=== Name Store Lint Report: {} ===\n", file.display());
        if errors.is_empty() && warnings.is_empty() {
            println!("All checks passed!");
        }
        for warning in &warnings {
            println!("WARNING: {}", warning);
        }
        for error in &errors {
            println!("ERROR: {}", error);
        }
        println!();

        total_errors += errors.len();
        total_warnings += warnings.len();
    }

    println!(
        "Summary: {} files, {} errors, {} warnings",
        files.len(),
        total_errors,
        total_warnings
    );

    if total_errors == 0 {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn collect_ron_files(dir: &Path, files: &mut Vec<PathBuf>) {
    if let Ok(entries) = std::fs::read_dir(dir) {
        let mut paths: Vec<PathBuf> = entries.flatten().map(|entry| entry.path()).collect();
        paths.sort();
        for path in paths {
            if path.is_dir() {
                collect_ron_files(&path, files);
            } else if path.extension().and_then(|s| s.to_str()) == Some("ron") {
                files.push(path);
            }
        }
    }
}

fn lint_records(records: &[NameRecord], classes: &CharClasses) -> (Vec<String>, Vec<String>) {
    let mut errors: Vec<String> = NameStore::problems(records)
        .iter()
        .map(ToString::to_string)
        .collect();
    let mut warnings = Vec::new();

    for record in records {
        if record.name.is_empty() {
            errors.push(format!("Record {} has an empty name", record.id));
            continue;
        }

        if record.kind != KIND_GIVEN && record.kind != KIND_SURNAME {
            warnings.push(format!(
                "Record {} ('{}') has kind '{}' (expected '{}' or '{}')",
                record.id, record.name, record.kind, KIND_GIVEN, KIND_SURNAME
            ));
        }

        // Without a vowel the whole name is one syllable.
        if !record.name.chars().any(|c| classes.vowels.contains(c)) {
            warnings.push(format!(
                "Record {} ('{}') contains no configured vowel and will never split",
                record.id, record.name
            ));
        }
    }

    (errors, warnings)
}
