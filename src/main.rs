//! CLI entry point for casedeck
//!
//! Plays a case in the console or checks its scripts.

use casedeck::lint::{self, LintLevel};
use casedeck::{CaseRepository, EngineConfig, FileSystemCaseRepository, storage};
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().collect();
    let debug = args.iter().any(|a| a == "--debug");
    init_logging(debug);

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "play" => match args.get(2) {
            Some(path) => run_play(Path::new(path), config_path(&args), debug).await,
            None => missing_path(),
        },
        "check" => match args.get(2) {
            Some(path) => run_check(Path::new(path)).await,
            None => missing_path(),
        },
        "list" => run_list(Path::new(args.get(2).map_or(".", String::as_str))).await,
        "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        command => {
            eprintln!("Error: Unknown command '{command}'");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    if let Err(err) = result {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise warnings, or everything down to debug with `--debug`
fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn config_path(args: &[String]) -> Option<PathBuf> {
    args.iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
}

fn missing_path() -> anyhow::Result<()> {
    eprintln!("Error: Missing case file path");
    eprintln!();
    print_usage();
    process::exit(1);
}

fn print_usage() {
    println!("casedeck - courtroom visual novel player");
    println!();
    println!("USAGE:");
    println!("    casedeck play <case.json> [--config <config.json>] [--debug]");
    println!("    casedeck check <case.json>");
    println!("    casedeck list [directory]");
    println!();
    println!("COMMANDS:");
    println!("    play <file>     Play a case in the console");
    println!("    check <file>    Lint the case's scripts; fails on errors");
    println!("    list [dir]      List the cases in a directory");
    println!("    --help, -h      Show this help message");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Engine configuration (JSON)");
    println!("    --debug            Print the game state after every input");
}

/// Split a case path into the repository directory and the case name
fn repository_for(path: &Path) -> anyhow::Result<(FileSystemCaseRepository, String)> {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow::anyhow!("'{}' is not a case file", path.display()))?;
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let repo = FileSystemCaseRepository::new(dir.unwrap_or(Path::new(".")));
    Ok((repo, name.to_string()))
}

async fn load(path: &Path) -> anyhow::Result<storage::CaseFile> {
    let (repo, name) = repository_for(path)?;
    Ok(repo.load_case(&name).await?)
}

async fn run_play(path: &Path, config: Option<PathBuf>, debug: bool) -> anyhow::Result<()> {
    let file = load(path).await?;
    let config = match config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    casedeck::cli::play::run_play(file, config, debug)
}

async fn run_check(path: &Path) -> anyhow::Result<()> {
    let file = load(path).await?;
    let result = lint::lint(&file.case);

    for issue in &result.issues {
        match issue.level {
            LintLevel::Error => eprintln!("{issue}"),
            LintLevel::Warning | LintLevel::Info => println!("{issue}"),
        }
    }
    println!(
        "{}: {} errors, {} warnings, {} notes",
        path.display(),
        result.error_count,
        result.warning_count,
        result.info_count
    );

    if result.has_errors() {
        anyhow::bail!("{} has script errors", path.display());
    }
    Ok(())
}

async fn run_list(dir: &Path) -> anyhow::Result<()> {
    let repo = FileSystemCaseRepository::new(dir);
    for name in repo.list_cases().await? {
        println!("{name}");
    }
    Ok(())
}
