//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and loads the optional config file
//! - loads one catalog snapshot
//! - ranks a profile (or a cohort)
//! - prints tables or JSON and writes optional exports

use clap::Parser;
use tracing::debug;

use crate::cli::{CheckArgs, Cli, CohortArgs, Command, RankArgs};
use crate::config::{FileConfig, resolve_top};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `admit` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    crate::logging::init(cli.verbose);

    let file = FileConfig::discover(cli.config.as_deref())?;
    debug!(
        config = ?cli.config,
        top = ?file.output.top,
        catalog_path = ?file.catalog.path,
        "configuration loaded"
    );

    match cli.command {
        Command::Rank(args) => handle_rank(args, &file),
        Command::Check(args) => handle_check(args, &file),
        Command::Cohort(args) => handle_cohort(args, &file),
    }
}

fn handle_rank(args: RankArgs, file: &FileConfig) -> Result<(), AppError> {
    let run = pipeline::run_rank(&args.profile, &args.catalog, file)?;
    let top = resolve_top(args.top, file);

    if args.json {
        let shown = &run.results[..top.min(run.results.len())];
        let json = serde_json::to_string_pretty(shown)
            .map_err(|e| AppError::new(4, format!("Failed to serialize results: {e}")))?;
        println!("{json}");
    } else {
        let source = run.snapshot.source.to_string();
        print!("{}", crate::report::format_profile_summary(&run.student, &source));
        println!("{}", crate::report::format_rankings(&run.results, top));
    }

    if let Some(path) = &args.export {
        crate::io::write_results_csv(path, &run.results)?;
    }
    if let Some(path) = &args.export_json {
        crate::io::write_results_json(path, &run.student, &run.results)?;
    }

    Ok(())
}

fn handle_check(args: CheckArgs, file: &FileConfig) -> Result<(), AppError> {
    let snapshot = pipeline::load_catalog(&args.catalog, file)?;
    println!(
        "{}",
        crate::report::format_catalog_summary(&snapshot.catalog, &snapshot.source.to_string())
    );
    Ok(())
}

fn handle_cohort(args: CohortArgs, file: &FileConfig) -> Result<(), AppError> {
    let run = pipeline::run_cohort(args.profiles.as_deref(), args.count, args.seed, &args.catalog, file)?;
    let top = resolve_top(args.top, file);
    println!("Catalog: {}", run.snapshot.source);
    println!(
        "{}",
        crate::report::format_cohort_summary(&run.summary, run.students.len(), top)
    );
    Ok(())
}
