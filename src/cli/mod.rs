//! Command-line parsing for the program matcher.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the scoring code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::CatalogOverrides;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "admit", version, about = "Rank academic programs against a student profile")]
pub struct Cli {
    /// Config file (defaults to ./admit.toml when present).
    #[arg(long, global = true, value_name = "TOML")]
    pub config: Option<PathBuf>,

    /// Log per-program scores (debug level).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Rank every catalog program for one student profile.
    Rank(RankArgs),
    /// Validate a catalog and print what it contains.
    Check(CheckArgs),
    /// Rank a cohort of profiles (from a file or generated) and summarize.
    Cohort(CohortArgs),
}

/// Where to load the catalog from.
#[derive(Debug, Args, Clone, Default)]
pub struct CatalogArgs {
    /// Catalog JSON file.
    #[arg(long, value_name = "JSON")]
    pub catalog: Option<PathBuf>,

    /// Catalog service URL (bearer token from ADMIT_CATALOG_TOKEN).
    #[arg(long, value_name = "URL")]
    pub catalog_url: Option<String>,
}

impl CatalogArgs {
    pub fn overrides(&self) -> CatalogOverrides {
        CatalogOverrides {
            path: self.catalog.clone(),
            url: self.catalog_url.clone(),
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct RankArgs {
    /// Student profile JSON.
    #[arg(short, long, value_name = "JSON")]
    pub profile: PathBuf,

    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Show the top-N matches.
    #[arg(long)]
    pub top: Option<usize>,

    /// Print results as JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    /// Export all ranked results to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export the profile and ranked results to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,
}

#[derive(Debug, Args, Clone)]
pub struct CohortArgs {
    /// Cohort JSON (array of profiles). Generated when omitted.
    #[arg(long, value_name = "JSON")]
    pub profiles: Option<PathBuf>,

    /// Number of synthetic students to generate.
    #[arg(short = 'n', long, default_value_t = 100)]
    pub count: usize,

    /// Random seed for cohort generation.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Show the top-N programs.
    #[arg(long)]
    pub top: Option<usize>,
}
