//! Shared "ranking pipeline" logic used by every subcommand.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! config -> catalog snapshot -> profile(s) -> ranking
//!
//! The subcommands can then focus on presentation (tables, JSON, exports).

use std::path::Path;
use std::sync::Arc;

use crate::catalog::CatalogSource;
use crate::cli::CatalogArgs;
use crate::config::{CatalogEnv, FileConfig, resolve_catalog_source};
use crate::data::generate_cohort;
use crate::domain::{Catalog, RankedResult, StudentProfile};
use crate::error::AppError;
use crate::io::{read_cohort_json, read_profile_json};
use crate::rank::{ProgramTally, rank_many, rank_programs, summarize_cohort};

/// A loaded, immutable catalog and where it came from.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub source: CatalogSource,
    pub catalog: Arc<Catalog>,
}

/// All computed outputs of a single `admit rank` run.
#[derive(Debug, Clone)]
pub struct RankOutput {
    pub snapshot: CatalogSnapshot,
    pub student: StudentProfile,
    pub results: Vec<RankedResult>,
}

/// All computed outputs of a single `admit cohort` run.
#[derive(Debug, Clone)]
pub struct CohortOutput {
    pub snapshot: CatalogSnapshot,
    pub students: Vec<StudentProfile>,
    pub summary: Vec<ProgramTally>,
}

/// Resolve the catalog source and load one snapshot from it.
pub fn load_catalog(args: &CatalogArgs, file: &FileConfig) -> Result<CatalogSnapshot, AppError> {
    let source = resolve_catalog_source(&args.overrides(), &CatalogEnv::from_env(), file)?;
    let catalog = source.load()?;
    Ok(CatalogSnapshot {
        source,
        catalog: Arc::new(catalog),
    })
}

/// Execute the single-profile pipeline.
pub fn run_rank(profile: &Path, catalog: &CatalogArgs, file: &FileConfig) -> Result<RankOutput, AppError> {
    let student = read_profile_json(profile)?;
    let snapshot = load_catalog(catalog, file)?;
    let results = rank_programs(&student, &snapshot.catalog)?;
    Ok(RankOutput {
        snapshot,
        student,
        results,
    })
}

/// Execute the cohort pipeline with profiles from `profiles`, or generated ones.
pub fn run_cohort(
    profiles: Option<&Path>,
    count: usize,
    seed: u64,
    catalog: &CatalogArgs,
    file: &FileConfig,
) -> Result<CohortOutput, AppError> {
    let snapshot = load_catalog(catalog, file)?;
    let students = match profiles {
        Some(path) => read_cohort_json(path)?,
        None => generate_cohort(&snapshot.catalog, count, seed)?,
    };
    let rankings = rank_many(&students, &snapshot.catalog)?;
    let summary = summarize_cohort(&snapshot.catalog, &rankings);
    Ok(CohortOutput {
        snapshot,
        students,
        summary,
    })
}
