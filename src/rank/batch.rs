//! Ranking many profiles against one shared catalog snapshot.
//!
//! Each pass is independent and the catalog is read-only, so passes run in
//! parallel without locking.

use rayon::prelude::*;
use tracing::info;

use crate::domain::{Catalog, RankedResult, StudentProfile};
use crate::error::MatchError;
use crate::rank::rank_programs;

/// Aggregate view of one program across a cohort.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramTally {
    pub university: String,
    pub program: String,
    /// Students for whom this program ranked first.
    pub top_matches: usize,
    pub mean_score: f64,
}

/// Rank every profile; output order matches input order.
///
/// Fails if any single pass fails.
pub fn rank_many(
    students: &[StudentProfile],
    catalog: &Catalog,
) -> Result<Vec<Vec<RankedResult>>, MatchError> {
    let rankings = students
        .par_iter()
        .map(|student| rank_programs(student, catalog))
        .collect::<Result<Vec<_>, _>>()?;

    info!(students = students.len(), "cohort ranking complete");
    Ok(rankings)
}

/// Per-program top-match counts and mean scores, most popular first.
///
/// Programs keep catalog order when counts and means tie.
pub fn summarize_cohort(catalog: &Catalog, rankings: &[Vec<RankedResult>]) -> Vec<ProgramTally> {
    let mut tallies: Vec<(ProgramTally, f64)> = catalog
        .programs()
        .map(|(inst, program)| {
            (
                ProgramTally {
                    university: inst.name.clone(),
                    program: program.name.clone(),
                    top_matches: 0,
                    mean_score: 0.0,
                },
                0.0,
            )
        })
        .collect();

    for ranking in rankings {
        for (idx, result) in ranking.iter().enumerate() {
            let Some((tally, total)) = tallies
                .iter_mut()
                .find(|(t, _)| t.university == result.university && t.program == result.program)
            else {
                continue;
            };
            *total += result.score;
            if idx == 0 {
                tally.top_matches += 1;
            }
        }
    }

    let n = rankings.len().max(1) as f64;
    let mut out: Vec<ProgramTally> = tallies
        .into_iter()
        .map(|(mut tally, total)| {
            tally.mean_score = total / n;
            tally
        })
        .collect();

    out.sort_by(|a, b| {
        b.top_matches.cmp(&a.top_matches).then(
            b.mean_score
                .partial_cmp(&a.mean_score)
                .unwrap_or(std::cmp::Ordering::Equal),
        )
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BuiltinCatalog, CatalogProvider};
    use std::collections::BTreeSet;

    fn student(grade_level: u8, average: f64, interests: &[&str]) -> StudentProfile {
        StudentProfile {
            grade_level,
            average,
            wants_coop: true,
            extra_curriculars: vec![],
            major_interests: interests.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
            courses_taken: vec![],
        }
    }

    #[test]
    fn parallel_matches_sequential() {
        let catalog = BuiltinCatalog.load().unwrap();
        let students = vec![
            student(9, 85.0, &["software"]),
            student(12, 96.0, &["health", "biology"]),
            student(11, 78.0, &["business"]),
        ];

        let batch = rank_many(&students, &catalog).unwrap();
        assert_eq!(batch.len(), students.len());
        for (s, ranked) in students.iter().zip(&batch) {
            assert_eq!(ranked, &rank_programs(s, &catalog).unwrap());
        }
    }

    #[test]
    fn one_bad_profile_fails_the_batch() {
        let catalog = BuiltinCatalog.load().unwrap();
        let students = vec![student(9, 85.0, &[]), student(5, 85.0, &[])];
        assert!(matches!(rank_many(&students, &catalog), Err(MatchError::InvalidProfile(_))));
    }

    #[test]
    fn summary_counts_top_matches() {
        let catalog = BuiltinCatalog.load().unwrap();
        let students = vec![
            student(9, 85.0, &["health", "medicine", "biology", "research"]),
            student(10, 90.0, &["health", "medicine", "biology", "research"]),
        ];
        let rankings = rank_many(&students, &catalog).unwrap();
        let summary = summarize_cohort(&catalog, &rankings);

        assert_eq!(summary.len(), catalog.program_count());
        assert_eq!(summary[0].university, "McMaster University");
        assert_eq!(summary[0].program, "Health Sciences");
        assert_eq!(summary[0].top_matches, 2);
        assert_eq!(summary.iter().map(|t| t.top_matches).sum::<usize>(), 2);
    }
}
