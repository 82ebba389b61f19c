//! Aggregation and ranking.
//!
//! For every `(institution, program)` pair:
//! 1. compute the four component scores
//! 2. `base = academic * w_academic + interest * w_interest + ec * w_ec`
//! 3. `final = base * coop_fit * 100`
//!
//! Results are stably sorted best-first and rescaled when the top score
//! exceeds 100 (the academic bonus can push it there).

use tracing::{debug, info};

use crate::domain::{Catalog, InstitutionRecord, Program, RankedResult, ScoreBreakdown, StudentProfile, Weights};
use crate::error::MatchError;
use crate::scoring::{academic_score, coop_fit, ec_score, interest_score, weights_for_grade};

pub mod batch;

pub use batch::*;

/// Upper bound of a reported score after normalization.
pub const MAX_SCORE: f64 = 100.0;

/// Rank every program in `catalog` for `student`, best match first.
///
/// Fails on the first malformed input rather than returning a partial list.
pub fn rank_programs(student: &StudentProfile, catalog: &Catalog) -> Result<Vec<RankedResult>, MatchError> {
    student.validate()?;
    if catalog.institutions.is_empty() {
        return Err(MatchError::Configuration(
            "catalog contains no institutions".to_string(),
        ));
    }
    if let Some(empty) = catalog.institutions.iter().find(|i| i.programs.is_empty()) {
        return Err(MatchError::schema(&empty.name, None, "programs", "is empty"));
    }

    let weights = weights_for_grade(student.grade_level);
    let mut results: Vec<RankedResult> = catalog
        .programs()
        .map(|(institution, program)| score_program(student, weights, institution, program))
        .collect();

    // `sort_by` is stable: ties keep catalog order.
    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

    if normalize_scores(&mut results) {
        debug!("scores rescaled so the best match is {MAX_SCORE}");
    }

    if let Some(best) = results.first() {
        info!(
            grade = student.grade_level,
            programs = results.len(),
            best_university = %best.university,
            best_program = %best.program,
            best_score = best.score,
            "ranking complete"
        );
    }

    Ok(results)
}

/// Score a single program for `student` under `weights`.
pub fn score_program(
    student: &StudentProfile,
    weights: Weights,
    institution: &InstitutionRecord,
    program: &Program,
) -> RankedResult {
    let req = &program.requirements;

    let academic = academic_score(req.recommended_average, &req.required_courses, student);
    let interest = interest_score(&student.major_interests, &req.interest_fields);
    let ec = ec_score(student.best_leadership(), institution.ec_quality);
    let coop = coop_fit(student.wants_coop, institution.coop_options_for(program));

    let base = academic.score * weights.academic + interest * weights.interest + ec * weights.ec;
    let final_score = base * coop * 100.0;

    debug!(
        institution = %institution.name,
        program = %program.name,
        academic = academic.score,
        academic_base = academic.base,
        academic_penalty = academic.penalty,
        academic_bonus = academic.bonus,
        interest,
        ec,
        coop,
        score = final_score,
        "scored program"
    );

    RankedResult {
        university: institution.name.clone(),
        program: program.name.clone(),
        score: round_to(final_score, 1),
        breakdown: ScoreBreakdown {
            academic: round_to(academic.score, 2),
            interest: round_to(interest, 2),
            ec: round_to(ec, 2),
            coop_fit: round_to(coop, 2),
        },
        missing_courses: academic.missing,
    }
}

/// Rescale so the best score is exactly 100 when any score exceeds 100.
///
/// Ratios and ordering are preserved. Returns whether rescaling happened.
pub fn normalize_scores(results: &mut [RankedResult]) -> bool {
    let top = results.iter().map(|r| r.score).fold(f64::NEG_INFINITY, f64::max);
    if !top.is_finite() || top <= MAX_SCORE {
        return false;
    }
    let scale = MAX_SCORE / top;
    for r in results.iter_mut() {
        r.score = round_to(r.score * scale, 1).min(MAX_SCORE);
    }
    true
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    use crate::domain::{AverageRange, CoopOption, CourseGrade, Extracurricular, ProgramRequirements};

    fn tags(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn program(name: &str, min: f64, max: f64, courses: &[&str], interests: &[&str]) -> Program {
        Program {
            name: name.to_string(),
            requirements: ProgramRequirements {
                recommended_average: AverageRange::new(min, max).unwrap(),
                required_courses: courses.iter().map(|s| s.to_string()).collect(),
                interest_fields: tags(interests),
                coop_options: None,
            },
        }
    }

    fn institution(name: &str, ec_quality: u8, coop: &[CoopOption], programs: Vec<Program>) -> InstitutionRecord {
        InstitutionRecord {
            name: name.to_string(),
            ec_quality,
            coop_options: coop.iter().copied().collect(),
            programs,
        }
    }

    fn grade_nine_student() -> StudentProfile {
        StudentProfile {
            grade_level: 9,
            average: 85.0,
            wants_coop: true,
            extra_curriculars: vec![],
            major_interests: tags(&["software"]),
            courses_taken: vec![],
        }
    }

    #[test]
    fn grade_nine_scenario() {
        let catalog = Catalog {
            institutions: vec![institution(
                "U",
                2,
                &[CoopOption::Yes],
                vec![program("CS", 80.0, 90.0, &[], &["software", "ai"])],
            )],
            warnings: vec![],
        };

        let results = rank_programs(&grade_nine_student(), &catalog).unwrap();
        assert_eq!(results.len(), 1);
        let r = &results[0];
        assert_eq!(r.breakdown.interest, 0.5);
        assert_eq!(r.breakdown.academic, 0.67);
        assert_eq!(r.breakdown.ec, 0.6);
        assert_eq!(r.breakdown.coop_fit, 1.0);
        // 0.3 * 10/15 + 0.6 * 0.5 + 0.1 * 0.6
        assert!((r.score - 56.0).abs() < 1e-9);
        assert!(r.missing_courses.is_empty());
    }

    #[test]
    fn results_sorted_descending_with_stable_ties() {
        let catalog = Catalog {
            institutions: vec![
                institution(
                    "A",
                    2,
                    &[CoopOption::Yes],
                    vec![
                        program("Biology", 80.0, 90.0, &[], &["biology"]),
                        program("CS", 80.0, 90.0, &[], &["software"]),
                    ],
                ),
                institution("B", 2, &[CoopOption::Yes], vec![program("CS", 80.0, 90.0, &[], &["software"])]),
            ],
            warnings: vec![],
        };

        let results = rank_programs(&grade_nine_student(), &catalog).unwrap();
        let order: Vec<_> = results.iter().map(|r| (r.university.as_str(), r.program.as_str())).collect();
        assert_eq!(order, vec![("A", "CS"), ("B", "CS"), ("A", "Biology")]);
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn scores_above_hundred_are_normalized() {
        let student = StudentProfile {
            grade_level: 12,
            average: 99.0,
            wants_coop: false,
            extra_curriculars: vec![Extracurricular {
                name: "Student council".to_string(),
                leadership_level: 5,
            }],
            major_interests: tags(&["math"]),
            courses_taken: vec![CourseGrade {
                code: "MHF4U".to_string(),
                grade: Some(99.0),
            }],
        };
        let catalog = Catalog {
            institutions: vec![institution(
                "U",
                1,
                &[CoopOption::No],
                vec![
                    program("Math", 80.0, 85.0, &["MHF4U"], &["math"]),
                    program("Art", 60.0, 70.0, &[], &["art"]),
                ],
            )],
            warnings: vec![],
        };

        // Math before normalization: 0.6 * 1.05 + 0.1 * 1.0 + 0.3 * 1.2 = 1.09.
        let inst = &catalog.institutions[0];
        let raw = score_program(&student, weights_for_grade(12), inst, &inst.programs[0]);
        assert!((raw.score - 109.0).abs() < 1e-9);

        let results = rank_programs(&student, &catalog).unwrap();
        assert_eq!(results[0].program, "Math");
        assert_eq!(results[0].score, 100.0);
        assert!(results.iter().all(|r| r.score <= 100.0));
        // Art: 0.6 * 1.0 + 0.0 + 0.3 * 1.2 = 0.96 -> 96.0 * 100 / 109.
        assert!((results[1].score - 88.1).abs() < 1e-9);
    }

    #[test]
    fn normalization_leaves_in_range_scores_alone() {
        let mut results = vec![RankedResult {
            university: "U".to_string(),
            program: "P".to_string(),
            score: 87.3,
            breakdown: ScoreBreakdown {
                academic: 1.0,
                interest: 1.0,
                ec: 1.0,
                coop_fit: 1.0,
            },
            missing_courses: vec![],
        }];
        assert!(!normalize_scores(&mut results));
        assert_eq!(results[0].score, 87.3);
        assert!(!normalize_scores(&mut []));
    }

    #[test]
    fn grade_eleven_reports_missing_courses() {
        let mut student = grade_nine_student();
        student.grade_level = 11;
        let catalog = Catalog {
            institutions: vec![institution(
                "U",
                2,
                &[CoopOption::Yes],
                vec![program("Eng", 80.0, 90.0, &["MHF4U", "One more 4U course"], &["software"])],
            )],
            warnings: vec![],
        };
        let results = rank_programs(&student, &catalog).unwrap();
        assert_eq!(results[0].missing_courses, vec!["MHF4U".to_string()]);
    }

    #[test]
    fn empty_catalog_fails() {
        let err = rank_programs(&grade_nine_student(), &Catalog::default()).unwrap_err();
        assert!(matches!(err, MatchError::Configuration(_)));
    }

    #[test]
    fn institution_without_programs_fails_the_pass() {
        let catalog = Catalog {
            institutions: vec![
                institution("A", 2, &[CoopOption::Yes], vec![program("CS", 80.0, 90.0, &[], &[])]),
                institution("B", 2, &[CoopOption::Yes], vec![]),
            ],
            warnings: vec![],
        };
        let err = rank_programs(&grade_nine_student(), &catalog).unwrap_err();
        assert!(matches!(err, MatchError::Schema { ref institution, .. } if institution == "B"));
    }

    #[test]
    fn invalid_profile_is_rejected() {
        let mut student = grade_nine_student();
        student.average = -1.0;
        let catalog = Catalog {
            institutions: vec![institution("A", 2, &[CoopOption::Yes], vec![program("CS", 80.0, 90.0, &[], &[])])],
            warnings: vec![],
        };
        assert!(matches!(rank_programs(&student, &catalog), Err(MatchError::InvalidProfile(_))));
    }
}
