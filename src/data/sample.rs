//! Synthetic student cohorts drawn from a catalog's vocabulary.
//!
//! Cohorts are deterministic for a given `(catalog, seed)` so batch runs and
//! summaries can be reproduced.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{Catalog, CourseGrade, Extracurricular, MAX_LEADERSHIP_LEVEL, StudentProfile};
use crate::error::MatchError;
use crate::scoring::academic::{PREREQ_CHECK_GRADE, is_filler};

/// Mean and standard deviation of generated averages.
const AVERAGE_MEAN: f64 = 86.0;
const AVERAGE_SD: f64 = 6.0;
const AVERAGE_FLOOR: f64 = 55.0;
const AVERAGE_CEIL: f64 = 100.0;

/// Share of generated students who want co-op.
const COOP_SHARE: f64 = 0.6;

const MAX_INTERESTS: usize = 3;
const MAX_EXTRACURRICULARS: usize = 3;

const ACTIVITIES: [&str; 8] = [
    "Robotics club",
    "Student council",
    "Debate team",
    "Varsity soccer",
    "School newspaper",
    "Math contest team",
    "Volunteer tutoring",
    "Jazz band",
];

/// Tags and course codes a cohort can draw from.
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    pub interests: Vec<String>,
    pub courses: Vec<String>,
}

impl Vocabulary {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut interests: Vec<String> = Vec::new();
        let mut courses: Vec<String> = Vec::new();

        for (_, program) in catalog.programs() {
            for tag in &program.requirements.interest_fields {
                if !interests.contains(tag) {
                    interests.push(tag.clone());
                }
            }
            for expr in &program.requirements.required_courses {
                if is_filler(expr) {
                    continue;
                }
                for alt in expr.split('/').map(str::trim).filter(|s| !s.is_empty()) {
                    if !courses.iter().any(|c| c == alt) {
                        courses.push(alt.to_string());
                    }
                }
            }
        }

        Self { interests, courses }
    }
}

pub fn generate_cohort(catalog: &Catalog, count: usize, seed: u64) -> Result<Vec<StudentProfile>, MatchError> {
    if count == 0 {
        return Err(MatchError::Configuration("cohort size must be > 0".to_string()));
    }

    let vocab = Vocabulary::from_catalog(catalog);
    if vocab.interests.is_empty() {
        return Err(MatchError::Configuration(
            "catalog declares no interest tags to sample from".to_string(),
        ));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(AVERAGE_MEAN, AVERAGE_SD)
        .map_err(|e| MatchError::Configuration(format!("average distribution error: {e}")))?;

    let mut cohort = Vec::with_capacity(count);
    for _ in 0..count {
        cohort.push(generate_student(&mut rng, &normal, &vocab));
    }
    Ok(cohort)
}

fn generate_student(rng: &mut StdRng, normal: &Normal<f64>, vocab: &Vocabulary) -> StudentProfile {
    let grade_level: u8 = rng.gen_range(9..=12);
    let average = round1(normal.sample(rng).clamp(AVERAGE_FLOOR, AVERAGE_CEIL));
    let wants_coop = rng.gen_bool(COOP_SHARE);

    let n_interests = rng.gen_range(1..=MAX_INTERESTS.min(vocab.interests.len()));
    let major_interests = vocab
        .interests
        .choose_multiple(rng, n_interests)
        .cloned()
        .collect();

    let n_ecs = rng.gen_range(0..=MAX_EXTRACURRICULARS);
    let extra_curriculars = ACTIVITIES
        .choose_multiple(rng, n_ecs)
        .map(|name| Extracurricular {
            name: name.to_string(),
            leadership_level: rng.gen_range(1..=MAX_LEADERSHIP_LEVEL),
        })
        .collect::<Vec<_>>();

    // Younger students rarely have senior courses on record.
    let courses_taken = if grade_level >= PREREQ_CHECK_GRADE && !vocab.courses.is_empty() {
        let n_courses = rng.gen_range(0..=vocab.courses.len());
        let picked: Vec<String> = vocab.courses.choose_multiple(rng, n_courses).cloned().collect();
        picked
            .into_iter()
            .map(|code| {
                let jitter: f64 = rng.gen_range(-5.0..=5.0);
                CourseGrade {
                    code,
                    grade: Some(round1((average + jitter).clamp(0.0, AVERAGE_CEIL))),
                }
            })
            .collect()
    } else {
        Vec::new()
    };

    StudentProfile {
        grade_level,
        average,
        wants_coop,
        extra_curriculars,
        major_interests,
        courses_taken,
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
