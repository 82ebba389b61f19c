//! Academic fit: grade-range interpolation, prerequisite penalty and a
//! competitiveness bonus for selective programs.
//!
//! Final score = `min(1.30, base * penalty + bonus)`.

use crate::domain::{AverageRange, StudentProfile};

/// Points below the minimum average that still count as competitive.
pub const COMPETITIVE_BUFFER: f64 = 5.0;

/// Ceiling on the academic score; lets strong applicants exceed 1.0.
pub const ACADEMIC_CEILING: f64 = 1.30;

/// Penalty per missing prerequisite in grade 12 and above.
pub const MISSING_COURSE_PENALTY: f64 = 0.15;

/// Window below the program ceiling where a partial bonus applies.
pub const NEAR_CEILING_WINDOW: f64 = 2.0;

/// Grade level from which prerequisites are checked at all.
pub const PREREQ_CHECK_GRADE: u8 = 11;

/// Grade level from which missing prerequisites cost points.
pub const PREREQ_PENALTY_GRADE: u8 = 12;

/// Phrases marking a generic "any other senior course" requirement.
const FILLER_KEYWORDS: [&str; 4] = ["one more", "additional", "any u/m", "another"];

/// Bonus tiers keyed by the program's maximum average: `(floor, low, high)`.
///
/// Within a tier the bonus rises linearly from `low` at `floor` to `high`
/// five points later.
const BONUS_TIERS: [(f64, f64, f64); 4] = [
    (95.0, 0.20, 0.30),
    (90.0, 0.10, 0.20),
    (85.0, 0.05, 0.10),
    (80.0, 0.02, 0.05),
];

const TIER_WIDTH: f64 = 5.0;

/// Academic score with its components, for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct AcademicScore {
    pub score: f64,
    /// Range interpolation in `[0, 1]`.
    pub base: f64,
    /// Prerequisite multiplier in `[0, 1]`.
    pub penalty: f64,
    pub bonus: f64,
    /// Unmet requirement expressions (empty below grade 11).
    pub missing: Vec<String>,
}

pub fn academic_score(
    range: AverageRange,
    required_courses: &[String],
    student: &StudentProfile,
) -> AcademicScore {
    let average = student.average;
    let base = range_interpolation(average, range);

    let missing = if student.grade_level >= PREREQ_CHECK_GRADE {
        missing_requirements(required_courses, student)
    } else {
        Vec::new()
    };

    // Grade 11 students still have time to pick courses up; only report.
    let penalty = if student.grade_level >= PREREQ_PENALTY_GRADE {
        (1.0 - MISSING_COURSE_PENALTY * missing.len() as f64).max(0.0)
    } else {
        1.0
    };

    let bonus = competitiveness_bonus(average, range.max);
    let score = (base * penalty + bonus).min(ACADEMIC_CEILING);

    AcademicScore {
        score,
        base,
        penalty,
        bonus,
        missing,
    }
}

/// Linear position of `average` across `[min - 5, max]`, clamped to `[0, 1]`.
pub fn range_interpolation(average: f64, range: AverageRange) -> f64 {
    let floor = range.min - COMPETITIVE_BUFFER;
    if average >= range.max {
        1.0
    } else if average < floor {
        0.0
    } else {
        (average - floor) / (range.max - floor)
    }
}

/// Full bonus at or above the ceiling, a halved proportional bonus within two points of it.
pub fn competitiveness_bonus(average: f64, max_avg: f64) -> f64 {
    let full = tier_bonus(max_avg);
    if average >= max_avg {
        return full;
    }
    let gap = max_avg - average;
    if gap <= NEAR_CEILING_WINDOW {
        0.5 * full * (1.0 - gap / NEAR_CEILING_WINDOW)
    } else {
        0.0
    }
}

fn tier_bonus(max_avg: f64) -> f64 {
    for (floor, low, high) in BONUS_TIERS {
        if max_avg >= floor {
            let t = ((max_avg - floor) / TIER_WIDTH).min(1.0);
            return low + t * (high - low);
        }
    }
    0.0
}

/// Requirement expressions the student has not satisfied, in declaration order.
pub fn missing_requirements(required_courses: &[String], student: &StudentProfile) -> Vec<String> {
    let taken: Vec<String> = student
        .courses_taken
        .iter()
        .map(|c| normalize_code(&c.code))
        .filter(|c| !c.is_empty())
        .collect();

    required_courses
        .iter()
        .filter(|expr| !is_filler(expr) && !requirement_met(expr, &taken))
        .cloned()
        .collect()
}

pub fn is_filler(expr: &str) -> bool {
    let lower = expr.to_ascii_lowercase();
    FILLER_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Any `/`-separated alternative matches a taken code by substring, either way round.
fn requirement_met(expr: &str, taken: &[String]) -> bool {
    let mut alternatives = expr
        .split('/')
        .map(normalize_code)
        .filter(|alt| !alt.is_empty())
        .peekable();

    // Blank expressions carry no requirement.
    if alternatives.peek().is_none() {
        return true;
    }

    alternatives.any(|alt| {
        taken
            .iter()
            .any(|code| code.contains(alt.as_str()) || alt.contains(code.as_str()))
    })
}

fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}
