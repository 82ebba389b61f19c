//! Shared domain types.
//!
//! Inputs (`StudentProfile`, `Catalog`) are immutable for the duration of a
//! ranking pass; outputs (`RankedResult`) are produced fresh per request.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::MatchError;

/// Highest leadership level an extracurricular can carry.
pub const MAX_LEADERSHIP_LEVEL: u8 = 5;

/// Lowest grade level the scoring model understands.
pub const MIN_GRADE_LEVEL: u8 = 9;

/// A student as seen by the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    #[serde(alias = "gradeLevel")]
    pub grade_level: u8,
    pub average: f64,
    #[serde(alias = "wantsCoop")]
    pub wants_coop: bool,
    #[serde(default, alias = "extracurriculars")]
    pub extra_curriculars: Vec<Extracurricular>,
    #[serde(default, alias = "majorInterests")]
    pub major_interests: BTreeSet<String>,
    #[serde(default, alias = "coursesTaken")]
    pub courses_taken: Vec<CourseGrade>,
}

impl StudentProfile {
    /// Reject profiles the scoring model cannot interpret.
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.grade_level < MIN_GRADE_LEVEL {
            return Err(MatchError::InvalidProfile(format!(
                "grade level {} is below {MIN_GRADE_LEVEL}",
                self.grade_level
            )));
        }
        if !(self.average.is_finite() && self.average >= 0.0) {
            return Err(MatchError::InvalidProfile(format!(
                "average {} must be a finite, non-negative percentage",
                self.average
            )));
        }
        if let Some(ec) = self
            .extra_curriculars
            .iter()
            .find(|ec| ec.leadership_level > MAX_LEADERSHIP_LEVEL)
        {
            return Err(MatchError::InvalidProfile(format!(
                "extracurricular '{}' has leadership level {} (max {MAX_LEADERSHIP_LEVEL})",
                ec.name, ec.leadership_level
            )));
        }
        Ok(())
    }

    /// Highest leadership level across all extracurriculars (0 when there are none).
    pub fn best_leadership(&self) -> u8 {
        self.extra_curriculars
            .iter()
            .map(|ec| ec.leadership_level)
            .max()
            .unwrap_or(0)
    }
}

/// One extracurricular activity.
///
/// Accepts either a `[name, level]` pair or a `{name, leadership_level}` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ExtracurricularRepr")]
pub struct Extracurricular {
    pub name: String,
    pub leadership_level: u8,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ExtracurricularRepr {
    Pair(String, u8),
    Object {
        name: String,
        #[serde(alias = "leadershipLevel", alias = "level")]
        leadership_level: u8,
    },
}

impl From<ExtracurricularRepr> for Extracurricular {
    fn from(repr: ExtracurricularRepr) -> Self {
        match repr {
            ExtracurricularRepr::Pair(name, leadership_level)
            | ExtracurricularRepr::Object {
                name,
                leadership_level,
            } => Extracurricular {
                name,
                leadership_level,
            },
        }
    }
}

/// A completed (or in-progress) course and its mark.
///
/// Accepts either a `[code, grade]` pair or a `{code, grade}` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CourseGradeRepr")]
pub struct CourseGrade {
    pub code: String,
    pub grade: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CourseGradeRepr {
    Pair(String, Option<f64>),
    Object {
        #[serde(alias = "course_code", alias = "courseCode")]
        code: String,
        #[serde(default)]
        grade: Option<f64>,
    },
    Code(String),
}

impl From<CourseGradeRepr> for CourseGrade {
    fn from(repr: CourseGradeRepr) -> Self {
        match repr {
            CourseGradeRepr::Pair(code, grade) | CourseGradeRepr::Object { code, grade } => {
                CourseGrade { code, grade }
            }
            CourseGradeRepr::Code(code) => CourseGrade { code, grade: None },
        }
    }
}

/// Stream a program can be taken in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoopOption {
    /// Co-op stream offered.
    Yes,
    /// Regular (non co-op) stream offered.
    No,
}

impl CoopOption {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "yes" => Some(CoopOption::Yes),
            "no" => Some(CoopOption::No),
            _ => None,
        }
    }
}

/// Admission average window `[min, max]`, with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AverageRange {
    pub min: f64,
    pub max: f64,
}

impl AverageRange {
    /// Half-width used when a catalog gives a single target average.
    pub const SINGLE_VALUE_SPREAD: f64 = 2.0;

    pub fn new(min: f64, max: f64) -> Option<Self> {
        if min.is_finite() && max.is_finite() && min <= max {
            Some(Self { min, max })
        } else {
            None
        }
    }

    /// Widen a single target average to `[value - 2, value + 2]`.
    pub fn around(value: f64) -> Option<Self> {
        Self::new(
            value - Self::SINGLE_VALUE_SPREAD,
            value + Self::SINGLE_VALUE_SPREAD,
        )
    }
}

/// What a program asks of applicants.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramRequirements {
    pub recommended_average: AverageRange,
    /// Course-code expressions; `"MCV4U/MDM4U"` lists acceptable alternatives.
    pub required_courses: Vec<String>,
    pub interest_fields: BTreeSet<String>,
    /// Program-level co-op streams, overriding the institution's when present.
    pub coop_options: Option<BTreeSet<CoopOption>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub name: String,
    pub requirements: ProgramRequirements,
}

/// One institution and its programs, in catalog-declared order.
#[derive(Debug, Clone, PartialEq)]
pub struct InstitutionRecord {
    pub name: String,
    /// Extracurricular leadership bar shared by all programs.
    pub ec_quality: u8,
    pub coop_options: BTreeSet<CoopOption>,
    pub programs: Vec<Program>,
}

impl InstitutionRecord {
    /// Co-op streams that apply to `program`.
    pub fn coop_options_for<'a>(&'a self, program: &'a Program) -> &'a BTreeSet<CoopOption> {
        program
            .requirements
            .coop_options
            .as_ref()
            .unwrap_or(&self.coop_options)
    }
}

/// A single-value average range silently widened during catalog load.
#[derive(Debug, Clone, PartialEq)]
pub struct DataShapeWarning {
    pub institution: String,
    pub program: String,
    pub value: f64,
}

impl std::fmt::Display for DataShapeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "'{}' / '{}': single recommended average {} widened to [{}, {}]",
            self.institution,
            self.program,
            self.value,
            self.value - AverageRange::SINGLE_VALUE_SPREAD,
            self.value + AverageRange::SINGLE_VALUE_SPREAD,
        )
    }
}

/// Immutable catalog snapshot used for one or more ranking passes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub institutions: Vec<InstitutionRecord>,
    pub warnings: Vec<DataShapeWarning>,
}

impl Catalog {
    pub fn program_count(&self) -> usize {
        self.institutions.iter().map(|i| i.programs.len()).sum()
    }

    /// All `(institution, program)` pairs in declaration order.
    pub fn programs(&self) -> impl Iterator<Item = (&InstitutionRecord, &Program)> {
        self.institutions
            .iter()
            .flat_map(|inst| inst.programs.iter().map(move |p| (inst, p)))
    }
}

/// Category weights applied to the academic, interest and extracurricular scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Weights {
    pub academic: f64,
    pub interest: f64,
    pub ec: f64,
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.academic + self.interest + self.ec
    }
}

/// Rounded per-category scores reported next to a match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub academic: f64,
    pub interest: f64,
    pub ec: f64,
    pub coop_fit: f64,
}

/// One scored `(institution, program)` match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub university: String,
    pub program: String,
    /// Overall fit in `[0, 100]`, one decimal.
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    /// Unmet prerequisite expressions (informational for grade 11).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_courses: Vec<String>,
}
