//! Category weights by grade level.
//!
//! Students in grade 9/10 are still exploring, so interest fit dominates.
//! From grade 11 on, admission is close and academic standing dominates.
//! The cut is hard at 10/11 with no intermediate tier.

use crate::domain::Weights;

/// Last grade level that ranks in exploration mode.
pub const EXPLORATION_MAX_GRADE: u8 = 10;

const EXPLORATION: Weights = Weights {
    academic: 0.30,
    interest: 0.60,
    ec: 0.10,
};

const EXECUTION: Weights = Weights {
    academic: 0.60,
    interest: 0.10,
    ec: 0.30,
};

/// Which weighting regime a grade level falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeMode {
    Exploration,
    Execution,
}

impl GradeMode {
    pub fn for_grade(grade_level: u8) -> Self {
        if grade_level <= EXPLORATION_MAX_GRADE {
            GradeMode::Exploration
        } else {
            GradeMode::Execution
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GradeMode::Exploration => "exploration",
            GradeMode::Execution => "execution",
        }
    }
}

/// Weights for `grade_level`; the triple always sums to 1.0.
pub fn weights_for_grade(grade_level: u8) -> Weights {
    match GradeMode::for_grade(grade_level) {
        GradeMode::Exploration => EXPLORATION,
        GradeMode::Execution => EXECUTION,
    }
}
