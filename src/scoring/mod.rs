//! Scoring model: category weights plus four independent calculators.
//!
//! Each calculator is a small pure function of the student profile and one
//! program's requirements, so the ranker can stay generic.

pub mod academic;
pub mod coop;
pub mod extracurricular;
pub mod interest;
pub mod weights;

pub use academic::{AcademicScore, academic_score};
pub use coop::coop_fit;
pub use extracurricular::ec_score;
pub use interest::interest_score;
pub use weights::{GradeMode, weights_for_grade};
