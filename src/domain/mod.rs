//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the student profile (`StudentProfile`, `Extracurricular`, `CourseGrade`)
//! - the catalog snapshot (`Catalog`, `InstitutionRecord`, `ProgramRequirements`)
//! - ranking outputs (`RankedResult`, `ScoreBreakdown`) and `Weights`

pub mod types;

pub use types::*;
