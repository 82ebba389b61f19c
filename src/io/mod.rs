//! Input/output helpers.
//!
//! - student profile / cohort JSON reading (`profile`)
//! - result exports (CSV/JSON) (`export`)

pub mod export;
pub mod profile;

pub use export::*;
pub use profile::*;
