//! Reporting utilities: terminal tables for rankings, catalogs and cohorts.

pub mod format;

pub use format::*;
