//! Data sources for batch runs.

pub mod sample;

pub use sample::*;
