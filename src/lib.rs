//! `admit-rank` library crate.
//!
//! The binary (`admit`) is a thin wrapper around this library so that:
//!
//! - scoring and ranking are testable without spawning processes
//! - the catalog and scoring modules can be embedded elsewhere (a web backend, notebooks)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod rank;
pub mod report;
pub mod scoring;
