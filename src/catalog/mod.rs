//! Catalog Provider boundary.
//!
//! - raw JSON validation + document merge (`schema`)
//! - builtin / file / HTTP sources (`provider`)

pub mod provider;
pub mod schema;

pub use provider::*;
pub use schema::{parse_catalog_str, parse_catalog_value};
