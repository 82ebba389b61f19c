//! Run configuration: optional TOML file, `.env` overlay, CLI overrides.
//!
//! ```toml
//! [catalog]
//! path = "catalog.json"
//! # url = "https://example.org/catalog"
//!
//! [output]
//! top = 10
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::catalog::{CatalogSource, ENV_CATALOG_TOKEN, ENV_CATALOG_URL};
use crate::error::AppError;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "admit.toml";

pub const DEFAULT_TOP: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub catalog: CatalogSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogSection {
    pub path: Option<PathBuf>,
    pub url: Option<String>,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    pub top: Option<usize>,
}

impl FileConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, AppError> {
        toml::from_str(s).map_err(|e| AppError::new(2, format!("Invalid config: {e}")))
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, AppError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| AppError::new(2, format!("Failed to read config '{}': {e}", path.display())))?;
        Self::from_toml_str(&contents)
    }

    /// Load `explicit` if given, else `./admit.toml` if it exists, else defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, AppError> {
        match explicit {
            Some(path) => Self::from_toml_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_toml_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Catalog-related CLI overrides.
#[derive(Debug, Clone, Default)]
pub struct CatalogOverrides {
    pub path: Option<PathBuf>,
    pub url: Option<String>,
}

/// Environment values consulted when resolving the catalog source.
#[derive(Debug, Clone, Default)]
pub struct CatalogEnv {
    pub url: Option<String>,
    pub token: Option<String>,
}

impl CatalogEnv {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            url: std::env::var(ENV_CATALOG_URL).ok().filter(|s| !s.trim().is_empty()),
            token: std::env::var(ENV_CATALOG_TOKEN).ok().filter(|s| !s.trim().is_empty()),
        }
    }
}

/// Resolve the catalog source. Precedence: CLI, environment, config file, builtin.
pub fn resolve_catalog_source(
    cli: &CatalogOverrides,
    env: &CatalogEnv,
    file: &FileConfig,
) -> Result<CatalogSource, AppError> {
    if cli.path.is_some() && cli.url.is_some() {
        return Err(AppError::new(2, "Use either `--catalog` or `--catalog-url`, not both."));
    }

    let token = env.token.clone().or_else(|| file.catalog.token.clone());

    if let Some(path) = &cli.path {
        return Ok(CatalogSource::File(path.clone()));
    }
    if let Some(url) = &cli.url {
        return Ok(CatalogSource::Url { url: url.clone(), token });
    }
    if let Some(url) = &env.url {
        return Ok(CatalogSource::Url { url: url.clone(), token });
    }
    match (&file.catalog.path, &file.catalog.url) {
        (Some(_), Some(_)) => Err(AppError::new(
            2,
            "Config sets both `catalog.path` and `catalog.url`; pick one.",
        )),
        (Some(path), None) => Ok(CatalogSource::File(path.clone())),
        (None, Some(url)) => Ok(CatalogSource::Url { url: url.clone(), token }),
        (None, None) => Ok(CatalogSource::Builtin),
    }
}

/// Number of rows to show. Precedence: CLI, config file, default.
pub fn resolve_top(cli: Option<usize>, file: &FileConfig) -> usize {
    cli.or(file.output.top).unwrap_or(DEFAULT_TOP)
}
