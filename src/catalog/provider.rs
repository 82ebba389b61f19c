//! Catalog sources.
//!
//! Every provider performs one blocking load that returns a complete,
//! validated snapshot (or fails outright). Scoring never touches a provider.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::info;

use crate::catalog::schema::{parse_catalog_str, parse_catalog_value};
use crate::domain::Catalog;
use crate::error::MatchError;

const BUILTIN_CATALOG: &str = include_str!("ontario.json");
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

pub const ENV_CATALOG_URL: &str = "ADMIT_CATALOG_URL";
pub const ENV_CATALOG_TOKEN: &str = "ADMIT_CATALOG_TOKEN";

/// Something that can produce a catalog snapshot.
pub trait CatalogProvider {
    /// Short human-readable description of the source.
    fn describe(&self) -> String;

    fn load(&self) -> Result<Catalog, MatchError>;
}

/// Where the catalog should come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Builtin,
    File(PathBuf),
    Url { url: String, token: Option<String> },
}

impl CatalogSource {
    pub fn provider(&self) -> Result<Box<dyn CatalogProvider>, MatchError> {
        Ok(match self {
            CatalogSource::Builtin => Box::new(BuiltinCatalog),
            CatalogSource::File(path) => Box::new(FileCatalog::new(path.clone())),
            CatalogSource::Url { url, token } => Box::new(HttpCatalog::new(url.clone(), token.clone())?),
        })
    }

    /// Load and log a snapshot from this source.
    pub fn load(&self) -> Result<Catalog, MatchError> {
        let provider = self.provider()?;
        let catalog = provider.load()?;
        info!(
            source = %provider.describe(),
            institutions = catalog.institutions.len(),
            programs = catalog.program_count(),
            warnings = catalog.warnings.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::Builtin => write!(f, "builtin sample catalog"),
            CatalogSource::File(path) => write!(f, "file {}", path.display()),
            CatalogSource::Url { url, .. } => write!(f, "url {url}"),
        }
    }
}

/// The sample Ontario/BC catalog compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl CatalogProvider for BuiltinCatalog {
    fn describe(&self) -> String {
        "builtin sample catalog".to_string()
    }

    fn load(&self) -> Result<Catalog, MatchError> {
        parse_catalog_str(BUILTIN_CATALOG)
    }
}

/// A JSON catalog file on disk.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl CatalogProvider for FileCatalog {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    fn load(&self) -> Result<Catalog, MatchError> {
        let text = fs::read_to_string(&self.path).map_err(|e| {
            MatchError::Source(format!("failed to read catalog '{}': {e}", self.path.display()))
        })?;
        parse_catalog_str(&text)
    }
}

/// A catalog service returning one document or an array of documents as JSON.
pub struct HttpCatalog {
    client: Client,
    url: String,
    token: Option<String>,
}

impl HttpCatalog {
    pub fn new(url: String, token: Option<String>) -> Result<Self, MatchError> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| MatchError::Source(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, url, token })
    }
}

impl CatalogProvider for HttpCatalog {
    fn describe(&self) -> String {
        format!("url {}", self.url)
    }

    fn load(&self) -> Result<Catalog, MatchError> {
        let mut req = self.client.get(&self.url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .map_err(|e| MatchError::Source(format!("catalog request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(MatchError::Source(format!(
                "catalog request failed with status {}.",
                resp.status()
            )));
        }

        let body: Value = resp
            .json()
            .map_err(|e| MatchError::Source(format!("failed to parse catalog response: {e}")))?;

        parse_catalog_value(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = BuiltinCatalog.load().unwrap();
        assert_eq!(catalog.institutions.len(), 5);
        assert_eq!(catalog.institutions[0].name, "University of Waterloo");
        assert_eq!(catalog.program_count(), 13);
        assert!(catalog.warnings.is_empty());
    }

    #[test]
    fn file_catalog_reads_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"U": {{"ec_quality": 1, "co-op": ["no"], "programs": {{"P": {{"recommended_average": [70, 80], "interest_fields": [], "required_courses": []}}}}}}}}"#
        )
        .unwrap();

        let catalog = CatalogSource::File(file.path().to_path_buf()).load().unwrap();
        assert_eq!(catalog.program_count(), 1);
    }

    #[test]
    fn missing_file_is_a_source_error() {
        let err = FileCatalog::new(PathBuf::from("/definitely/not/here.json"))
            .load()
            .unwrap_err();
        assert!(matches!(err, MatchError::Source(_)));
    }
}
