//! Error types.
//!
//! - `MatchError` is the library-level taxonomy returned by catalog loading,
//!   profile validation and ranking.
//! - `AppError` is what the binary sees: a message plus a process exit code.

use thiserror::Error;

/// Failures raised while loading a catalog or ranking against it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    /// The catalog is absent or empty; nothing can be ranked.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An institution or program record is missing a field or has the wrong type.
    #[error("Schema error in {}: field `{field}` {found}", location(.institution, .program.as_deref()))]
    Schema {
        institution: String,
        program: Option<String>,
        field: String,
        found: String,
    },

    /// The student profile cannot be scored as given.
    #[error("Invalid student profile: {0}")]
    InvalidProfile(String),

    /// The catalog source could not be read or fetched.
    #[error("Catalog source error: {0}")]
    Source(String),
}

impl MatchError {
    pub fn schema(
        institution: impl Into<String>,
        program: Option<&str>,
        field: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        MatchError::Schema {
            institution: institution.into(),
            program: program.map(str::to_string),
            field: field.into(),
            found: found.into(),
        }
    }
}

fn location(institution: &str, program: Option<&str>) -> String {
    match program {
        Some(program) => format!("'{institution}' / '{program}'"),
        None => format!("'{institution}'"),
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<MatchError> for AppError {
    fn from(err: MatchError) -> Self {
        let exit_code = match err {
            MatchError::Configuration(_) | MatchError::InvalidProfile(_) => 2,
            MatchError::Schema { .. } => 3,
            MatchError::Source(_) => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
