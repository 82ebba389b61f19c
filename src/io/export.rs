//! Export ranked results to CSV or JSON.
//!
//! The CSV is meant to be easy to consume in spreadsheets; the JSON keeps the
//! profile next to its ranking so a run can be reviewed later.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{RankedResult, StudentProfile};
use crate::error::AppError;

/// A saved ranking (JSON).
#[derive(Debug, Clone, Serialize)]
pub struct RankingFile<'a> {
    pub tool: &'static str,
    pub generated_at: DateTime<Utc>,
    pub student: &'a StudentProfile,
    pub results: &'a [RankedResult],
}

/// Write ranked results to a CSV file.
pub fn write_results_csv(path: &Path, results: &[RankedResult]) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writeln!(
        file,
        "rank,university,program,score,academic,interest,ec,coop_fit,missing_courses"
    )
    .map_err(|e| AppError::new(4, format!("Failed to write export CSV header: {e}")))?;

    for (idx, r) in results.iter().enumerate() {
        writeln!(
            file,
            "{},{},{},{:.1},{:.2},{:.2},{:.2},{:.2},{}",
            idx + 1,
            csv_field(&r.university),
            csv_field(&r.program),
            r.score,
            r.breakdown.academic,
            r.breakdown.interest,
            r.breakdown.ec,
            r.breakdown.coop_fit,
            csv_field(&r.missing_courses.join(";")),
        )
        .map_err(|e| AppError::new(4, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// Write the profile and its ranking to a JSON file.
pub fn write_results_json(path: &Path, student: &StudentProfile, results: &[RankedResult]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create export JSON '{}': {e}", path.display())))?;

    let ranking = RankingFile {
        tool: "admit",
        generated_at: Utc::now(),
        student,
        results,
    };

    serde_json::to_writer_pretty(file, &ranking)
        .map_err(|e| AppError::new(4, format!("Failed to write export JSON: {e}")))?;

    Ok(())
}

// Quote names like "Queen's University, Kingston" only when needed.
fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
