//! Read student profiles from JSON files.

use std::fs::File;
use std::path::Path;

use crate::domain::StudentProfile;
use crate::error::AppError;

/// Read and validate a single profile.
pub fn read_profile_json(path: &Path) -> Result<StudentProfile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open profile JSON '{}': {e}", path.display())))?;
    let profile: StudentProfile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid profile JSON '{}': {e}", path.display())))?;
    profile.validate()?;
    Ok(profile)
}

/// Read and validate a cohort (a JSON array of profiles).
pub fn read_cohort_json(path: &Path) -> Result<Vec<StudentProfile>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open cohort JSON '{}': {e}", path.display())))?;
    let cohort: Vec<StudentProfile> = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid cohort JSON '{}': {e}", path.display())))?;
    if cohort.is_empty() {
        return Err(AppError::new(2, format!("Cohort '{}' contains no profiles.", path.display())));
    }
    for (idx, profile) in cohort.iter().enumerate() {
        profile
            .validate()
            .map_err(|e| AppError::new(2, format!("Profile #{idx}: {e}")))?;
    }
    Ok(cohort)
}
