//! Interest fit: share of the program's focus areas the student touches.

use std::collections::BTreeSet;

/// `|student ∩ program| / |program|`, or 0.0 when the program declares no tags.
///
/// This is coverage of the program's tags, not symmetric Jaccard similarity.
pub fn interest_score(student: &BTreeSet<String>, program: &BTreeSet<String>) -> f64 {
    if program.is_empty() {
        return 0.0;
    }
    let matches = program.intersection(student).count();
    matches as f64 / program.len() as f64
}
