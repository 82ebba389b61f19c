//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the scoring code stays clean and testable
//! - output changes are localized

use crate::domain::{Catalog, RankedResult, StudentProfile};
use crate::rank::ProgramTally;
use crate::scoring::{GradeMode, weights_for_grade};

/// Header describing the profile, the catalog it ranks against and the weighting regime.
pub fn format_profile_summary(student: &StudentProfile, source: &str) -> String {
    let mode = GradeMode::for_grade(student.grade_level);
    let w = weights_for_grade(student.grade_level);

    let mut out = String::new();
    out.push_str("=== admit - Program Match ===\n");
    out.push_str(&format!("Catalog: {source}\n"));
    out.push_str(&format!(
        "Grade: {} ({} mode) | Average: {:.1}% | Co-op: {}\n",
        student.grade_level,
        mode.label(),
        student.average,
        if student.wants_coop { "yes" } else { "no" },
    ));
    out.push_str(&format!(
        "Weights: academic={:.2} interest={:.2} ec={:.2}\n",
        w.academic, w.interest, w.ec
    ));
    if !student.major_interests.is_empty() {
        let interests: Vec<&str> = student.major_interests.iter().map(String::as_str).collect();
        out.push_str(&format!("Interests: {}\n", interests.join(", ")));
    }
    out.push('\n');
    out
}

/// Ranked results table (top-N).
pub fn format_rankings(results: &[RankedResult], top_n: usize) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:>4} {:<30} {:<28} {:>6} {:>6} {:>6} {:>6} {:>6}\n",
            "#", "university", "program", "score", "acad", "int", "ec", "coop"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<4} {:-<30} {:-<28} {:-<6} {:-<6} {:-<6} {:-<6} {:-<6}\n",
            "", "", "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for (idx, r) in results.iter().take(top_n).enumerate() {
        out.push_str(
            format!(
                "{:>4} {:<30} {:<28} {:>6.1} {:>6.2} {:>6.2} {:>6.2} {:>6.2}\n",
                idx + 1,
                truncate(&r.university, 30),
                truncate(&r.program, 28),
                r.score,
                r.breakdown.academic,
                r.breakdown.interest,
                r.breakdown.ec,
                r.breakdown.coop_fit,
            )
            .trim_end(),
        );
        out.push('\n');
        if !r.missing_courses.is_empty() {
            out.push_str(&format!("       missing: {}\n", r.missing_courses.join(", ")));
        }
    }

    out
}

/// Catalog overview for `admit check`.
pub fn format_catalog_summary(catalog: &Catalog, source: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("Catalog: {source}\n"));
    out.push_str(&format!(
        "Institutions: {} | Programs: {}\n\n",
        catalog.institutions.len(),
        catalog.program_count()
    ));
    for inst in &catalog.institutions {
        let coop: Vec<String> = inst
            .coop_options
            .iter()
            .map(|c| format!("{c:?}").to_lowercase())
            .collect();
        out.push_str(&format!(
            "- {} (ec_quality={}, co-op=[{}])\n",
            inst.name,
            inst.ec_quality,
            coop.join(", ")
        ));
        for p in &inst.programs {
            let avg = p.requirements.recommended_average;
            out.push_str(&format!(
                "    {:<28} avg=[{:.0}, {:.0}] courses={} tags={}\n",
                truncate(&p.name, 28),
                avg.min,
                avg.max,
                p.requirements.required_courses.len(),
                p.requirements.interest_fields.len(),
            ));
        }
    }
    if !catalog.warnings.is_empty() {
        out.push_str("\nWarnings:\n");
        for w in &catalog.warnings {
            out.push_str(&format!("- {w}\n"));
        }
    }
    out
}

/// Cohort summary table.
pub fn format_cohort_summary(tallies: &[ProgramTally], students: usize, top_n: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("Cohort: {students} student(s)\n\n"));
    out.push_str(
        format!("{:<30} {:<28} {:>8} {:>8}\n", "university", "program", "top", "mean")
            .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<30} {:-<28} {:-<8} {:-<8}\n", "", "", "", "").trim_end());
    out.push('\n');
    for t in tallies.iter().take(top_n) {
        out.push_str(
            format!(
                "{:<30} {:<28} {:>8} {:>8.1}\n",
                truncate(&t.university, 30),
                truncate(&t.program, 28),
                t.top_matches,
                t.mean_score
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
