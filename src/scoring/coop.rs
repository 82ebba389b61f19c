//! Co-op preference fit, applied as a multiplier on the weighted score.

use std::collections::BTreeSet;

use crate::domain::CoopOption;

/// Student wants co-op, program only runs a regular stream.
pub const NO_COOP_AVAILABLE: f64 = 0.85;

/// Student wants a regular stream, program makes co-op mandatory.
pub const COOP_MANDATORY: f64 = 0.92;

pub fn coop_fit(wants_coop: bool, offered: &BTreeSet<CoopOption>) -> f64 {
    match (wants_coop, offered.contains(&CoopOption::Yes), offered.contains(&CoopOption::No)) {
        (true, true, _) | (false, _, true) => 1.0,
        (true, false, _) => NO_COOP_AVAILABLE,
        (false, _, false) => COOP_MANDATORY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offered(items: &[CoopOption]) -> BTreeSet<CoopOption> {
        items.iter().copied().collect()
    }

    #[test]
    fn matching_stream_is_perfect() {
        assert_eq!(coop_fit(true, &offered(&[CoopOption::Yes])), 1.0);
        assert_eq!(coop_fit(true, &offered(&[CoopOption::Yes, CoopOption::No])), 1.0);
        assert_eq!(coop_fit(false, &offered(&[CoopOption::No])), 1.0);
        assert_eq!(coop_fit(false, &offered(&[CoopOption::Yes, CoopOption::No])), 1.0);
    }

    #[test]
    fn missing_coop_costs_more_than_mandatory_coop() {
        assert_eq!(coop_fit(true, &offered(&[CoopOption::No])), NO_COOP_AVAILABLE);
        assert_eq!(coop_fit(false, &offered(&[CoopOption::Yes])), COOP_MANDATORY);
        assert!(NO_COOP_AVAILABLE < COOP_MANDATORY);
    }
}
