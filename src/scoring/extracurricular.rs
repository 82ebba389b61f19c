//! Extracurricular fit against an institution's leadership bar.

/// Score per leadership level above the bar (no upper bound).
pub const EXCEED_BONUS: f64 = 0.05;

/// Score lost per leadership level below the bar.
pub const SHORTFALL_PENALTY: f64 = 0.2;

/// Compare the student's best leadership level with `required_level`.
///
/// Meeting the bar exactly scores 1.0; each level above adds 0.05, each level
/// below removes 0.2 (floored at 0).
pub fn ec_score(user_best: u8, required_level: u8) -> f64 {
    if user_best >= required_level {
        1.0 + EXCEED_BONUS * f64::from(user_best - required_level)
    } else {
        (1.0 - SHORTFALL_PENALTY * f64::from(required_level - user_best)).max(0.0)
    }
}
