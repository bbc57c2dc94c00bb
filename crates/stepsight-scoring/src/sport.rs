//! Per-sport multipliers.

/// Catalog order is the tie-break when a sport string contains more than
/// one key.
pub const SPORT_MULTIPLIERS: [(&str, f64); 10] = [
    ("basketball", 1.15),
    ("soccer", 1.12),
    ("football", 1.10),
    ("skiing", 1.13),
    ("volleyball", 1.08),
    ("tennis", 1.05),
    ("gymnastics", 1.10),
    ("running", 0.95),
    ("swimming", 0.90),
    ("cycling", 0.92),
];

pub const DEFAULT_MULTIPLIER: f64 = 1.0;

/// First catalog key contained in the lower-cased sport string.
pub fn match_sport(sport: &str) -> Option<(&'static str, f64)> {
    let lowered = sport.to_lowercase();
    SPORT_MULTIPLIERS
        .iter()
        .find(|(key, _)| lowered.contains(*key))
        .copied()
}

pub fn sport_multiplier(sport: &str) -> f64 {
    match_sport(sport).map_or(DEFAULT_MULTIPLIER, |(_, multiplier)| multiplier)
}
