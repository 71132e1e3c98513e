use super::classify::AreaClassification;

pub const WEAK_PREFIX: &str = "Focus on strengthening: ";
pub const STRONG_PREFIX: &str = "Build advanced skills in: ";

/// Turn weak/strong areas into guidance lines: the weak line first, then the
/// strong line. Categories are joined in the order given. Both sets empty
/// yields no lines.
pub fn compose(areas: &AreaClassification) -> Vec<String> {
    let mut lines = Vec::with_capacity(2);
    if !areas.weak.is_empty() {
        lines.push(format!("{WEAK_PREFIX}{}", areas.weak.join(", ")));
    }
    if !areas.strong.is_empty() {
        lines.push(format!("{STRONG_PREFIX}{}", areas.strong.join(", ")));
    }
    lines
}
