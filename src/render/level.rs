/// Display classification for the most severe levels.
pub const DANGER: &str = "danger";

/// Map a record level to its display classification.
///
/// `critical` and `error` become [`DANGER`]; every other value passes
/// through unchanged, including the empty string.
pub fn classify_level(level: &str) -> String {
    match level {
        "critical" | "error" => DANGER.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severe_levels_are_danger() {
        assert_eq!(classify_level("critical"), "danger");
        assert_eq!(classify_level("error"), "danger");
    }

    #[test]
    fn test_other_levels_pass_through() {
        for level in ["warning", "info", "debug", "notice", "ERROR", "", "danger"] {
            assert_eq!(classify_level(level), level);
        }
    }
}
