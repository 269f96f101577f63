//! Sky-condition code lookup.

/// Map an upstream weather code to a short human-readable phrase.
///
/// Total over integers: codes without an entry become `"Unknown"`. The phrases
/// are part of the service's wire format and must stay stable.
pub fn describe(code: i64) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Foggy",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        95 => "Thunderstorm",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_stable_phrases() {
        assert_eq!(describe(0), "Clear sky");
        assert_eq!(describe(2), "Partly cloudy");
        assert_eq!(describe(48), "Depositing rime fog");
        assert_eq!(describe(55), "Dense drizzle");
        assert_eq!(describe(61), "Slight rain");
        assert_eq!(describe(75), "Heavy snow fall");
        assert_eq!(describe(95), "Thunderstorm");
    }

    #[test]
    fn lookup_is_total() {
        for code in -5..=120 {
            assert!(!describe(code).is_empty());
        }
        assert_eq!(describe(4), "Unknown");
        assert_eq!(describe(96), "Unknown");
        assert_eq!(describe(i64::MAX), "Unknown");
    }
}
