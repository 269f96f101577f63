//! Coordinate validation and timezone resolution.

use chrono_tz::Tz;

use crate::config::Config;

/// Timezone chosen for a request, plus the value forwarded to the upstream
/// provider.
///
/// The two differ for locations outside the city table: the upstream is told
/// the literal `auto` so it can self-select, while local times use the
/// longitude estimate from [`estimate_timezone`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedZone {
    pub tz: Tz,
    /// `timezone` query parameter for the upstream request: an IANA name for a
    /// known city, else `auto`.
    pub api_param: String,
}

/// Validate latitude and longitude bounds.
pub fn validate_coordinates(lat: f64, lon: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
}

/// Estimate a fixed-offset zone from longitude alone.
///
/// `Etc/GMT` names use the POSIX sign convention: a zone nine hours ahead of
/// UTC is `Etc/GMT-9`. The estimate ignores political and daylight-saving
/// boundaries; that is a known limitation, not a bug.
pub fn estimate_timezone(lon: f64) -> Tz {
    let utc_offset = (lon / 15.0).round() as i32;
    let tz_name = if utc_offset == 0 {
        "Etc/GMT".to_string()
    } else {
        format!(
            "Etc/GMT{}{}",
            if utc_offset < 0 { '+' } else { '-' },
            utc_offset.abs()
        )
    };
    // Valid longitudes keep the offset within -12..=12, all of which exist in
    // the tz database.
    tz_name.parse().unwrap_or(Tz::UTC)
}

/// Resolve the timezone to localize timestamps in.
///
/// A hint naming a known city wins and also fixes the upstream `timezone`
/// parameter to that city's IANA name; anything else falls back to the
/// longitude estimate and tells the upstream to pick for itself.
pub fn resolve_timezone(lon: f64, city_hint: Option<&str>, config: &Config) -> ResolvedZone {
    match city_hint.and_then(|name| config.city(name)) {
        Some(city) => ResolvedZone {
            tz: city.timezone,
            api_param: city.timezone.name().to_string(),
        },
        None => ResolvedZone {
            tz: estimate_timezone(lon),
            api_param: "auto".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_within_bounds_are_valid() {
        assert!(validate_coordinates(0.0, 0.0));
        assert!(validate_coordinates(90.0, 180.0));
        assert!(validate_coordinates(-90.0, -180.0));
        assert!(validate_coordinates(35.6762, 139.6503));
    }

    #[test]
    fn coordinates_outside_bounds_are_rejected() {
        assert!(!validate_coordinates(91.0, 0.0));
        assert!(!validate_coordinates(-90.1, 0.0));
        assert!(!validate_coordinates(0.0, 180.5));
        assert!(!validate_coordinates(0.0, -181.0));
        assert!(!validate_coordinates(91.0, 181.0));
    }

    #[test]
    fn zero_longitude_estimates_the_zero_offset_zone() {
        assert_eq!(estimate_timezone(0.0).name(), "Etc/GMT");
    }

    #[test]
    fn eastward_longitudes_get_inverted_sign_names() {
        // Tokyo: 139.6503 / 15 rounds to 9, nine hours ahead of UTC.
        assert_eq!(estimate_timezone(139.6503).name(), "Etc/GMT-9");
        assert_eq!(estimate_timezone(180.0).name(), "Etc/GMT-12");
    }

    #[test]
    fn westward_longitudes_get_positive_suffixes() {
        // Phoenix: -112.074 / 15 rounds to -7.
        assert_eq!(estimate_timezone(-112.074).name(), "Etc/GMT+7");
        assert_eq!(estimate_timezone(-180.0).name(), "Etc/GMT+12");
    }

    #[test]
    fn estimate_is_deterministic() {
        assert_eq!(estimate_timezone(139.6503), estimate_timezone(139.6503));
    }

    #[test]
    fn known_city_hint_wins_over_estimation() {
        let config = Config::default();
        let zone = resolve_timezone(139.6503, Some("Tokyo, Japan"), &config);
        assert_eq!(zone.tz.name(), "Asia/Tokyo");
        assert_eq!(zone.api_param, "Asia/Tokyo");
    }

    #[test]
    fn unknown_hint_falls_back_to_estimate_and_auto() {
        let config = Config::default();
        let zone = resolve_timezone(139.6503, Some("Atlantis"), &config);
        assert_eq!(zone.tz.name(), "Etc/GMT-9");
        assert_eq!(zone.api_param, "auto");

        let zone = resolve_timezone(0.0, None, &config);
        assert_eq!(zone.tz.name(), "Etc/GMT");
        assert_eq!(zone.api_param, "auto");
    }

    #[test]
    fn every_table_city_resolves_to_its_stored_zone() {
        let config = Config::default();
        for (name, city) in &config.cities {
            let zone = resolve_timezone(city.lon, Some(name), &config);
            assert_eq!(zone.tz, city.timezone, "city {name}");
            assert_eq!(zone.api_param, city.timezone.name());
        }
    }
}
