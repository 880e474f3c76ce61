//! Time zone lookup and UTC offsets.

use chrono::{DateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::{TimeError, TimeResult};

/// A named zone offered by default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ZoneInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub abbreviation: &'static str,
}

/// Zones shown when no target zone is requested.
pub const PRESET_ZONES: [ZoneInfo; 3] = [
    ZoneInfo { id: "UTC", name: "UTC", abbreviation: "UTC" },
    ZoneInfo { id: "Asia/Riyadh", name: "Saudi Arabia", abbreviation: "AST" },
    ZoneInfo { id: "Asia/Colombo", name: "Sri Lanka", abbreviation: "IST" },
];

/// Resolve a zone by IANA name (`Asia/Riyadh`), preset display name
/// (`Sri Lanka`) or abbreviation (`AST`). Preset matches ignore case.
pub fn parse_zone(name: &str) -> TimeResult<Tz> {
    let name = name.trim();
    let id = PRESET_ZONES
        .iter()
        .find(|z| {
            [z.id, z.name, z.abbreviation]
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(name))
        })
        .map_or(name, |z| z.id);
    id.parse::<Tz>()
        .map_err(|_| TimeError::UnknownZone(name.to_string()))
}

/// The preset entry for `zone`, if it is one.
pub fn preset_info(zone: Tz) -> Option<&'static ZoneInfo> {
    PRESET_ZONES.iter().find(|z| z.id == zone.name())
}

/// Offset of `zone` from UTC at `at`, in seconds east of Greenwich.
pub fn offset_seconds(zone: Tz, at: DateTime<Utc>) -> i32 {
    zone.offset_from_utc_datetime(&at.naive_utc())
        .fix()
        .local_minus_utc()
}

/// Render an offset in seconds as `+HH:MM` / `-HH:MM`.
pub fn format_offset(seconds: i32) -> String {
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.unsigned_abs() / 60;
    format!("{}{:02}:{:02}", sign, minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_iana_and_preset_names() {
        assert_eq!(parse_zone("Asia/Riyadh").unwrap(), Tz::Asia__Riyadh);
        assert_eq!(parse_zone("utc").unwrap(), Tz::UTC);
        assert_eq!(parse_zone("sri lanka").unwrap(), Tz::Asia__Colombo);
        assert_eq!(parse_zone(" AST ").unwrap(), Tz::Asia__Riyadh);
        assert_eq!(parse_zone("Europe/Berlin").unwrap(), Tz::Europe__Berlin);
        assert_eq!(
            parse_zone("Mars/Olympus"),
            Err(TimeError::UnknownZone("Mars/Olympus".into()))
        );
    }

    #[test]
    fn fixed_offsets() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(offset_seconds(Tz::UTC, at), 0);
        assert_eq!(offset_seconds(Tz::Asia__Riyadh, at), 3 * 3600);
        assert_eq!(offset_seconds(Tz::Asia__Colombo, at), 5 * 3600 + 1800);
    }

    #[test]
    fn daylight_saving_changes_offset() {
        let winter = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let summer = Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap();
        assert_eq!(offset_seconds(Tz::Europe__Berlin, winter), 3600);
        assert_eq!(offset_seconds(Tz::Europe__Berlin, summer), 7200);
    }

    #[test]
    fn offset_rendering() {
        assert_eq!(format_offset(0), "+00:00");
        assert_eq!(format_offset(19_800), "+05:30");
        assert_eq!(format_offset(-12_600), "-03:30");
    }

    #[test]
    fn preset_lookup() {
        assert_eq!(preset_info(Tz::Asia__Colombo).map(|z| z.name), Some("Sri Lanka"));
        assert!(preset_info(Tz::Europe__Berlin).is_none());
    }
}
