//! Reading wall-clock times and rendering them in other zones.
//!
//! Input carrying its own offset (`Z`, `+05:30`) names an instant directly.
//! Anything else is read as a local time in the source zone.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::debug;

use crate::error::{TimeError, TimeResult};
use crate::zone::{format_offset, offset_seconds, preset_info, PRESET_ZONES};

/// Output layout of [`convert_to_zone`].
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Output layout of [`format_for_input`].
pub const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

// `%.f` also matches when the fraction is absent.
const LOCAL_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%d/%m/%Y %H:%M:%S%.f",
    "%d/%m/%Y %H:%M",
];

/// One instant rendered in one zone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ZoneTime {
    /// IANA zone name.
    pub zone: String,
    /// Display name for preset zones.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'static str>,
    /// UTC offset at this instant, `+HH:MM`.
    pub offset: String,
    /// Local wall-clock time, `YYYY-MM-DD HH:MM:SS.mmm`.
    pub local: String,
}

/// Parse `input` into an instant.
///
/// Accepted forms: RFC 3339, `YYYY-MM-DD HH:MM[:SS[.fff]]` with or without
/// a `T` separator and optional offset, and `DD/MM/YYYY HH:MM[:SS[.fff]]`.
/// Forms without an offset are local times in `source`.
pub fn parse_input_time(input: &str, source: Tz) -> TimeResult<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return Err(TimeError::Empty);
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
        return Ok(instant.with_timezone(&Utc));
    }
    for format in OFFSET_FORMATS {
        if let Ok(instant) = DateTime::parse_from_str(input, format) {
            return Ok(instant.with_timezone(&Utc));
        }
    }

    let naive = LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .ok_or_else(|| TimeError::Unrecognized(input.to_string()))?;
    debug!(%naive, zone = source.name(), "reading local time");

    source
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| TimeError::NonexistentLocalTime {
            input: input.to_string(),
            zone: source.name().to_string(),
        })
}

/// Wall-clock time of `instant` in `zone`, `YYYY-MM-DD HH:MM:SS.mmm`.
pub fn convert_to_zone(instant: DateTime<Utc>, zone: Tz) -> String {
    instant.with_timezone(&zone).format(DISPLAY_FORMAT).to_string()
}

/// Wall-clock time of `instant` in `zone` as `YYYY-MM-DDTHH:MM:SS`, the
/// layout accepted back by [`parse_input_time`].
pub fn format_for_input(instant: DateTime<Utc>, zone: Tz) -> String {
    instant.with_timezone(&zone).format(INPUT_FORMAT).to_string()
}

/// Current wall-clock time in `zone`.
pub fn current_time_in(zone: Tz) -> String {
    convert_to_zone(Utc::now(), zone)
}

/// Render `instant` in `zone` with its offset.
pub fn zone_time(instant: DateTime<Utc>, zone: Tz) -> ZoneTime {
    ZoneTime {
        zone: zone.name().to_string(),
        label: preset_info(zone).map(|z| z.name),
        offset: format_offset(offset_seconds(zone, instant)),
        local: convert_to_zone(instant, zone),
    }
}

/// Render `instant` in every target zone, or in the preset zones when
/// `targets` is empty.
pub fn convert_all(instant: DateTime<Utc>, targets: &[Tz]) -> TimeResult<Vec<ZoneTime>> {
    if !targets.is_empty() {
        return Ok(targets.iter().map(|&zone| zone_time(instant, zone)).collect());
    }
    PRESET_ZONES
        .iter()
        .map(|preset| {
            preset
                .id
                .parse::<Tz>()
                .map(|zone| zone_time(instant, zone))
                .map_err(|_| TimeError::UnknownZone(preset.id.to_string()))
        })
        .collect()
}
