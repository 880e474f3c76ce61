//! Time zone conversion for wall-clock timestamps.
//!
//! Reads a timestamp typed in one zone and renders the same instant in
//! others, using the IANA database from `chrono-tz`.
//!
//! # Key Types
//!
//! - [`ZoneTime`] -- One instant rendered in one zone
//! - [`ZoneInfo`] -- Preset zones offered by default
//! - [`TimeError`] -- Parse and lookup failures

pub mod convert;
pub mod error;
pub mod zone;

pub use convert::{
    convert_all, convert_to_zone, current_time_in, format_for_input, parse_input_time, zone_time,
    ZoneTime, DISPLAY_FORMAT, INPUT_FORMAT,
};
pub use error::{TimeError, TimeResult};
pub use zone::{format_offset, offset_seconds, parse_zone, preset_info, ZoneInfo, PRESET_ZONES};

pub use chrono_tz::Tz;
