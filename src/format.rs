// SPDX-License-Identifier: MPL-2.0
//! Time label formatting for the controls overlay.

use crate::config::HOURS_THRESHOLD_MS;

/// Formats a millisecond position as `MM:SS` or `HH:MM:SS`.
///
/// The value is truncated to whole seconds. Negative values never produce a
/// negative label; each component is floored at zero. The hours field is
/// present when `force_hours` is set or the value itself reaches one hour.
///
/// # Examples
///
/// ```
/// use player_controls::format::format_duration;
///
/// assert_eq!(format_duration(75_000, false), "01:15");
/// assert_eq!(format_duration(75_000, true), "00:01:15");
/// assert_eq!(format_duration(3_661_000, false), "01:01:01");
/// assert_eq!(format_duration(-500, false), "00:00");
/// ```
#[must_use]
pub fn format_duration(millis: i64, force_hours: bool) -> String {
    format_hms(millis, force_hours || millis >= HOURS_THRESHOLD_MS)
}

/// Formats with the hours field present exactly when `with_hours` is set.
/// Minutes are not wrapped when the field is absent.
fn format_hms(millis: i64, with_hours: bool) -> String {
    let total_secs = (millis / 1000).max(0);

    if with_hours {
        let hours = total_secs / 3600;
        let minutes = (total_secs / 60) % 60;
        let secs = total_secs % 60;
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

/// Whether labels for a video of this length carry an hours field.
#[must_use]
pub fn needs_hours(total_ms: i64) -> bool {
    total_ms >= HOURS_THRESHOLD_MS
}

/// Formats the current and total labels with one shared format.
///
/// The hours field is decided once from the total duration, so a 59-second
/// position in a two-hour video reads `00:00:59`, not `00:59`. A current
/// position past an hour in a shorter video keeps the `MM:SS` shape.
#[must_use]
pub fn format_progress(current_ms: i64, total_ms: i64) -> (String, String) {
    let hours = needs_hours(total_ms);
    (format_hms(current_ms, hours), format_hms(total_ms, hours))
}
