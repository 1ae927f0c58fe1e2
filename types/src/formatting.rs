//! Centralized time and fraction formatting utilities.
//!
//! All textual clock output (CLI state dumps, SVG titles, log fields) goes
//! through this module so the decimal reading and the wall-clock reading stay
//! consistent, and so European-style number formatting (swapping `.` and `,`)
//! is applied in one place.

const SECONDS_PER_DAY_MS: i64 = 86_400_000;

/// Apply European number format by swapping `.` and `,` in a formatted string.
fn europeanize(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '.' => result.push(','),
            ',' => result.push('.'),
            _ => result.push(c),
        }
    }
    result
}

/// Apply European formatting conditionally.
#[inline]
fn maybe_eu(s: String, european: bool) -> String {
    if european { europeanize(&s) } else { s }
}

/// Format a day fraction with the given number of decimal places.
///
/// # Examples
/// ```
/// use dclock_types::formatting::format_day_fraction;
/// assert_eq!(format_day_fraction(0.5, 5, false), "0.50000");
/// assert_eq!(format_day_fraction(0.5, 5, true), "0,50000");
/// assert_eq!(format_day_fraction(0.123456, 3, false), "0.123");
/// ```
pub fn format_day_fraction(fraction: f64, precision: usize, european: bool) -> String {
    maybe_eu(format!("{:.prec$}", fraction, prec = precision), european)
}

/// Format the elapsed share of the day as a percentage with 1 decimal place.
///
/// # Examples
/// ```
/// use dclock_types::formatting::format_pct_of_day;
/// assert_eq!(format_pct_of_day(0.5, false), "50.0%");
/// assert_eq!(format_pct_of_day(0.5, true), "50,0%");
/// ```
pub fn format_pct_of_day(fraction: f64, european: bool) -> String {
    maybe_eu(format!("{:.1}%", fraction * 100.0), european)
}

/// Format decimal time digits as `h.mm.ss`.
///
/// Callers pass the digits the ring display shows: the number of lit majors,
/// the coarse minor index and the fine minor index. Deriving them from the
/// indicator state keeps text and rings in agreement at digit boundaries.
/// A full day of lit majors prints as hour `10`.
///
/// # Examples
/// ```
/// use dclock_types::formatting::format_decimal_time;
/// assert_eq!(format_decimal_time(0, 0, 0), "0.00.00");
/// assert_eq!(format_decimal_time(5, 0, 0), "5.00.00");
/// assert_eq!(format_decimal_time(1, 23, 45), "1.23.45");
/// ```
pub fn format_decimal_time(hour: usize, minute: usize, second: usize) -> String {
    format!("{}.{:02}.{:02}", hour, minute, second)
}

/// Format seconds since midnight as a 24h wall-clock string `HH:MM:SS.mmm`.
///
/// Values outside a single day wrap around midnight.
///
/// # Examples
/// ```
/// use dclock_types::formatting::format_wall_clock;
/// assert_eq!(format_wall_clock(0.0), "00:00:00.000");
/// assert_eq!(format_wall_clock(43_200.0), "12:00:00.000");
/// assert_eq!(format_wall_clock(3_661.5), "01:01:01.500");
/// ```
pub fn format_wall_clock(seconds: f64) -> String {
    let total_ms = ((seconds * 1_000.0).round() as i64).rem_euclid(SECONDS_PER_DAY_MS);
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms / 60_000) % 60;
    let secs = (total_ms / 1_000) % 60;
    let millis = total_ms % 1_000;
    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, millis)
}
