//! Time of day → indicator state.
//!
//! The day fraction (seconds since midnight / 86400) drives every indicator:
//!
//! - 10 major indicators form a thermometer code of the first decimal digit
//!   (at 35% of the day the first 3 are lit)
//! - one minor slot in `0..100` tracks progress at 1/1,000 of a day (coarse)
//! - one minor slot in `0..100` tracks progress at 1/100,000 of a day (fine)
//!
//! Boundary comparisons use native `f64` arithmetic with no epsilon. Minor
//! indices use a Euclidean remainder so negative input never yields a
//! negative slot.

use dclock_types::formatting::format_decimal_time;
use serde::Serialize;

use crate::error::ClockError;

pub const SECONDS_PER_DAY: f64 = 86_400.0;
/// Number of ring groups, one major indicator each
pub const GROUP_COUNT: usize = 10;
/// Minor indicators per group
pub const SLOTS_PER_GROUP: usize = 10;
/// Size of the shared minor address space
pub const MINOR_SLOTS: usize = GROUP_COUNT * SLOTS_PER_GROUP;

const COARSE_SCALE: f64 = 1_000.0;
const FINE_SCALE: f64 = 100_000.0;

/// Elapsed fraction of the day, `[0, 1)` for valid input
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct DayFraction(f64);

impl DayFraction {
    /// Derive the day fraction from seconds since midnight.
    ///
    /// Out-of-range but finite values are accepted as-is.
    pub fn from_time_of_day(time_of_day: f64) -> Result<Self, ClockError> {
        if !time_of_day.is_finite() {
            return Err(ClockError::InvalidInput { value: time_of_day });
        }
        Ok(Self(time_of_day / SECONDS_PER_DAY))
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// `floor(fraction * scale) mod 100` with a mathematical modulo
    fn minor_index(self, scale: f64) -> usize {
        (self.0 * scale).floor().rem_euclid(MINOR_SLOTS as f64) as usize
    }
}

/// Which indicators are lit for one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorState {
    day_fraction: DayFraction,
    major_digits: [bool; GROUP_COUNT],
    /// Always `MINOR_SLOTS` long
    minor_lit: Vec<bool>,
    coarse_index: usize,
    fine_index: usize,
}

impl IndicatorState {
    pub fn day_fraction(&self) -> DayFraction {
        self.day_fraction
    }

    /// Thermometer-coded major digits, index `i` lit iff fraction >= (i+1)/10
    pub fn major_digits(&self) -> &[bool; GROUP_COUNT] {
        &self.major_digits
    }

    /// Merged minor sequence, at most two entries set
    pub fn minor_lit(&self) -> &[bool] {
        &self.minor_lit
    }

    /// The ten minor slots belonging to `group`
    pub fn minor_chunk(&self, group: usize) -> &[bool] {
        let start = group * SLOTS_PER_GROUP;
        &self.minor_lit[start..start + SLOTS_PER_GROUP]
    }

    /// Minor slot lit at 1/1,000-of-a-day resolution
    pub fn coarse_index(&self) -> usize {
        self.coarse_index
    }

    /// Minor slot lit at 1/100,000-of-a-day resolution
    pub fn fine_index(&self) -> usize {
        self.fine_index
    }

    /// Number of lit major indicators
    pub fn lit_major_count(&self) -> usize {
        self.major_digits.iter().filter(|&&on| on).count()
    }

    /// Decimal reading `h.mm.ss` as shown by the rings
    pub fn decimal_time(&self) -> String {
        format_decimal_time(self.lit_major_count(), self.coarse_index, self.fine_index)
    }
}

/// Encode seconds since midnight into an indicator state.
///
/// # Errors
///
/// Returns [`ClockError::InvalidInput`] for NaN or infinite input.
pub fn encode(time_of_day: f64) -> Result<IndicatorState, ClockError> {
    let day_fraction = DayFraction::from_time_of_day(time_of_day)?;
    let fraction = day_fraction.get();

    let major_digits: [bool; GROUP_COUNT] =
        std::array::from_fn(|i| fraction >= (i + 1) as f64 / GROUP_COUNT as f64);

    let coarse_index = day_fraction.minor_index(COARSE_SCALE);
    let fine_index = day_fraction.minor_index(FINE_SCALE);

    let mut minor_lit = vec![false; MINOR_SLOTS];
    minor_lit[coarse_index] = true;
    minor_lit[fine_index] = true;

    Ok(IndicatorState {
        day_fraction,
        major_digits,
        minor_lit,
        coarse_index,
        fine_index,
    })
}

/// Wrap any finite time into `[0, 86400)`.
///
/// # Errors
///
/// Returns [`ClockError::InvalidInput`] for NaN or infinite input.
pub fn normalize_time_of_day(time_of_day: f64) -> Result<f64, ClockError> {
    if !time_of_day.is_finite() {
        return Err(ClockError::InvalidInput { value: time_of_day });
    }
    let wrapped = time_of_day.rem_euclid(SECONDS_PER_DAY);
    // rem_euclid can round up to the divisor for tiny negative inputs
    if wrapped >= SECONDS_PER_DAY {
        Ok(0.0)
    } else {
        Ok(wrapped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_minor_slots(state: &IndicatorState) -> Vec<usize> {
        state
            .minor_lit()
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(|(i, _)| i)
            .collect()
    }

    fn is_thermometer(digits: &[bool]) -> bool {
        digits.windows(2).all(|pair| !pair[1] || pair[0])
    }

    #[test]
    fn test_midnight() {
        let state = encode(0.0).unwrap();
        assert_eq!(state.major_digits(), &[false; GROUP_COUNT]);
        assert_eq!(state.coarse_index(), 0);
        assert_eq!(state.fine_index(), 0);
        // Both minors coincide at group 0, slot 0
        assert_eq!(lit_minor_slots(&state), vec![0]);
    }

    #[test]
    fn test_thirty_percent() {
        let state = encode(0.3 * SECONDS_PER_DAY).unwrap();
        assert_eq!(
            state.major_digits(),
            &[true, true, true, false, false, false, false, false, false, false]
        );
        assert_eq!(state.coarse_index(), 0);
        assert_eq!(state.fine_index(), 0);
    }

    #[test]
    fn test_midday() {
        let state = encode(43_200.0).unwrap();
        assert_eq!(state.day_fraction().get(), 0.5);
        assert_eq!(state.lit_major_count(), 5);
        assert!(is_thermometer(state.major_digits()));
        assert_eq!(state.coarse_index(), 0);
        assert_eq!(state.fine_index(), 0);
    }

    #[test]
    fn test_coarse_and_fine_indices() {
        // 33/64 of a day is exactly representable
        let state = encode(44_550.0).unwrap();
        assert_eq!(state.lit_major_count(), 5);
        assert_eq!(state.coarse_index(), 15);
        assert_eq!(state.fine_index(), 62);
        assert_eq!(lit_minor_slots(&state), vec![15, 62]);
        assert!(state.minor_chunk(1)[5]);
        assert!(state.minor_chunk(6)[2]);
    }

    #[test]
    fn test_early_morning_indices_span_groups() {
        // 1/128 of a day
        let state = encode(675.0).unwrap();
        assert_eq!(state.lit_major_count(), 0);
        assert_eq!(state.coarse_index(), 7);
        assert_eq!(state.fine_index(), 81);
    }

    #[test]
    fn test_thermometer_code_across_day() {
        let mut t = 0.0;
        while t < SECONDS_PER_DAY {
            let state = encode(t).unwrap();
            assert!(is_thermometer(state.major_digits()), "not a thermometer code at t={t}");
            assert!(lit_minor_slots(&state).len() <= 2, "too many minors lit at t={t}");
            assert!(state.coarse_index() < MINOR_SLOTS);
            assert!(state.fine_index() < MINOR_SLOTS);
            assert!(state.minor_lit()[state.coarse_index()]);
            assert!(state.minor_lit()[state.fine_index()]);
            t += 37.3;
        }
    }

    #[test]
    fn test_major_boundaries_use_native_comparison() {
        // 8640 / 86400 and 1.0 / 10.0 round to the same double
        assert!(encode(8_640.0).unwrap().major_digits()[0]);
        assert!(!encode(8_639.999).unwrap().major_digits()[0]);
        assert_eq!(encode(77_760.0).unwrap().lit_major_count(), 9);
        assert_eq!(encode(77_759.999).unwrap().lit_major_count(), 8);
    }

    #[test]
    fn test_end_of_day() {
        // One millisecond before midnight: the tenth major needs a full day
        let state = encode(SECONDS_PER_DAY - 0.001).unwrap();
        assert_eq!(state.lit_major_count(), 9);
        assert!(!state.major_digits()[9]);

        // Below half an ulp of 86400 the subtraction rounds back to a full day
        let state = encode(SECONDS_PER_DAY - 1e-12).unwrap();
        assert_eq!(state.major_digits(), &[true; GROUP_COUNT]);
    }

    #[test]
    fn test_full_day_wraps_minors() {
        let state = encode(SECONDS_PER_DAY).unwrap();
        assert_eq!(state.major_digits(), &[true; GROUP_COUNT]);
        assert_eq!(state.coarse_index(), 0);
        assert_eq!(state.fine_index(), 0);
    }

    #[test]
    fn test_negative_input_uses_euclidean_modulo() {
        let state = encode(-675.0).unwrap();
        assert_eq!(state.lit_major_count(), 0);
        // floor(-7.8125) = -8 → 92, floor(-781.25) = -782 → 18
        assert_eq!(state.coarse_index(), 92);
        assert_eq!(state.fine_index(), 18);
    }

    #[test]
    fn test_non_finite_input_rejected() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(encode(value), Err(ClockError::InvalidInput { .. })));
        }
    }

    #[test]
    fn test_encode_is_idempotent() {
        let a = encode(12_345.678).unwrap();
        let b = encode(12_345.678).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_normalize_time_of_day() {
        assert_eq!(normalize_time_of_day(43_200.0).unwrap(), 43_200.0);
        assert_eq!(normalize_time_of_day(SECONDS_PER_DAY).unwrap(), 0.0);
        assert_eq!(normalize_time_of_day(-1.0).unwrap(), 86_399.0);
        assert_eq!(normalize_time_of_day(-1e-20).unwrap(), 0.0);
        assert!(normalize_time_of_day(f64::NAN).is_err());
    }

    #[test]
    fn test_decimal_time_reading() {
        assert_eq!(encode(0.0).unwrap().decimal_time(), "0.00.00");
        assert_eq!(encode(25_920.0).unwrap().decimal_time(), "3.00.00");
        assert_eq!(encode(44_550.0).unwrap().decimal_time(), "5.15.62");
    }

    #[test]
    fn test_decimal_hour_matches_majors_at_boundaries() {
        for tenth in 1..10 {
            let boundary = tenth as f64 * 8_640.0;
            let below = f64::from_bits(boundary.to_bits() - 1);
            let above = f64::from_bits(boundary.to_bits() + 1);
            for time in [below, boundary, above] {
                let state = encode(time).unwrap();
                let reading = state.decimal_time();
                let hour = reading.split('.').next().unwrap();
                assert_eq!(
                    hour,
                    state.lit_major_count().to_string(),
                    "t={time} reads {reading}"
                );
            }
        }
    }
}
