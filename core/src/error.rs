//! Error types for the dclock-core crate.

/// Error type for the pure clock operations: encoding, layout geometry and
/// clock-time parsing.
///
/// Every variant is a caller contract violation. Nothing here is transient,
/// so there is no retry path.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClockError {
    /// Returned when a time of day is NaN or infinite.
    #[error("invalid time of day: {value} (must be finite)")]
    InvalidInput {
        /// The rejected value.
        value: f64,
    },

    /// Returned when ring geometry cannot produce strictly increasing radii.
    #[error("invalid ring geometry: base {base}, spacing {spacing} (need base >= 0, spacing > 0 and strictly increasing finite radii)")]
    InvalidGeometry { base: f32, spacing: f32 },

    /// Returned when a textual clock time does not parse.
    #[error("invalid clock time {input:?} (expected HH:MM, HH:MM:SS or HH:MM:SS.fff)")]
    InvalidClockTime { input: String },
}
