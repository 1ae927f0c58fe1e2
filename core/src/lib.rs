pub mod composer;
pub mod config;
pub mod encoder;
pub mod error;
pub mod sampler;
pub mod time_source;

// Re-exports for convenience
pub use composer::{
    Indicator, IndicatorRole, Layout, RING_COUNT, RINGS_PER_GROUP, RingGeometry, compose,
    compose_default,
};
pub use config::{AppConfig, ConfigError, load_config};
pub use encoder::{
    DayFraction, GROUP_COUNT, IndicatorState, MINOR_SLOTS, SECONDS_PER_DAY, SLOTS_PER_GROUP,
    encode, normalize_time_of_day,
};
pub use error::ClockError;
pub use sampler::{ClockFrame, SamplerHandle, sample, spawn_sampler};
pub use time_source::{
    FixedTime, LocalClock, OffsetClock, TimeSource, parse_clock_time, seconds_since_midnight,
};
