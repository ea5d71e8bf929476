//! Nexus Index: a weighted four-pillar progression score.
//!
//! The index summarizes a student's session, report and platform activity
//! history into a 0-100 score, a qualitative level and a trend.
//!
//! | Pillar | Weight | Measures |
//! |---|---|---|
//! | Assiduité | 0.30 | attendance of past sessions |
//! | Progression | 0.30 | coach ratings, recent reports counting double |
//! | Engagement | 0.20 | capped platform activity |
//! | Régularité | 0.20 | session frequency and long gaps |
//!
//! Computation is a pure function of a [`NexusIndexData`] snapshot and an
//! explicit "now" (see the `_at` variants). Snapshots are assembled by an
//! [`IndexDataSource`].
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use nexus_index::{IndexLevel, NexusIndexData, StudentRecord, Trend, compute_from_data_at};
//!
//! let now = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
//! let data = NexusIndexData {
//!     student: Some(StudentRecord { id: "s1".into(), created_at: now }),
//!     ..Default::default()
//! };
//!
//! let index = compute_from_data_at(&data, now).unwrap();
//! assert_eq!(index.global_score, 0);
//! assert_eq!(index.level, IndexLevel::Debutant);
//! assert_eq!(index.trend, Trend::Stable);
//! ```

pub mod composite;
pub mod error;
pub mod period;
pub mod pillars;
pub mod source;
pub mod trend;
pub mod types;

pub use composite::{
    LEVEL_THRESHOLDS, MIN_SESSIONS_FOR_INDEX, PILLAR_WEIGHTS, PillarInputs, build_result,
    compute_from_data, compute_from_data_at, level_for,
};
pub use error::{FetchError, Result};
pub use period::{RECENT_WINDOW_DAYS, TimePeriod, TrendWindows};
pub use pillars::{
    compute_assiduite, compute_engagement, compute_progression, compute_progression_at,
    compute_regularite, compute_regularite_at,
};
pub use source::{
    IndexDataSource, InMemorySource, JsonFileSource, compute_nexus_index, compute_nexus_index_at,
};
pub use trend::{classify_signal, compute_trend, compute_trend_at, trend_signal};
pub use types::*;
