/// Mission templates are numbered by the application, starting at 1.
pub type MissionId = u32;

/// Feed post identifier as delivered by the feed endpoint.
pub type PostId = u64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
