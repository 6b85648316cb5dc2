/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Timeline milestones are recorded in site-local wall-clock time.
pub type LocalTimestamp = chrono::NaiveDateTime;

/// Milestones are identified by their 1-based position in the journey.
pub type MilestoneId = u32;
