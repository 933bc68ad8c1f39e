/// Server-assigned identifiers (annotations, projects, media, links) are integers.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
