/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps carry the reference-timezone offset they were stamped in.
pub type Timestamp = chrono::DateTime<chrono::FixedOffset>;
