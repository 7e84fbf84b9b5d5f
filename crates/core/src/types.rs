/// All primary keys are server-generated UUIDs (`gen_random_uuid()`).
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
