/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Experience points. Stored as BIGINT so long-running characters cannot
/// overflow the balance.
pub type Xp = i64;
