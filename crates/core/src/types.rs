/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Calendar dates (donation dates, campaign ranges, birth dates).
pub type Date = chrono::NaiveDate;
