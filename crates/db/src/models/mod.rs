//! Row models returned by the report queries.

pub mod report;
