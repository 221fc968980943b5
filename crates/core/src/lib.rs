//! Domain types and pure logic for the NGO reporting service.
//!
//! Nothing in this crate touches the database: it holds the rules the report
//! queries depend on (age buckets, donor naming, ratio arithmetic, filter
//! validation) plus the display formatting used by the HTTP layer.

pub mod age;
pub mod campaign;
pub mod donor;
pub mod error;
pub mod filters;
pub mod formatting;
pub mod math;
pub mod types;
