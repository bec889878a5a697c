//! Pure domain logic shared by the database and pipeline crates.
//!
//! Nothing in here touches the network or the database: pagination bounds,
//! the predicate accumulator that renders parameterized SQL, validation
//! helpers, and the import summary types.

pub mod error;
pub mod import;
pub mod pagination;
pub mod query;
pub mod types;
pub mod validation;
