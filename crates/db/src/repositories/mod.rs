//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod import_error_repo;
pub mod record_repo;
pub mod report_repo;

pub use import_error_repo::ImportErrorRepo;
pub use record_repo::RecordRepo;
pub use report_repo::ReportRepo;
