//! Domain services and the batch import orchestrator.
//!
//! Everything here is written against the storage seams in
//! [`arena_db::store`], so it runs the same over PostgreSQL or an in-memory
//! double.

pub mod error;
pub mod import;
pub mod reports;
pub mod service;

pub use import::Importer;
pub use service::RecordService;
