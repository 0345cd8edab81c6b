//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - reclassified CSV export (`export`)
//! - run summary JSON (`summary`)
//! - all-or-nothing file writes (`atomic`)

pub mod atomic;
pub mod export;
pub mod ingest;
pub mod summary;

pub use export::*;
pub use ingest::*;
pub use summary::*;
