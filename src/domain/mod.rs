//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - column names of the contract dataset
//! - the classification label and decision tier (`Label`, `Tier`, `Decision`)
//! - loan records as read from the input (`LoanRecord`, `ContractRow`)
//! - run configuration (`Thresholds`, `ClassifyConfig`)

pub mod types;

pub use types::*;
