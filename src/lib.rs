//! `contract-reclass` library crate.
//!
//! The binary (`reclass`) is a thin wrapper around this library so that:
//!
//! - the classification rules are testable without spawning processes
//! - the cascade can be reused by other data-preparation steps

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod report;
pub mod rules;
