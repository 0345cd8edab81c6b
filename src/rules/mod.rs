//! Contract classification rules.
//!
//! Responsibilities:
//!
//! - accent/case-insensitive text normalization
//! - the fixed program table (forced labels)
//! - the investment keyword set
//! - the three-tier cascade: program → keyword → threshold

pub mod cascade;
pub mod keywords;
pub mod normalize;
pub mod program;

pub use cascade::*;
pub use keywords::*;
pub use normalize::*;
pub use program::*;
