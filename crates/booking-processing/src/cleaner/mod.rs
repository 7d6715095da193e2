//! Row-level cleaning stages.
//!
//! This module provides:
//! - Placeholder normalization, guest-count filtering and arrival date parsing
//! - Exact duplicate removal

mod duplicates;
mod inconsistencies;

pub use duplicates::DuplicateRemover;
pub use inconsistencies::{InconsistencyFixer, InconsistencyReport, build_date};
