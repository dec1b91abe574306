//! Backend test support utilities
//!
//! This crate provides utilities specifically for backend testing:
//! unified logging initialization and problem-details assertions.

pub mod problem_details;
pub mod test_logging;
