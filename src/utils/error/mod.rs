//! Error handling utilities
//!
//! Errors here cover loading and parsing. Access decisions never surface as
//! errors; they are expressed as verdicts.

pub mod error;

pub use error::*;
