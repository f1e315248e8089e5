//! Configuration validation

mod config_validators;
mod trait_def;

pub use trait_def::Validate;
