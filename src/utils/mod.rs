//! Helpers shared by the library and the CLI.

pub mod progress;
pub mod validation;
