//! Output writers for joined records.

pub mod tsv;
