//! Utilities shared by the run and its reporting

pub mod buffer;
pub mod units;
