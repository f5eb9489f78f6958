//! Result reporting
//!
//! - `text`: results block printed to stdout
//! - `json`: the same report as a JSON document

pub mod json;
pub mod text;
