//! Small shared helpers.

pub mod json;
pub mod url;
