//! AI21 Labs families.

mod jamba;
mod jurassic;

pub use jamba::Jamba;
pub use jurassic::Jurassic;
