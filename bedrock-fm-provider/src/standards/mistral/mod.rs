//! Mistral AI families.

mod instruct;
mod large;

pub use instruct::Mistral;
pub use large::MistralLarge;
