//! Cohere families: Command, Command R and Embed.

mod command;
mod command_r;
mod embed;

pub use command::Command;
pub use command_r::CommandR;
pub use embed::CohereEmbed;
