//! HTTP Handlers

mod download;
mod generate;
mod ping;

pub use download::*;
pub use generate::*;
pub use ping::*;
