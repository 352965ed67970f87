//! HTTP Handlers

mod ping;
mod text;
mod upload;

pub use ping::*;
pub use text::*;
pub use upload::*;
