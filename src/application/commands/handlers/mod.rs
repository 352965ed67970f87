//! Command Handlers 实现

mod text_handlers;
mod transcribe_handler;

pub use text_handlers::*;
pub use transcribe_handler::*;
