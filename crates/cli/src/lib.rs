//! Interactive command-line front end over a JSON-file store.

pub mod args;
pub mod render;
pub mod session;

pub use args::Cli;
pub use session::Session;
