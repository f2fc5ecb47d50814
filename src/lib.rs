pub mod config;
pub mod editor;
pub mod error;
pub mod repl;

pub use config::Config;
pub use editor::TextBuffer;
pub use error::EditError;
