mod buffer;
mod cursor;
mod history;
mod lines;
mod render;
mod status;

pub use buffer::*;
pub use cursor::*;
pub use history::*;
pub use lines::{Ids, LineId, LineStore, Removed};
pub use render::*;
pub use status::*;
