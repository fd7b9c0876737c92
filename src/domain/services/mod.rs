pub mod actions;
mod bubble;
mod bubble_list;
mod chat_panel;
pub mod clipboard;
mod code_blocks;
pub mod events;
mod scroll;

pub use bubble::*;
pub use bubble_list::*;
pub use chat_panel::*;
pub use code_blocks::*;
pub use scroll::*;
