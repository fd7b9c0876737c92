mod action;
mod chat_client;
mod delivery;
mod event;
mod handle;
mod message;
mod role;
mod slash_commands;
mod textarea;
mod trigger;

pub use action::*;
pub use chat_client::*;
pub use delivery::*;
pub use event::*;
pub use handle::*;
pub use message::*;
pub use role::*;
pub use slash_commands::*;
pub use textarea::*;
pub use trigger::*;
