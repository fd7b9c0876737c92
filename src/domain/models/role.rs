use std::fmt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
    System,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::User => Config::get(ConfigKey::Username),
            Role::Assistant => Config::get(ConfigKey::AssistantName),
            Role::System => String::from("System"),
        };

        if !name.is_empty() {
            return write!(f, "{name}");
        }

        // Config has not been loaded yet.
        match self {
            Role::User => return write!(f, "You"),
            _ => return write!(f, "Assistant"),
        }
    }
}
