#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use super::Role;

/// Text shown in an assistant bubble while its exchange is in flight.
pub const PLACEHOLDER_TEXT: &str = "Thinking…";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MessageType {
    Normal,
    Error,
}

#[derive(Clone, Debug)]
pub struct Message {
    pub role: Role,
    pub text: String,
    mtype: MessageType,
}

impl Message {
    pub fn new(role: Role, text: &str) -> Message {
        return Message {
            role,
            text: text.replace('\t', "  "),
            mtype: MessageType::Normal,
        };
    }

    pub fn new_with_type(role: Role, mtype: MessageType, text: &str) -> Message {
        return Message {
            role,
            text: text.replace('\t', "  "),
            mtype,
        };
    }

    pub fn placeholder() -> Message {
        return Message::new(Role::Assistant, PLACEHOLDER_TEXT);
    }

    pub fn message_type(&self) -> MessageType {
        return self.mtype;
    }

    pub fn is_error(&self) -> bool {
        return self.mtype == MessageType::Error;
    }

    /// Overwrites the text, keeping the role and type.
    pub fn replace(&mut self, text: &str) {
        self.text = text.replace('\t', "  ");
    }

    pub fn mark_error(&mut self) {
        self.mtype = MessageType::Error;
    }

    /// Only assistant replies get numbered code blocks.
    pub fn numbers_codeblocks(&self) -> bool {
        return self.role == Role::Assistant;
    }

    /// Contents of every fenced block, in order. Blocks without a language
    /// count too, and a fence left open runs to the end of the text.
    pub fn codeblocks(&self) -> Vec<String> {
        if !self.numbers_codeblocks() {
            return vec![];
        }

        let mut codeblocks: Vec<String> = vec![];
        let mut current_codeblock: Vec<&str> = vec![];
        let mut in_codeblock = false;

        for line in self.text.lines() {
            let trimmed = line.trim();
            if in_codeblock && trimmed == "```" {
                codeblocks.push(current_codeblock.join("\n"));
                current_codeblock = vec![];
                in_codeblock = false;
                continue;
            }

            if !in_codeblock && trimmed.starts_with("```") {
                in_codeblock = true;
                continue;
            }

            if in_codeblock {
                current_codeblock.push(line);
            }
        }

        if in_codeblock {
            codeblocks.push(current_codeblock.join("\n"));
        }

        return codeblocks;
    }
}
