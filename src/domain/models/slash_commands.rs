#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /copy (/c) [CODE_BLOCK_NUMBER?] - Copies the entire chat to your clipboard. When a CODE_BLOCK_NUMBER is used, only the specified code blocks are copied.
- /abort - Stops waiting on every message that has not been answered yet.
- /quit /exit (/q) - Exit.
- /help (/h) - Provides this help menu.

HOTKEYS:
- Enter or clicking Send - Send your message.
- Up arrow - Scroll up
- Down arrow - Scroll down
- CTRL+U - Page up
- CTRL+D - Page down
- CTRL+C - Abort unanswered messages if any are waiting, otherwise exit.

CODE BLOCKS:
Each code block in the chat is numbered with a (NUMBER) next to its opening fence. The CODE_BLOCK_NUMBER for /copy can be set as follows:
- `1` - Selects the first code block
- `1,3,5` - Selects code blocks 1, 3, and 5.
- `2..5`- Selects an inclusive range of code blocks between 2 and 5.
        "#;

    return text.trim().to_string();
}

pub struct SlashCommand {
    command: String,
    pub args: Vec<String>,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let mut words = text.split_whitespace().map(|e| return e.to_string());
        let command = words.next()?;

        let cmd = SlashCommand {
            command,
            args: words.collect(),
        };
        if cmd.is_quit()
            || cmd.is_copy_code_block()
            || cmd.is_copy_chat()
            || cmd.is_help()
            || cmd.is_abort()
        {
            return Some(cmd);
        }

        return None;
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_copy_code_block(&self) -> bool {
        return ["/c", "/copy"].contains(&self.command.as_str()) && !self.args.is_empty();
    }

    pub fn is_copy_chat(&self) -> bool {
        return ["/c", "/copy"].contains(&self.command.as_str()) && self.args.is_empty();
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }

    pub fn is_abort(&self) -> bool {
        return self.command == "/abort";
    }
}
