use anyhow::bail;
use anyhow::Result;

use crate::domain::models::Message;
use crate::domain::models::SlashCommand;

#[cfg(test)]
#[path = "code_blocks_test.rs"]
mod tests;

/// Every fenced block in the chat, numbered from 1 in order of appearance.
#[derive(Default)]
pub struct CodeBlocks {
    codeblocks: Vec<String>,
}

impl CodeBlocks {
    pub fn replace_from_messages(&mut self, messages: &[Message]) {
        self.codeblocks = messages
            .iter()
            .flat_map(|msg| {
                return msg.codeblocks();
            })
            .collect();
    }

    pub fn len(&self) -> usize {
        return self.codeblocks.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.codeblocks.is_empty();
    }

    fn parse_number(&self, text: &str) -> Result<usize> {
        let number = match text.trim().parse::<usize>() {
            Ok(number) => number,
            Err(_) => bail!(format!("'{text}' is not a code block number.")),
        };

        if number == 0 || number > self.codeblocks.len() {
            bail!(format!("{number} is out of bounds."));
        }

        return Ok(number - 1);
    }

    /// Joins the blocks selected by `1`, `1,3` or `2..4` style arguments.
    pub fn blocks_from_slash_commands(&self, command: &SlashCommand) -> Result<String> {
        if self.codeblocks.is_empty() {
            bail!("There are no code blocks in this chat yet.");
        }

        let mut indexes = vec![];
        for arg in command.args.iter() {
            for selector in arg.split(',').map(|e| return e.trim()) {
                if selector.is_empty() {
                    continue;
                }

                if let Some((first, last)) = selector.split_once("..") {
                    let first = self.parse_number(first)?;
                    let last = self.parse_number(last)?;
                    if first > last {
                        bail!(format!("{selector} is not a valid range."));
                    }
                    indexes.extend(first..=last);
                } else {
                    indexes.push(self.parse_number(selector)?);
                }
            }
        }

        let res = indexes
            .iter()
            .map(|idx| return self.codeblocks[*idx].to_string())
            .collect::<Vec<String>>()
            .join("\n\n");

        return Ok(res);
    }
}
