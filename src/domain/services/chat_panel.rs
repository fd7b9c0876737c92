#[cfg(test)]
#[path = "chat_panel_test.rs"]
mod tests;

use std::collections::BTreeSet;

use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use super::BubbleList;
use super::CodeBlocks;
use super::Scroll;
use crate::domain::models::help_text;
use crate::domain::models::Action;
use crate::domain::models::BubbleHandle;
use crate::domain::models::ChatRequest;
use crate::domain::models::ExchangeOutcome;
use crate::domain::models::InputField;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::Role;
use crate::domain::models::SlashCommand;
use crate::domain::models::Submission;
use crate::domain::models::Trigger;

/// The chat panel controller. Owns the message list and the input field, and
/// hands outbound requests to the actions service through `tx`.
pub struct ChatPanel {
    pub bubble_list: BubbleList,
    pub codeblocks: CodeBlocks,
    pub input: InputField,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub messages: Vec<Message>,
    pub scroll: Scroll,
    pending: BTreeSet<BubbleHandle>,
    tx: mpsc::UnboundedSender<Action>,
}

impl ChatPanel {
    pub fn new(
        messages: Vec<Message>,
        input: InputField,
        tx: mpsc::UnboundedSender<Action>,
    ) -> ChatPanel {
        let mut panel = ChatPanel {
            bubble_list: BubbleList::new(),
            codeblocks: CodeBlocks::default(),
            input,
            last_known_height: 0,
            last_known_width: 0,
            messages,
            scroll: Scroll::default(),
            pending: BTreeSet::new(),
            tx,
        };
        panel.codeblocks.replace_from_messages(&panel.messages);

        return panel;
    }

    /// Reads the input field and sends it, the same way for every trigger.
    pub fn activate(&mut self, trigger: Trigger) -> Result<Submission> {
        let value = self.input.value();
        let text = value.trim();
        tracing::debug!(?trigger, len = text.len(), "Send activated");

        if let Some(command) = SlashCommand::parse(text) {
            self.add_message(Message::new(Role::User, text));
            self.input.clear();
            return self.handle_slash_command(command);
        }

        return match self.submit(text)? {
            Some(handle) => Ok(Submission::Sent(handle)),
            None => Ok(Submission::Ignored),
        };
    }

    /// Appends the user's message and a placeholder, then asks for a reply
    /// addressed to that placeholder. Blank text does nothing.
    pub fn submit(&mut self, text: &str) -> Result<Option<BubbleHandle>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        self.add_message(Message::new(Role::User, text));
        self.input.clear();
        let handle = self.add_message(Message::placeholder());
        self.pending.insert(handle);

        tracing::debug!(%handle, "Submitting chat request");
        self.tx
            .send(Action::ChatRequest(handle, ChatRequest::new(text)))?;

        return Ok(Some(handle));
    }

    /// Writes the outcome of an exchange into its own placeholder, whatever
    /// has been appended since.
    pub fn resolve(&mut self, handle: BubbleHandle, outcome: ExchangeOutcome) {
        if !self.pending.remove(&handle) {
            tracing::warn!(%handle, "Ignoring outcome for a bubble that is not waiting");
            return;
        }

        let message = match self.messages.get_mut(handle.index()) {
            Some(message) => message,
            None => {
                tracing::error!(%handle, "Pending bubble is missing from the panel");
                return;
            }
        };

        match outcome {
            Ok(reply) => {
                message.replace(&reply);
            }
            Err(failure) => {
                tracing::warn!(%handle, error = %failure, "Chat request failed");
                message.replace(&format!("Error: {failure}"));
                message.mark_error();
            }
        }

        let follow = self.scroll.is_at_bottom();
        self.codeblocks.replace_from_messages(&self.messages);
        self.sync_dependants();
        if follow {
            self.scroll.last();
        }
    }

    /// Asks for every unanswered exchange to be dropped. Returns false when
    /// nothing was waiting.
    pub fn abort_pending(&mut self) -> Result<bool> {
        if self.pending.is_empty() {
            return Ok(false);
        }

        let handles = self.pending.iter().copied().collect::<Vec<BubbleHandle>>();
        tracing::debug!(count = handles.len(), "Aborting pending exchanges");
        self.tx.send(Action::AbortExchanges(handles))?;

        return Ok(true);
    }

    pub fn is_waiting(&self) -> bool {
        return !self.pending.is_empty();
    }

    pub fn pending_count(&self) -> usize {
        return self.pending.len();
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    pub fn add_message(&mut self, message: Message) -> BubbleHandle {
        self.messages.push(message);
        self.codeblocks.replace_from_messages(&self.messages);
        self.sync_dependants();
        self.scroll.last();

        return BubbleHandle::new(self.messages.len() - 1);
    }

    fn add_notice(&mut self, mtype: MessageType, text: &str) {
        self.add_message(Message::new_with_type(Role::System, mtype, text));
    }

    fn handle_slash_command(&mut self, command: SlashCommand) -> Result<Submission> {
        if command.is_quit() {
            return Ok(Submission::Quit);
        }

        if command.is_help() {
            self.add_notice(MessageType::Normal, &help_text());
        } else if command.is_abort() {
            if !self.abort_pending()? {
                self.add_notice(MessageType::Normal, "Nothing is waiting on a reply.");
            }
        } else if command.is_copy_chat() {
            let formatted = self
                .messages
                .iter()
                .filter(|message| return message.role != Role::System)
                .map(|message| {
                    return format!("{}: {}", message.role, message.text);
                })
                .collect::<Vec<String>>()
                .join("\n\n");
            self.tx.send(Action::CopyToClipboard(formatted))?;
        } else if command.is_copy_code_block() {
            match self.codeblocks.blocks_from_slash_commands(&command) {
                Ok(codeblock) => {
                    self.tx.send(Action::CopyToClipboard(codeblock))?;
                }
                Err(err) => {
                    self.add_notice(
                        MessageType::Error,
                        &format!("There was an error trying to parse your command:\n\n{err}"),
                    );
                }
            }
        }

        return Ok(Submission::Command);
    }

    fn sync_dependants(&mut self) {
        self.bubble_list
            .set_messages(&self.messages, self.last_known_width.into());

        self.scroll.set_state(
            u16::try_from(self.bubble_list.len()).unwrap_or(u16::MAX),
            self.last_known_height,
        );
    }
}
