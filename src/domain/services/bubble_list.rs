use ratatui::prelude::Rect;
use ratatui::text::Line;
use ratatui::widgets::Block;
use ratatui::widgets::Paragraph;
use ratatui::prelude::Backend;
use ratatui::Frame;

use super::Bubble;
use super::BubbleAlignment;
use crate::domain::models::Message;
use crate::domain::models::MessageType;

#[cfg(test)]
#[path = "bubble_list_test.rs"]
mod tests;

struct BubbleCacheEntry {
    codeblocks_after: usize,
    mtype: MessageType,
    text: String,
    lines: Vec<Line<'static>>,
}

/// Rendered lines for every message, rebuilt from the first message that
/// changed since the last call.
pub struct BubbleList {
    cache: Vec<BubbleCacheEntry>,
    line_width: usize,
    lines_len: usize,
}

impl Default for BubbleList {
    fn default() -> BubbleList {
        return BubbleList::new();
    }
}

impl BubbleList {
    pub fn new() -> BubbleList {
        return BubbleList {
            cache: vec![],
            line_width: 0,
            lines_len: 0,
        };
    }

    pub fn set_messages(&mut self, messages: &[Message], line_width: usize) {
        if self.line_width != line_width {
            self.cache.clear();
            self.line_width = line_width;
        }

        let first_stale = messages
            .iter()
            .zip(self.cache.iter())
            .position(|(message, entry)| {
                return message.text != entry.text || message.message_type() != entry.mtype;
            })
            .unwrap_or_else(|| return self.cache.len().min(messages.len()));
        self.cache.truncate(first_stale);

        // Code block numbers run across the whole chat, so everything after a
        // changed message is rendered again.
        let mut codeblock_counter = self
            .cache
            .last()
            .map(|entry| return entry.codeblocks_after)
            .unwrap_or(0);

        for message in messages.iter().skip(first_stale) {
            let mut bubble = Bubble::new(
                message,
                BubbleAlignment::for_role(message.role),
                line_width,
                codeblock_counter,
            );
            let lines = bubble.as_lines();
            codeblock_counter = bubble.codeblock_counter();

            self.cache.push(BubbleCacheEntry {
                codeblocks_after: codeblock_counter,
                mtype: message.message_type(),
                text: message.text.to_string(),
                lines,
            });
        }

        self.lines_len = self.cache.iter().map(|entry| return entry.lines.len()).sum();
    }

    pub fn len(&self) -> usize {
        return self.lines_len;
    }

    pub fn is_empty(&self) -> bool {
        return self.lines_len == 0;
    }

    pub fn render<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect, scroll: u16) {
        let lines: Vec<Line> = self
            .cache
            .iter()
            .flat_map(|entry| {
                return entry.lines.to_owned();
            })
            .collect();

        frame.render_widget(
            Paragraph::new(lines)
                .block(Block::default())
                .scroll((scroll, 0)),
            rect,
        );
    }
}
