#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

use crate::domain::models::Message;
use crate::domain::models::Role;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Right,
}

impl BubbleAlignment {
    pub fn for_role(role: Role) -> BubbleAlignment {
        if role == Role::User {
            return BubbleAlignment::Right;
        }

        return BubbleAlignment::Left;
    }
}

pub struct Bubble<'a> {
    alignment: BubbleAlignment,
    message: &'a Message,
    window_max_width: usize,
    codeblock_counter: usize,
}

pub struct BubbleConfig {
    pub bubble_padding: usize,
    pub border_elements_length: usize,
    pub outer_padding_percentage: f32,
}

fn width(text: &str) -> usize {
    return text.chars().count();
}

fn fill(text: &str, count: usize) -> String {
    return [text].repeat(count).join("");
}

impl<'a> Bubble<'a> {
    pub fn new(
        message: &'a Message,
        alignment: BubbleAlignment,
        window_max_width: usize,
        codeblock_counter: usize,
    ) -> Bubble<'a> {
        return Bubble {
            alignment,
            message,
            window_max_width,
            codeblock_counter,
        };
    }

    pub fn style_config() -> BubbleConfig {
        return BubbleConfig {
            // Unicode character border + padding.
            bubble_padding: 8,
            // left border + left padding + (text, not counted) + right padding + right border +
            // scrollbar.
            border_elements_length: 5,
            outer_padding_percentage: 0.04,
        };
    }

    /// Number of fenced blocks opened while rendering, added to the counter
    /// the bubble started with.
    pub fn codeblock_counter(&self) -> usize {
        return self.codeblock_counter;
    }

    fn text_lines(&self) -> Vec<&'a str> {
        let lines: Vec<&'a str> = self.message.text.lines().collect();
        if lines.is_empty() {
            return vec![""];
        }

        return lines;
    }

    pub fn as_lines(&mut self) -> Vec<Line<'static>> {
        let mut in_codeblock = false;
        let mut lines: Vec<Line<'static>> = vec![];

        let max_line_length = self.get_max_line_length();
        let numbered = self.message.numbers_codeblocks();

        for line in self.text_lines() {
            let trimmed = line.trim();
            let spans = if !numbered {
                vec![Span::styled(line.to_string(), self.text_style())]
            } else if in_codeblock && trimmed == "```" {
                in_codeblock = false;
                vec![Span::styled(line.to_string(), self.text_style())]
            } else if !in_codeblock && trimmed.starts_with("```") {
                in_codeblock = true;
                self.codeblock_counter += 1;
                vec![
                    Span::styled(line.to_string(), self.text_style()),
                    Span::styled(
                        format!(" ({})", self.codeblock_counter),
                        Style {
                            fg: Some(Color::White),
                            ..Style::default()
                        },
                    ),
                ]
            } else if in_codeblock {
                vec![Span::styled(line.to_string(), self.code_style())]
            } else {
                vec![Span::styled(line.to_string(), self.text_style())]
            };

            let mut split_spans = vec![];
            let mut line_char_count = 0;

            for span in spans {
                let span_width = width(&span.content);
                if span_width + line_char_count <= max_line_length {
                    line_char_count += span_width;
                    split_spans.push(span);
                    continue;
                }

                let mut word_set: Vec<&str> = vec![];
                for word in span.content.split(' ') {
                    if line_char_count > 0 && width(word) + line_char_count > max_line_length {
                        split_spans.push(Span::styled(word_set.join(" "), span.style));
                        lines.push(self.spans_to_line(split_spans, max_line_length));

                        split_spans = vec![];
                        word_set = vec![];
                        line_char_count = 0;
                    }

                    word_set.push(word);
                    line_char_count += width(word) + 1;
                }

                split_spans.push(Span::styled(word_set.join(" "), span.style));
                // Drop the separator counted after the last word.
                line_char_count = line_char_count.saturating_sub(1);
            }

            lines.push(self.spans_to_line(split_spans, max_line_length));
        }

        return self.wrap_lines_in_bubble(lines, max_line_length);
    }

    fn spans_to_line(&self, mut spans: Vec<Span<'static>>, max_line_length: usize) -> Line<'static> {
        let line_str_len: usize = spans.iter().map(|e| return width(&e.content)).sum();
        let fill_len = max_line_length.saturating_sub(line_str_len);
        let formatted_line_length = line_str_len + fill_len + Bubble::style_config().bubble_padding;

        let mut wrapped_spans = vec![self.highlight_span("│ ".to_string())];
        wrapped_spans.append(&mut spans);
        wrapped_spans.push(self.highlight_span(format!("{} │", fill(" ", fill_len))));

        let outer_bubble_padding = fill(
            " ",
            self.window_max_width.saturating_sub(formatted_line_length),
        );

        if self.alignment == BubbleAlignment::Left {
            wrapped_spans.push(Span::from(outer_bubble_padding));
            return Line::from(wrapped_spans);
        }

        let mut line_spans = vec![Span::from(outer_bubble_padding)];
        line_spans.extend(wrapped_spans);

        return Line::from(line_spans);
    }

    fn get_max_line_length(&self) -> usize {
        let style_config = Bubble::style_config();
        // Add a minimum 4% of padding on the side.
        let min_bubble_padding_length = ((self.window_max_width as f32
            * style_config.outer_padding_percentage)
            .ceil()) as usize;

        // Border elements + minimum bubble padding.
        let line_border_width = style_config.border_elements_length + min_bubble_padding_length;
        let available_width = self.window_max_width.saturating_sub(line_border_width);

        let mut max_line_length = self
            .text_lines()
            .iter()
            .map(|line| {
                return width(line);
            })
            .max()
            .unwrap_or(0);

        if max_line_length > available_width {
            max_line_length = available_width;
        }

        let name_len = width(&self.message.role.to_string());
        if max_line_length < name_len {
            max_line_length = name_len;
        }

        return max_line_length;
    }

    fn wrap_lines_in_bubble(
        &self,
        lines: Vec<Line<'static>>,
        max_line_length: usize,
    ) -> Vec<Line<'static>> {
        let name = self.message.role.to_string();
        // Add 2 for the padding either side of the text.
        let inner_bar = fill("─", (max_line_length + 2).saturating_sub(width(&name)));
        let top_bar = format!("╭{name}{inner_bar}╮");
        let bottom_bar = format!("╰{}╯", fill("─", max_line_length + 2));
        let bar_bubble_padding = fill(
            " ",
            self.window_max_width
                .saturating_sub(max_line_length + Bubble::style_config().bubble_padding),
        );

        let (top, bottom) = if self.alignment == BubbleAlignment::Left {
            (
                format!("{top_bar}{bar_bubble_padding}"),
                format!("{bottom_bar}{bar_bubble_padding}"),
            )
        } else {
            (
                format!("{bar_bubble_padding}{top_bar}"),
                format!("{bar_bubble_padding}{bottom_bar}"),
            )
        };

        let mut res = vec![self.highlight_line(top)];
        res.extend(lines);
        res.push(self.highlight_line(bottom));
        return res;
    }

    fn border_color(&self) -> Option<Color> {
        if self.message.is_error() {
            return Some(Color::Red);
        }

        if self.message.role == Role::System {
            return Some(Color::Rgb(138, 85, 63)); // Brown
        }

        return None;
    }

    fn text_style(&self) -> Style {
        if self.message.is_error() {
            return Style {
                fg: Some(Color::LightRed),
                ..Style::default()
            };
        }

        return Style::default();
    }

    fn code_style(&self) -> Style {
        return Style {
            fg: Some(Color::Green),
            ..Style::default()
        };
    }

    fn highlight_span(&self, text: String) -> Span<'static> {
        if let Some(fg) = self.border_color() {
            return Span::styled(
                text,
                Style {
                    fg: Some(fg),
                    ..Style::default()
                },
            );
        }

        return Span::from(text);
    }

    fn highlight_line(&self, text: String) -> Line<'static> {
        return Line::from(self.highlight_span(text));
    }
}
