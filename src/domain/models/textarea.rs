use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Widget;
use tui_textarea::Input;
use tui_textarea::Key;
use tui_textarea::TextArea;

/// Single line input box the user types messages into.
pub struct InputField {
    textarea: TextArea<'static>,
    title: String,
}

fn with_block(mut textarea: TextArea<'static>, title: &str) -> TextArea<'static> {
    textarea.set_block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .title(title.to_string())
            .padding(Padding::new(1, 1, 0, 0)),
    );

    return textarea;
}

impl Default for InputField {
    fn default() -> InputField {
        let title = "Enter message".to_string();
        return InputField {
            textarea: with_block(TextArea::default(), &title),
            title,
        };
    }
}

impl InputField {
    pub fn value(&self) -> String {
        return self.textarea.lines().join("\n");
    }

    pub fn set_value(&mut self, text: &str) {
        let line = text.replace('\n', " ");
        self.textarea = with_block(TextArea::new(vec![line]), &self.title);
        self.textarea.move_cursor(tui_textarea::CursorMove::End);
    }

    pub fn clear(&mut self) {
        self.textarea = with_block(TextArea::default(), &self.title);
    }

    pub fn input(&mut self, input: Input) {
        self.textarea.input(input);
    }

    /// Pasted text is flattened onto the single input line.
    pub fn paste(&mut self, text: &str) {
        for char in text.chars() {
            let key = match char {
                '\n' | '\r' | '\t' => Key::Char(' '),
                _ => Key::Char(char),
            };
            self.textarea.input(Input {
                key,
                ctrl: false,
                alt: false,
            });
        }
    }

    pub fn set_title(&mut self, title: &str) {
        if self.title == title {
            return;
        }

        self.title = title.to_string();
        let lines = self.textarea.lines().to_vec();
        let cursor = self.textarea.cursor();
        self.textarea = with_block(TextArea::new(lines), &self.title);
        self.textarea.move_cursor(tui_textarea::CursorMove::Jump(
            cursor.0 as u16,
            cursor.1 as u16,
        ));
    }

    pub fn widget(&self) -> impl Widget + '_ {
        return self.textarea.widget();
    }
}
