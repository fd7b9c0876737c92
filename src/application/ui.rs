#[cfg(test)]
#[path = "ui_test.rs"]
mod tests;

use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::ChatClientRef;
use crate::domain::models::Event;
use crate::domain::models::InputField;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::Role;
use crate::domain::models::Submission;
use crate::domain::models::Trigger;
use crate::domain::services::events::EventsService;
use crate::domain::services::ChatPanel;

pub const GREETING: &str = "Online. Ask me anything.";

/// True when the cell at `column`/`row` falls inside `rect`.
fn is_inside(rect: Rect, column: u16, row: u16) -> bool {
    return column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height);
}

/// A click only sends when it lands on the Send button.
fn trigger_for_click(send_rect: Rect, column: u16, row: u16) -> Option<Trigger> {
    if is_inside(send_rect, column, row) {
        return Some(Trigger::SendControl);
    }

    return None;
}

fn input_title(panel: &ChatPanel) -> String {
    if panel.is_waiting() {
        return format!(
            "Enter message ({} waiting, CTRL+C to abort)",
            panel.pending_count()
        );
    }

    return "Enter message".to_string();
}

fn send_button(waiting: bool) -> Paragraph<'static> {
    let mut style = Style::default().add_modifier(Modifier::BOLD);
    if waiting {
        style = style.fg(Color::Yellow);
    }

    return Paragraph::new(Span::styled("Send", style))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double),
        );
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    panel: &mut ChatPanel,
    events: &mut EventsService,
) -> Result<()> {
    let mut send_rect = Rect::default();

    loop {
        panel.input.set_title(&input_title(panel));

        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![Constraint::Min(1), Constraint::Length(3)])
                .split(frame.size());

            let input_layout = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Min(1), Constraint::Length(10)])
                .split(layout[1]);

            if layout[0].width != panel.last_known_width
                || layout[0].height != panel.last_known_height
            {
                panel.set_rect(layout[0]);
            }

            panel
                .bubble_list
                .render(frame, layout[0], panel.scroll.position);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                layout[0].inner(&Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut panel.scroll.scrollbar_state,
            );

            frame.render_widget(panel.input.widget(), input_layout[0]);
            frame.render_widget(send_button(panel.is_waiting()), input_layout[1]);
            send_rect = input_layout[1];
        })?;

        let submission = match events.next().await? {
            Event::ExchangeResolved(handle, outcome) => {
                panel.resolve(handle, outcome);
                continue;
            }
            Event::Notice(message) => {
                panel.add_message(message);
                continue;
            }
            Event::KeyboardCharInput(input) => {
                panel.input.input(input);
                continue;
            }
            Event::KeyboardPaste(text) => {
                panel.input.paste(&text);
                continue;
            }
            Event::KeyboardCTRLC() => {
                if panel.abort_pending()? {
                    continue;
                }
                break;
            }
            Event::KeyboardEnter() => panel.activate(Trigger::EnterKey)?,
            Event::MouseClick(column, row) => match trigger_for_click(send_rect, column, row) {
                Some(trigger) => panel.activate(trigger)?,
                None => continue,
            },
            Event::UIScrollDown() => {
                panel.scroll.down();
                continue;
            }
            Event::UIScrollUp() => {
                panel.scroll.up();
                continue;
            }
            Event::UIScrollPageDown() => {
                panel.scroll.down_page();
                continue;
            }
            Event::UIScrollPageUp() => {
                panel.scroll.up_page();
                continue;
            }
            Event::UIResize() | Event::UITick() => {
                continue;
            }
        };

        if submission == Submission::Quit {
            break;
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    // Nothing left to report to if restoring the terminal fails here.
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start(
    client: ChatClientRef,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut panel = ChatPanel::new(
        vec![Message::new(Role::System, GREETING)],
        InputField::default(),
        tx,
    );

    if let Err(err) = client.health_check().await {
        tracing::warn!(error = ?err, "Starting without a reachable chat server");
        panel.add_message(Message::new_with_type(
            Role::System,
            MessageType::Error,
            &format!("{err}. Messages will fail until it is back."),
        ));
    }

    let mut events = EventsService::new(rx);

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    start_loop(&mut terminal, &mut panel, &mut events).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
