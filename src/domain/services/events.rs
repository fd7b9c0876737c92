#[cfg(test)]
#[path = "events_test.rs"]
mod tests;

use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use crossterm::event::EventStream;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::domain::models::Event;

const TICK: time::Duration = time::Duration::from_millis(500);

fn from_mouse(mouse: MouseEvent) -> Option<Event> {
    return match mouse.kind {
        MouseEventKind::ScrollUp => Some(Event::UIScrollUp()),
        MouseEventKind::ScrollDown => Some(Event::UIScrollDown()),
        MouseEventKind::Down(MouseButton::Left) => {
            Some(Event::MouseClick(mouse.column, mouse.row))
        }
        _ => None,
    };
}

fn from_key(input: Input) -> Event {
    return match input {
        Input { key: Key::Enter, .. } => Event::KeyboardEnter(),
        Input { key: Key::Up, .. } => Event::UIScrollUp(),
        Input { key: Key::Down, .. } => Event::UIScrollDown(),
        Input {
            key: Key::PageUp, ..
        }
        | Input {
            key: Key::Char('u'),
            ctrl: true,
            ..
        } => Event::UIScrollPageUp(),
        Input {
            key: Key::PageDown,
            ..
        }
        | Input {
            key: Key::Char('d'),
            ctrl: true,
            ..
        } => Event::UIScrollPageDown(),
        Input {
            key: Key::Char('c'),
            ctrl: true,
            ..
        } => Event::KeyboardCTRLC(),
        input => Event::KeyboardCharInput(input),
    };
}

/// Maps one terminal event onto the panel's events. Anything the panel has no
/// use for maps to `None`.
pub fn to_event(event: CrosstermEvent) -> Option<Event> {
    return match event {
        CrosstermEvent::Key(key) => Some(from_key(key.into())),
        CrosstermEvent::Mouse(mouse) => from_mouse(mouse),
        CrosstermEvent::Paste(text) => Some(Event::KeyboardPaste(text)),
        CrosstermEvent::Resize(_, _) => Some(Event::UIResize()),
        _ => None,
    };
}

/// Merges terminal input with outcomes coming back from the actions service.
pub struct EventsService {
    terminal: EventStream,
    outcomes: mpsc::UnboundedReceiver<Event>,
}

impl EventsService {
    pub fn new(outcomes: mpsc::UnboundedReceiver<Event>) -> EventsService {
        return EventsService {
            terminal: EventStream::new(),
            outcomes,
        };
    }

    pub async fn next(&mut self) -> Result<Event> {
        loop {
            let next = tokio::select! {
                outcome = self.outcomes.recv() => outcome,
                input = self.terminal.next() => match input {
                    Some(Ok(input)) => to_event(input),
                    Some(Err(err)) => {
                        tracing::warn!(error = ?err, "Failed to read terminal event");
                        None
                    },
                    None => None
                },
                _ = time::sleep(TICK) => Some(Event::UITick())
            };

            if let Some(event) = next {
                return Ok(event);
            }
        }
    }
}
