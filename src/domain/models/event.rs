use tui_textarea::Input;

use super::BubbleHandle;
use super::ExchangeOutcome;
use super::Message;

#[derive(Debug)]
pub enum Event {
    ExchangeResolved(BubbleHandle, ExchangeOutcome),
    Notice(Message),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardEnter(),
    KeyboardPaste(String),
    MouseClick(u16, u16),
    UIResize(),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}
