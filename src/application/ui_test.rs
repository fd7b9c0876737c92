use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use super::input_title;
use super::is_inside;
use super::trigger_for_click;
use crate::domain::models::Action;
use crate::domain::models::InputField;
use crate::domain::models::Trigger;
use crate::domain::services::ChatPanel;

#[test]
fn it_hits_the_send_button() {
    let rect = Rect::new(70, 20, 10, 3);

    assert!(is_inside(rect, 70, 20));
    assert!(is_inside(rect, 79, 22));
    assert!(is_inside(rect, 75, 21));
}

#[test]
fn it_misses_outside_the_send_button() {
    let rect = Rect::new(70, 20, 10, 3);

    assert!(!is_inside(rect, 69, 21));
    assert!(!is_inside(rect, 80, 21));
    assert!(!is_inside(rect, 75, 19));
    assert!(!is_inside(rect, 75, 23));
    assert!(!is_inside(Rect::default(), 0, 0));
}

#[test]
fn it_shows_waiting_count_in_title() -> Result<()> {
    let (tx, _rx) = mpsc::unbounded_channel::<Action>();
    let mut panel = ChatPanel::new(vec![], InputField::default(), tx);
    assert_eq!(input_title(&panel), "Enter message");

    panel.submit("one")?;
    panel.submit("two")?;
    assert_eq!(
        input_title(&panel),
        "Enter message (2 waiting, CTRL+C to abort)"
    );

    return Ok(());
}

#[test]
fn it_sends_on_a_click_inside_the_button() {
    let send_rect = Rect::new(70, 20, 10, 3);
    assert_eq!(
        trigger_for_click(send_rect, 72, 21),
        Some(Trigger::SendControl)
    );
}

#[test]
fn it_ignores_clicks_outside_the_button() {
    let send_rect = Rect::new(70, 20, 10, 3);
    assert_eq!(trigger_for_click(send_rect, 10, 5), None);
    assert_eq!(trigger_for_click(send_rect, 80, 21), None);
    assert_eq!(trigger_for_click(Rect::default(), 0, 0), None);
}
