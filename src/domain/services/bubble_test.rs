use super::Bubble;
use super::BubbleAlignment;
use crate::domain::models::Message;
use crate::domain::models::Role;

fn lines_to_string(
    message: &Message,
    alignment: BubbleAlignment,
    codeblock_count: usize,
) -> Vec<String> {
    let lines = Bubble::new(message, alignment, 50, codeblock_count).as_lines();
    return lines
        .iter()
        .map(|line| {
            return line
                .spans
                .iter()
                .map(|span| {
                    return span.content.to_string();
                })
                .collect::<Vec<String>>()
                .join("");
        })
        .collect();
}

fn pad(count: usize) -> String {
    return " ".repeat(count);
}

#[test]
fn it_creates_assistant_text() {
    let message = Message::new(Role::Assistant, "Hi there!");
    let lines = lines_to_string(&message, BubbleAlignment::Left, 0);

    assert_eq!(
        lines,
        vec![
            format!("╭Assistant──╮{}", pad(33)),
            format!("│ Hi there! │{}", pad(33)),
            format!("╰───────────╯{}", pad(33)),
        ]
    );
}

#[test]
fn it_counts_characters_not_bytes() {
    let message = Message::placeholder();
    let lines = lines_to_string(&message, BubbleAlignment::Left, 0);

    assert_eq!(lines[1], format!("│ Thinking… │{}", pad(33)));
    assert_eq!(lines[0].chars().count(), lines[1].chars().count());
}

#[test]
fn it_wraps_long_text() {
    let message = Message::new(Role::Assistant, "Hi there! This is a really long line that pushes the boundaries of 50 characters across the screen, resulting in a bubble where the line is wrapped to the next line. Cool right?");
    let lines = lines_to_string(&message, BubbleAlignment::Left, 0);

    assert_eq!(
        lines,
        vec![
            "╭Assistant────────────────────────────────────╮".to_string(),
            "│ Hi there! This is a really long line that   │".to_string(),
            "│ pushes the boundaries of 50 characters      │".to_string(),
            "│ across the screen, resulting in a bubble    │".to_string(),
            "│ where the line is wrapped to the next line. │".to_string(),
            "│ Cool right?                                 │".to_string(),
            "╰─────────────────────────────────────────────╯".to_string(),
        ]
    );
}

#[test]
fn it_numbers_code_blocks() {
    let text = r#"
Here's how to print in Rust.

```rust
fn main() {}
```"#
        .trim();
    let message = Message::new(Role::Assistant, text);
    let mut bubble = Bubble::new(&message, BubbleAlignment::Left, 50, 2);
    let lines = bubble.as_lines();
    let rendered = lines
        .iter()
        .map(|line| {
            return line
                .spans
                .iter()
                .map(|span| return span.content.to_string())
                .collect::<String>();
        })
        .collect::<Vec<String>>();

    assert_eq!(bubble.codeblock_counter(), 3);
    assert_eq!(rendered[3], format!("│ ```rust (3)                  │{}", pad(14)));
    assert_eq!(rendered[4], format!("│ fn main() {{}}                 │{}", pad(14)));
}

#[test]
fn it_renders_error_text() {
    let mut message = Message::placeholder();
    message.replace("Error: timeout");
    message.mark_error();
    let lines = lines_to_string(&message, BubbleAlignment::Left, 0);

    assert_eq!(
        lines,
        vec![
            format!("╭Assistant───────╮{}", pad(28)),
            format!("│ Error: timeout │{}", pad(28)),
            format!("╰────────────────╯{}", pad(28)),
        ]
    );
}

#[test]
fn it_right_aligns_user_text() {
    let message = Message::new(Role::User, "Hi there!");
    let lines = lines_to_string(&message, BubbleAlignment::Right, 0);

    assert_eq!(lines.len(), 3);
    for line in lines.iter() {
        assert!(line.starts_with(' '));
        assert!(!line.ends_with(' '));
    }
    assert!(lines[1].trim_start().starts_with("│ Hi there! "));
}

#[test]
fn it_renders_empty_text() {
    let message = Message::new(Role::System, "");
    let lines = lines_to_string(&message, BubbleAlignment::Left, 0);

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], format!("│ {} │{}", pad(6), pad(36)));
}
