use test_utils::codeblock_fixture;

use super::BubbleList;
use crate::domain::models::Message;
use crate::domain::models::Role;
use crate::domain::services::CodeBlocks;

#[test]
fn it_has_no_cached_lines() {
    let bubble_list = BubbleList::new();

    assert_eq!(bubble_list.cache.len(), 0);
    assert!(bubble_list.is_empty());
}

#[test]
fn it_caches_lines() {
    let messages = vec![
        Message::new(Role::Assistant, "Hi there!"),
        Message::new(Role::Assistant, codeblock_fixture()),
    ];

    let mut bubble_list = BubbleList::new();
    bubble_list.set_messages(&messages, 50);

    assert_eq!(bubble_list.cache.len(), 2);
    assert_eq!(bubble_list.cache[1].codeblocks_after, 4);
}

#[test]
fn it_returns_correct_length() {
    let messages = vec![
        Message::new(Role::Assistant, "Hi there!"),
        Message::new(Role::Assistant, "Two\nlines"),
    ];

    let mut bubble_list = BubbleList::new();
    bubble_list.set_messages(&messages, 50);

    assert_eq!(bubble_list.len(), 3 + 4);
}

#[test]
fn it_rerenders_a_resolved_placeholder_in_the_middle() {
    let mut messages = vec![
        Message::new(Role::User, "first"),
        Message::placeholder(),
        Message::new(Role::User, "second"),
        Message::placeholder(),
    ];

    let mut bubble_list = BubbleList::new();
    bubble_list.set_messages(&messages, 50);
    assert_eq!(bubble_list.len(), 12);

    messages[1].replace("line one\nline two");
    bubble_list.set_messages(&messages, 50);

    assert_eq!(bubble_list.cache.len(), 4);
    assert_eq!(bubble_list.cache[1].text, "line one\nline two");
    assert_eq!(bubble_list.len(), 13);
}

#[test]
fn it_rerenders_when_marked_as_error() {
    let mut messages = vec![Message::placeholder()];

    let mut bubble_list = BubbleList::new();
    bubble_list.set_messages(&messages, 50);

    messages[0].mark_error();
    bubble_list.set_messages(&messages, 50);

    assert_eq!(
        bubble_list.cache[0].mtype,
        crate::domain::models::MessageType::Error
    );
}

#[test]
fn it_renumbers_code_blocks_after_an_earlier_change() {
    let mut messages = vec![
        Message::placeholder(),
        Message::new(Role::Assistant, "```rust\nfn main() {}\n```"),
    ];

    let mut bubble_list = BubbleList::new();
    bubble_list.set_messages(&messages, 50);
    assert_eq!(bubble_list.cache[1].codeblocks_after, 1);

    messages[0].replace("```\nabc\n```");
    bubble_list.set_messages(&messages, 50);

    assert_eq!(bubble_list.cache[0].codeblocks_after, 1);
    assert_eq!(bubble_list.cache[1].codeblocks_after, 2);
}

fn labels(bubble_list: &BubbleList) -> Vec<String> {
    return bubble_list
        .cache
        .iter()
        .flat_map(|entry| return entry.lines.iter())
        .flat_map(|line| return line.spans.iter())
        .map(|span| return span.content.to_string())
        .filter(|content| {
            return content.starts_with(" (")
                && content.ends_with(')')
                && content[2..content.len() - 1].parse::<usize>().is_ok();
        })
        .collect();
}

fn labels_and_codeblocks(messages: &[Message]) -> (Vec<String>, usize) {
    let mut bubble_list = BubbleList::new();
    bubble_list.set_messages(messages, 80);

    let mut codeblocks = CodeBlocks::default();
    codeblocks.replace_from_messages(messages);

    return (labels(&bubble_list), codeblocks.len());
}

#[test]
fn it_skips_fences_typed_by_the_user() {
    let messages = vec![
        Message::new(Role::User, "```js how do I loop?"),
        Message::new(Role::Assistant, "Like this:\n```js\nfor(;;){}\n```"),
    ];

    let (labels, count) = labels_and_codeblocks(&messages);
    assert_eq!(labels, vec![" (1)"]);
    assert_eq!(count, 1);
}

#[test]
fn it_numbers_unclosed_fences_like_copy_does() {
    let messages = vec![
        Message::new(Role::Assistant, "```rust\nfn main() {"),
        Message::new(Role::Assistant, "```js\nfor(;;){}\n```"),
    ];

    let (labels, count) = labels_and_codeblocks(&messages);
    assert_eq!(labels, vec![" (1)", " (2)"]);
    assert_eq!(count, 2);
}

#[test]
fn it_leaves_system_fences_unnumbered() {
    let messages = vec![
        Message::new(Role::System, codeblock_fixture()),
        Message::new(Role::Assistant, codeblock_fixture()),
    ];

    let (labels, count) = labels_and_codeblocks(&messages);
    assert_eq!(labels, vec![" (1)", " (2)", " (3)", " (4)"]);
    assert_eq!(count, 4);
}
