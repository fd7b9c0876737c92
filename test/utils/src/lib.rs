pub fn codeblock_fixture() -> &'static str {
    return r#"
Here's how to print in Rust.

```rust
fn print_numbers() {
    for i in 0..=0 {
        println!("{i}");
    }
}
```

And in Javascript.

```javascript
// Hello World.
function printNumbers() {
    let numbers = [];
    for (let i = 0; i <= 10; i++) {
        numbers.push(i);
    }
    return numbers.join('\n');
}
```

Some servers forget the language, that block still counts.

```
abc123
```

Let's do Python as well!

```python
for i in range(11):
    print(i)
```

That's it!
"#
    .trim();
}

/// JSON body the chat server returns for a successful reply.
pub fn reply_body(reply: &str) -> String {
    return format!(r#"{{"reply":"{reply}"}}"#);
}
