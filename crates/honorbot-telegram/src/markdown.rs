// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Legacy Telegram Markdown helpers.
//!
//! Outbound text is written in the legacy `Markdown` parse mode: `*bold*`,
//! `_italic_`, `` `code` ``, `[text](url)` and backslash escapes of
//! `_ * ` [`. When Telegram rejects the entities, the message is resent as
//! plain text produced by [`to_plain_text`].

/// Strip legacy Markdown markup, keeping the visible text.
///
/// Links keep their label, escape backslashes are removed and the escaped
/// character is kept, unescaped emphasis and code markers are dropped.
pub fn to_plain_text(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len());
    let mut chars = markdown.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.peek() {
                Some(next @ ('_' | '*' | '`' | '[')) => {
                    out.push(*next);
                    chars.next();
                }
                _ => out.push('\\'),
            },
            '*' | '_' | '`' => {}
            '[' => {
                let mut label = String::new();
                let mut closed = false;
                for l in chars.by_ref() {
                    if l == ']' {
                        closed = true;
                        break;
                    }
                    label.push(l);
                }
                out.push_str(&to_plain_text(&label));
                if !closed {
                    continue;
                }
                if chars.peek() == Some(&'(') {
                    for u in chars.by_ref() {
                        if u == ')' {
                            break;
                        }
                    }
                }
            }
            other => out.push(other),
        }
    }

    out
}
