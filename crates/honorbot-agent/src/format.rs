// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rendering of participants in legacy Telegram Markdown.

use honorbot_core::{Profile, UserRecord};

/// Backslash-escape the characters legacy Markdown treats as markup.
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn display_name(profile: &Profile, plain: bool) -> String {
    if plain && let Some(username) = profile.username.as_deref().filter(|u| !u.is_empty()) {
        return escape_markdown(username);
    }

    let name = [Some(profile.first_name.as_str()), profile.last_name.as_deref()]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .map(escape_markdown)
        .collect::<Vec<_>>()
        .join(" ");

    if plain { name.replace('@', "") } else { name }
}

/// Render a person either as plain text or as a mention that notifies them.
///
/// Plain rendering prefers the username and strips `@` so that nothing in
/// the text pings anyone.
pub fn format_user(profile: &Profile, plain: bool) -> String {
    let name = display_name(profile, plain);
    if plain {
        name
    } else {
        format!("[{name}](tg://user?id={})", profile.id)
    }
}

/// Render a stored participant; muted and blocked participants are never
/// mentioned.
pub fn format_record(user: &UserRecord) -> String {
    format_user(&user.profile, user.noping || user.blocked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use honorbot_core::{ChatId, UserId};

    fn profile(first: &str, last: Option<&str>, username: Option<&str>) -> Profile {
        Profile {
            id: UserId(42),
            is_bot: false,
            first_name: first.to_string(),
            last_name: last.map(str::to_string),
            username: username.map(str::to_string),
        }
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape_markdown("a_b*c`d[e]"), "a\\_b\\*c\\`d\\[e]");
        assert_eq!(escape_markdown("plain"), "plain");
    }

    #[test]
    fn mention_joins_first_and_last_name() {
        let p = profile("Ann", Some("Lee"), Some("ann"));
        assert_eq!(format_user(&p, false), "[Ann Lee](tg://user?id=42)");
    }

    #[test]
    fn mention_keeps_at_signs() {
        let p = profile("@nn", None, None);
        assert_eq!(format_user(&p, false), "[@nn](tg://user?id=42)");
    }

    #[test]
    fn plain_prefers_username() {
        let p = profile("Ann", Some("Lee"), Some("ann_lee"));
        assert_eq!(format_user(&p, true), "ann\\_lee");
    }

    #[test]
    fn plain_without_username_strips_at_signs() {
        let p = profile("@Ann", Some("L@e"), None);
        assert_eq!(format_user(&p, true), "Ann Le");
    }

    #[test]
    fn records_render_by_their_flags() {
        let mut user = UserRecord::new(ChatId(-1), profile("Ann", None, Some("ann")), false);
        assert_eq!(format_record(&user), "[Ann](tg://user?id=42)");
        user.noping = true;
        assert_eq!(format_record(&user), "ann");
        user.noping = false;
        user.blocked = true;
        assert_eq!(format_record(&user), "ann");
    }
}
