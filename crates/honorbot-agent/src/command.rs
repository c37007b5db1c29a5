// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command recognition.
//!
//! A command is the whole message: `/name`, optionally followed by a numeric
//! argument (`/remove123`) and an `@bot_username` suffix, which must then be
//! this bot's. Matching is case-insensitive. `/dev` is the exception: it
//! takes free text and no suffix.

use std::fmt;
use std::sync::LazyLock;

use honorbot_core::UserId;
use regex::Regex;

static COMMAND_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^/([a-z]+)(\d+)?(?:@([a-z0-9_]+))?$").expect("command pattern is valid")
});

static DEV_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)^/dev(?:\s+(.*)|$)").expect("dev pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Members,
    Remove(UserId),
    Recover(UserId),
    Choose,
    Top,
    NoPing,
    PingOn,
    Help,
    /// Message for the developer; empty when none was given.
    Dev(String),
}

/// Command without its arguments; keys the handler table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Members,
    Remove,
    Recover,
    Choose,
    Top,
    NoPing,
    PingOn,
    Help,
    Dev,
}

impl CommandKind {
    /// Served in a one-to-one dialogue with the bot.
    pub fn allowed_in_private(self) -> bool {
        matches!(self, CommandKind::Help | CommandKind::Dev)
    }

    /// Served in a group.
    pub fn allowed_in_group(self) -> bool {
        self != CommandKind::Dev
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandKind::Members => "members",
            CommandKind::Remove => "remove",
            CommandKind::Recover => "recover",
            CommandKind::Choose => "choose",
            CommandKind::Top => "top",
            CommandKind::NoPing => "noping",
            CommandKind::PingOn => "pingon",
            CommandKind::Help => "help",
            CommandKind::Dev => "dev",
        };
        f.write_str(name)
    }
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Members => CommandKind::Members,
            Command::Remove(_) => CommandKind::Remove,
            Command::Recover(_) => CommandKind::Recover,
            Command::Choose => CommandKind::Choose,
            Command::Top => CommandKind::Top,
            Command::NoPing => CommandKind::NoPing,
            Command::PingOn => CommandKind::PingOn,
            Command::Help => CommandKind::Help,
            Command::Dev(_) => CommandKind::Dev,
        }
    }

    /// The user a moderation command acts on.
    pub fn target(&self) -> Option<UserId> {
        match self {
            Command::Remove(id) | Command::Recover(id) => Some(*id),
            _ => None,
        }
    }

    /// Free-text argument of `/dev`.
    pub fn text(&self) -> Option<&str> {
        match self {
            Command::Dev(text) => Some(text),
            _ => None,
        }
    }
}

/// Recognizes commands addressed to one bot.
#[derive(Debug, Clone)]
pub struct CommandParser {
    bot_username: String,
}

impl CommandParser {
    pub fn new(bot_username: impl Into<String>) -> Self {
        Self {
            bot_username: bot_username.into(),
        }
    }

    /// Parse a message; anything that is not exactly a known command is `None`.
    pub fn parse(&self, text: &str) -> Option<Command> {
        if let Some(caps) = DEV_PATTERN.captures(text) {
            let message = caps.get(1).map_or("", |m| m.as_str());
            return Some(Command::Dev(message.to_string()));
        }

        let caps = COMMAND_PATTERN.captures(text)?;
        if let Some(suffix) = caps.get(3)
            && !suffix.as_str().eq_ignore_ascii_case(&self.bot_username)
        {
            return None;
        }

        let name = caps.get(1)?.as_str().to_ascii_lowercase();
        let id = match caps.get(2) {
            Some(digits) => Some(UserId(digits.as_str().parse().ok()?)),
            None => None,
        };

        match (name.as_str(), id) {
            ("members", None) => Some(Command::Members),
            ("remove", Some(id)) => Some(Command::Remove(id)),
            ("recover", Some(id)) => Some(Command::Recover(id)),
            ("choose", None) => Some(Command::Choose),
            ("top", None) => Some(Command::Top),
            ("noping", None) => Some(Command::NoPing),
            ("pingon", None) => Some(Command::PingOn),
            ("help", None) => Some(Command::Help),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> CommandParser {
        CommandParser::new("honor_bot")
    }

    #[test]
    fn plain_commands() {
        let p = parser();
        assert_eq!(p.parse("/members"), Some(Command::Members));
        assert_eq!(p.parse("/choose"), Some(Command::Choose));
        assert_eq!(p.parse("/top"), Some(Command::Top));
        assert_eq!(p.parse("/noping"), Some(Command::NoPing));
        assert_eq!(p.parse("/pingon"), Some(Command::PingOn));
        assert_eq!(p.parse("/help"), Some(Command::Help));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(parser().parse("/CHOOSE"), Some(Command::Choose));
        assert_eq!(parser().parse("/Top@Honor_Bot"), Some(Command::Top));
    }

    #[test]
    fn suffix_must_name_this_bot() {
        assert_eq!(parser().parse("/choose@honor_bot"), Some(Command::Choose));
        assert_eq!(parser().parse("/choose@other_bot"), None);
    }

    #[test]
    fn numeric_arguments() {
        assert_eq!(parser().parse("/remove123"), Some(Command::Remove(UserId(123))));
        assert_eq!(parser().parse("/recover7@honor_bot"), Some(Command::Recover(UserId(7))));
        assert_eq!(parser().parse("/remove"), None);
        assert_eq!(parser().parse("/top5"), None);
        assert_eq!(parser().parse("/remove99999999999999999999"), None);
    }

    #[test]
    fn whole_message_must_match() {
        assert_eq!(parser().parse("/choose now"), None);
        assert_eq!(parser().parse("please /choose"), None);
        assert_eq!(parser().parse("/unknown"), None);
        assert_eq!(parser().parse(""), None);
    }

    #[test]
    fn dev_takes_free_text() {
        assert_eq!(parser().parse("/dev"), Some(Command::Dev(String::new())));
        assert_eq!(parser().parse("/dev hello there"), Some(Command::Dev("hello there".into())));
        assert_eq!(
            parser().parse("/DEV line one\nline two"),
            Some(Command::Dev("line one\nline two".into()))
        );
        assert_eq!(parser().parse("/devs"), None);
        assert_eq!(parser().parse("/dev@honor_bot hi"), None);
    }

    #[test]
    fn command_accessors() {
        assert_eq!(Command::Remove(UserId(5)).target(), Some(UserId(5)));
        assert_eq!(Command::Top.target(), None);
        assert_eq!(Command::Dev("x".into()).text(), Some("x"));
        assert_eq!(Command::Recover(UserId(1)).kind(), CommandKind::Recover);
        assert_eq!(CommandKind::NoPing.to_string(), "noping");
    }

    #[test]
    fn private_and_group_availability() {
        assert!(CommandKind::Help.allowed_in_private());
        assert!(CommandKind::Dev.allowed_in_private());
        assert!(!CommandKind::Choose.allowed_in_private());
        assert!(!CommandKind::Dev.allowed_in_group());
        assert!(CommandKind::Help.allowed_in_group());
    }
}
