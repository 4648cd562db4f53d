//! Interactive command parsing.
//!
//! # Responsibility
//! - Turn one input line into a typed `Command`.
//!
//! # Invariants
//! - Keywords match case-insensitively; reminder text and file names keep
//!   their original case.
//! - Unrecognized input maps to `Command::Ignored`.

use once_cell::sync::Lazy;
use regex::Regex;

static DISMISS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^dismiss\s+(\S+)$").expect("valid dismiss regex"));
static RENEW_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^renew\s+(\S+)\s+at\s+(.+)$").expect("valid renew regex"));
static REMIND_NOW_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^remind me now\s+(.*)$").expect("valid remind-now regex"));
static REMIND_AT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^remind at\s+'([^']*)'\s*(.*)$").expect("valid remind-at regex")
});
static DUMP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^dump to\s+(.+)$").expect("valid dump regex"));

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    ShowActive,
    ShowFuture,
    ShowPast,
    Dismiss(MenuIndex),
    Renew { index: MenuIndex, at: String },
    RemindNow { text: String },
    RemindAt { at: String, text: String },
    Dump { file: String },
    Ignored,
}

/// Menu number as typed; `Raw` keeps input that is not an integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuIndex {
    Number(i64),
    Raw(String),
}

impl MenuIndex {
    fn parse(value: &str) -> Self {
        value
            .parse::<i64>()
            .map(Self::Number)
            .unwrap_or_else(|_| Self::Raw(value.to_string()))
    }
}

/// Parses one line of user input.
pub fn parse_command(line: &str) -> Command {
    let input = line.trim();
    match input.to_ascii_lowercase().as_str() {
        "quit" => return Command::Quit,
        "active reminders" => return Command::ShowActive,
        "future reminders" => return Command::ShowFuture,
        "past reminders" => return Command::ShowPast,
        _ => {}
    }

    if let Some(caps) = DISMISS_RE.captures(input) {
        return Command::Dismiss(MenuIndex::parse(&caps[1]));
    }
    if let Some(caps) = RENEW_RE.captures(input) {
        return Command::Renew {
            index: MenuIndex::parse(&caps[1]),
            at: caps[2].trim().to_string(),
        };
    }
    if let Some(caps) = REMIND_NOW_RE.captures(input) {
        return Command::RemindNow {
            text: caps[1].trim().to_string(),
        };
    }
    if let Some(caps) = REMIND_AT_RE.captures(input) {
        return Command::RemindAt {
            at: caps[1].trim().to_string(),
            text: caps[2].trim().to_string(),
        };
    }
    if let Some(caps) = DUMP_RE.captures(input) {
        return Command::Dump {
            file: caps[1].trim().to_string(),
        };
    }

    Command::Ignored
}

#[cfg(test)]
mod tests {
    use super::{parse_command, Command, MenuIndex};

    #[test]
    fn list_commands_ignore_case_and_padding() {
        assert_eq!(parse_command("  Active Reminders "), Command::ShowActive);
        assert_eq!(parse_command("FUTURE reminders"), Command::ShowFuture);
        assert_eq!(parse_command("past reminders"), Command::ShowPast);
        assert_eq!(parse_command("Quit"), Command::Quit);
    }

    #[test]
    fn dismiss_and_renew_keep_signed_indexes() {
        assert_eq!(
            parse_command("dismiss 2"),
            Command::Dismiss(MenuIndex::Number(2))
        );
        assert_eq!(
            parse_command("Renew -1 at 2025-04-09 08:00:00"),
            Command::Renew {
                index: MenuIndex::Number(-1),
                at: "2025-04-09 08:00:00".to_string(),
            }
        );
        assert_eq!(
            parse_command("dismiss two"),
            Command::Dismiss(MenuIndex::Raw("two".to_string()))
        );
    }

    #[test]
    fn remind_commands_preserve_text_case() {
        assert_eq!(
            parse_command("Remind me now Call Alex"),
            Command::RemindNow {
                text: "Call Alex".to_string()
            }
        );
        assert_eq!(
            parse_command("remind at '2025-04-10 09:00:00' Book Flights"),
            Command::RemindAt {
                at: "2025-04-10 09:00:00".to_string(),
                text: "Book Flights".to_string(),
            }
        );
    }

    #[test]
    fn dump_keeps_file_name() {
        assert_eq!(
            parse_command("dump to Snapshot.csv"),
            Command::Dump {
                file: "Snapshot.csv".to_string()
            }
        );
    }

    #[test]
    fn unknown_input_is_ignored() {
        assert_eq!(parse_command(""), Command::Ignored);
        assert_eq!(parse_command("remind me later"), Command::Ignored);
        assert_eq!(parse_command("renew 1"), Command::Ignored);
    }
}
