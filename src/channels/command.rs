//! Parsing of CLI input lines into conversation commands.

use std::str::FromStr;

use crate::conversation::CompareSlot;
use crate::error::ChannelError;

/// Help text listing every command.
pub const HELP: &str = "\
Commands:
  <text>           answer the current question
  /retry           retry loading recommendations
  /compare         compare recommended cards
  /first <name>    pick the first card to compare (no name clears it)
  /second <name>   pick the second card to compare (no name clears it)
  /back            leave the comparison
  /restart         start over
  /help            show this help
  /quit            exit";

/// One parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text: an answer for the chat.
    Say(String),
    Retry,
    Compare,
    Select(CompareSlot, Option<String>),
    Back,
    Restart,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = ChannelError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let Some(rest) = line.strip_prefix('/') else {
            return Ok(Self::Say(line.to_string()));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };
        let arg = (!arg.is_empty()).then(|| arg.to_string());

        match (name.to_ascii_lowercase().as_str(), arg) {
            ("retry", None) => Ok(Self::Retry),
            ("compare", None) => Ok(Self::Compare),
            ("back", None) => Ok(Self::Back),
            ("restart", None) => Ok(Self::Restart),
            ("help", None) => Ok(Self::Help),
            ("quit" | "exit", None) => Ok(Self::Quit),
            ("first", arg) => Ok(Self::Select(CompareSlot::First, arg)),
            ("second", arg) => Ok(Self::Select(CompareSlot::Second, arg)),
            _ => Err(ChannelError::InvalidCommand(line.to_string())),
        }
    }
}
