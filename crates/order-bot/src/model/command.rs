use crate::model::Actor;
use serde::{Deserialize, Serialize};

/// One inbound message handed over by the chat transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundEvent {
    /// Missing when the transport could not attribute the message to a user.
    #[serde(default)]
    pub user: Option<Actor>,
    pub text: String,
}

/// A recognized bot command with its (trimmed) argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    /// `/food <text>`; `None` when no argument was given.
    Food(Option<String>),
    Reset,
    /// `/summary [YYYY-MM-DD]`.
    Summary(Option<String>),
}

impl Command {
    /// Parses `/verb[@botname] [argument]`.
    ///
    /// Returns `None` for plain text and unknown verbs.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim_start();
        let rest = text.strip_prefix('/')?;
        let (word, argument) = match rest.split_once(char::is_whitespace) {
            Some((word, argument)) => (word, argument.trim()),
            None => (rest, ""),
        };
        let verb = word.split('@').next().unwrap_or_default().to_lowercase();
        let argument = (!argument.is_empty()).then(|| argument.to_string());

        match verb.as_str() {
            "start" => Some(Self::Start),
            "help" => Some(Self::Help),
            "food" => Some(Self::Food(argument)),
            "reset" => Some(Self::Reset),
            "summary" => Some(Self::Summary(argument)),
            _ => None,
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Help => "help",
            Self::Food(_) => "food",
            Self::Reset => "reset",
            Self::Summary(_) => "summary",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_food_with_multiword_argument() {
        assert_eq!(
            Command::parse("/food Pizza Margherita"),
            Some(Command::Food(Some("Pizza Margherita".into())))
        );
    }

    #[test]
    fn food_without_argument_has_none() {
        assert_eq!(Command::parse("/food"), Some(Command::Food(None)));
        assert_eq!(Command::parse("/food    "), Some(Command::Food(None)));
    }

    #[test]
    fn strips_bot_mention_and_ignores_case() {
        assert_eq!(Command::parse("/Reset@LunchBot"), Some(Command::Reset));
        assert_eq!(
            Command::parse("/summary@LunchBot 2026-10-15"),
            Some(Command::Summary(Some("2026-10-15".into())))
        );
    }

    #[test]
    fn argument_keeps_inner_whitespace() {
        assert_eq!(
            Command::parse("/food  pad  thai \n"),
            Some(Command::Food(Some("pad  thai".into())))
        );
    }

    #[test]
    fn plain_text_and_unknown_verbs_are_ignored() {
        assert_eq!(Command::parse("hello there"), None);
        assert_eq!(Command::parse("/backup"), None);
        assert_eq!(Command::parse("/"), None);
    }
}
