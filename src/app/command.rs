//! Command parsing for the text front end.

use rust_decimal::Decimal;

use crate::portfolio::{TimeRange, Timeframe};
use crate::session::Tab;

/// A parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    /// Dump the session as JSON.
    State,
    Start,
    /// Pick an onboarding option (1-based).
    Select(usize),
    Next,
    Back,
    Tab(Tab),
    Product(String),
    Invest,
    More,
    Less,
    Amount(Decimal),
    /// Pick an amount preset (1-based).
    Preset(usize),
    Confirm,
    Range(TimeRange),
    /// Window for new-investor counts on the insights feed.
    Timeframe(Timeframe),
    TierNext,
    TierPrev,
    Advisors,
    /// Open the advisor chat.
    Chat,
    Ask(String),
    /// Follow the last advisor reply's action button.
    Go,
    Logout,
    /// Anything unrecognized; goes to the advisor once onboarded.
    Text(String),
    /// A known command with bad arguments.
    Invalid { usage: &'static str },
}

/// Parses input lines into commands.
pub struct CommandParser;

impl CommandParser {
    pub fn parse(content: &str) -> Command {
        let trimmed = content.trim();
        let lower = trimmed.to_lowercase();

        match lower.as_str() {
            "/help" | "/?" | "help" => Command::Help,
            "/quit" | "/exit" | "quit" | "exit" => Command::Quit,
            "/state" => Command::State,
            "start" | "get started" => Command::Start,
            "next" | "continue" => Command::Next,
            "back" => Command::Back,
            "invest" | "invest now" => Command::Invest,
            "more" | "+" => Command::More,
            "less" | "-" => Command::Less,
            "confirm" => Command::Confirm,
            "advisors" => Command::Advisors,
            "chat" => Command::Chat,
            "go" => Command::Go,
            "logout" | "log out" => Command::Logout,
            _ => parse_complex(trimmed, &lower),
        }
    }
}

/// Commands with arguments, bare tab names, and free text.
fn parse_complex(trimmed: &str, lower: &str) -> Command {
    if let Ok(tab) = lower.parse::<Tab>() {
        return Command::Tab(tab);
    }

    let (head, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((head, rest)) => (head.to_lowercase(), rest.trim()),
        None => (lower.to_string(), ""),
    };

    match head.as_str() {
        "select" => parse_index(rest)
            .map(Command::Select)
            .unwrap_or(Command::Invalid {
                usage: "select <option number>",
            }),
        "tab" => rest.parse::<Tab>().map(Command::Tab).unwrap_or(Command::Invalid {
            usage: "tab <home|portfolio|insights|products|profile>",
        }),
        "product" if !rest.is_empty() => Command::Product(rest.to_string()),
        "product" => Command::Invalid {
            usage: "product <id>",
        },
        "amount" => parse_amount(rest)
            .map(Command::Amount)
            .unwrap_or(Command::Invalid {
                usage: "amount <EGP>",
            }),
        "preset" => parse_index(rest)
            .map(Command::Preset)
            .unwrap_or(Command::Invalid {
                usage: "preset <1-4>",
            }),
        "range" => rest
            .parse::<TimeRange>()
            .map(Command::Range)
            .unwrap_or(Command::Invalid {
                usage: "range <1M|3M|1Y>",
            }),
        "timeframe" => rest
            .parse::<Timeframe>()
            .map(Command::Timeframe)
            .unwrap_or(Command::Invalid {
                usage: "timeframe <week|month|year>",
            }),
        "tier" => match rest.to_lowercase().as_str() {
            "next" => Command::TierNext,
            "prev" | "previous" => Command::TierPrev,
            _ => Command::Invalid {
                usage: "tier <next|prev>",
            },
        },
        "ask" if !rest.is_empty() => Command::Ask(rest.to_string()),
        "ask" => Command::Invalid {
            usage: "ask <question>",
        },
        _ => Command::Text(trimmed.to_string()),
    }
}

fn parse_index(arg: &str) -> Option<usize> {
    arg.parse().ok()
}

/// Accepts `2500`, `2,500` and `2500 EGP`.
fn parse_amount(arg: &str) -> Option<Decimal> {
    let cleaned: String = arg
        .trim_end_matches(|c: char| c.is_ascii_alphabetic() || c.is_whitespace())
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned.parse().ok()
}

/// Help text listing every command.
pub const HELP: &str = "\
Commands:
  start                 leave the preview screen
  select <n>            choose option n on the current question
  next | back           move through onboarding, product detail and investing
  home | portfolio | insights | products | profile
  tab <name>            switch tabs
  product <id>          open a product
  invest                invest in the open product
  more | less           change the amount by 500 EGP
  amount <n>            enter an amount
  preset <1-4>          pick 1,000 / 2,500 / 5,000 / 10,000 EGP
  confirm               continue / confirm / finish the investment
  range <1M|3M|1Y>      chart window on the portfolio tab
  timeframe <week|month|year>
                        new-investor window on the insights tab
  tier next|prev        browse wealth tiers on the profile tab
  advisors              meet the advisory team
  chat                  open the AI advisor
  ask <question>        ask the AI advisor (plain text works too)
  go                    follow the advisor's suggested action
  logout                reset and return to the preview screen
  /state                dump the session as JSON
  /quit                 exit";

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_simple_commands() {
        assert_eq!(CommandParser::parse("START"), Command::Start);
        assert_eq!(CommandParser::parse("  next "), Command::Next);
        assert_eq!(CommandParser::parse("/quit"), Command::Quit);
        assert_eq!(CommandParser::parse("+"), Command::More);
        assert_eq!(CommandParser::parse("log out"), Command::Logout);
    }

    #[test]
    fn parses_tabs() {
        assert_eq!(CommandParser::parse("Portfolio"), Command::Tab(Tab::Portfolio));
        assert_eq!(CommandParser::parse("tab insights"), Command::Tab(Tab::Insights));
        assert!(matches!(
            CommandParser::parse("tab wallet"),
            Command::Invalid { .. }
        ));
    }

    #[test]
    fn parses_arguments() {
        assert_eq!(CommandParser::parse("select 2"), Command::Select(2));
        assert_eq!(CommandParser::parse("product 3"), Command::Product("3".into()));
        assert_eq!(CommandParser::parse("preset 4"), Command::Preset(4));
        assert_eq!(
            CommandParser::parse("range 3m"),
            Command::Range(TimeRange::ThreeMonths)
        );
        assert_eq!(CommandParser::parse("tier prev"), Command::TierPrev);
        assert_eq!(
            CommandParser::parse("timeframe Week"),
            Command::Timeframe(Timeframe::Week)
        );
        assert_eq!(
            CommandParser::parse("timeframe"),
            Command::Invalid {
                usage: "timeframe <week|month|year>"
            }
        );
    }

    #[test]
    fn amount_accepts_separators_and_currency() {
        assert_eq!(CommandParser::parse("amount 2500"), Command::Amount(dec!(2500)));
        assert_eq!(
            CommandParser::parse("amount 12,500 EGP"),
            Command::Amount(dec!(12500))
        );
        assert!(matches!(
            CommandParser::parse("amount lots"),
            Command::Invalid { .. }
        ));
    }

    #[test]
    fn ask_keeps_original_case() {
        assert_eq!(
            CommandParser::parse("ask Market outlook for Egypt"),
            Command::Ask("Market outlook for Egypt".into())
        );
        assert!(matches!(CommandParser::parse("ask"), Command::Invalid { .. }));
    }

    #[test]
    fn unknown_input_is_text() {
        assert_eq!(
            CommandParser::parse("Should I invest more now?"),
            Command::Text("Should I invest more now?".into())
        );
        assert_eq!(
            CommandParser::parse("select the best fund"),
            Command::Invalid {
                usage: "select <option number>"
            }
        );
    }
}
