use crate::parse::{OrderRequest, ParseError};
use std::str::FromStr;

pub const WELCOME: &str = "Welcome to the order matcher. Type 'help' for a list of commands.";
pub const GOODBYE: &str = "Good bye!";

pub const HELP: &str = "Available commands:
  buy|sell <quantity>@<price> [#<id>]  - Enter an order.
  list                                 - List all remaining orders.
  quit                                 - Quit.
  help                                 - Show help (this message).
";

/// One line of driver input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Blank,
    Quit,
    List,
    Submit(OrderRequest),
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        match line.trim() {
            "" => Ok(Command::Blank),
            "help" => Ok(Command::Help),
            "quit" => Ok(Command::Quit),
            "list" => Ok(Command::List),
            order => order.parse().map(Command::Submit),
        }
    }
}
