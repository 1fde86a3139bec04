//! Driver loop: reads commands, dispatches them to the book, prints the results.

use std::io::{BufRead, Write};

use orderbook::{OrderBook, OrderError, Side};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::command::{Command, GOODBYE, HELP, WELCOME};
use crate::format::{render_listing, render_trade, OutputFormat};
use crate::parse::{IdAllocator, ParseError};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Bad input: {0}")]
    Parse(#[from] ParseError),

    #[error("Rejected: {0}")]
    Order(#[from] OrderError),

    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl SessionError {
    /// Errors caused by a single bad command; the loop reports them and keeps going.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SessionError::Parse(_) | SessionError::Order(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One interactive session over a single order book.
pub struct Session {
    book: OrderBook,
    ids: IdAllocator,
    format: OutputFormat,
}

impl Session {
    pub fn new(format: OutputFormat, first_id: u64) -> Self {
        Self {
            book: OrderBook::new(),
            ids: IdAllocator::new(first_id),
            format,
        }
    }

    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    /// Executes a single input line, writing any output to `out`.
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow, SessionError> {
        let command: Command = line.parse()?;
        debug!(?command, "dispatching");

        match command {
            Command::Blank => {}
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
            Command::List => {
                let buy = self.book.orders(Side::Buy);
                let sell = self.book.orders(Side::Sell);
                write!(out, "{}", render_listing(&buy, &sell, self.format)?)?;
            }
            Command::Submit(request) => {
                let order = request.into_order(&mut self.ids, &self.book)?;
                let trades = self.book.submit(order)?;
                debug!(id = %order.id, side = %order.side, trades = trades.len(), "order accepted");
                for trade in &trades {
                    writeln!(out, "{}", render_trade(trade, self.format)?)?;
                }
            }
        }

        Ok(Flow::Continue)
    }

    /// Runs until `quit` or end of input.
    ///
    /// Bad commands are reported on `err` and skipped; I/O and encoding
    /// failures stop the loop.
    pub fn run<R, W, E>(
        &mut self,
        input: R,
        out: &mut W,
        err: &mut E,
        banner: bool,
    ) -> Result<(), SessionError>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        if banner {
            writeln!(out, "{WELCOME}")?;
            writeln!(out)?;
        }

        for line in input.lines() {
            let line = line?;
            match self.execute(&line, out) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => {
                    info!("quit requested");
                    break;
                }
                Err(e) if e.is_recoverable() => {
                    warn!(error = %e, "command rejected");
                    writeln!(err, "{e}")?;
                }
                Err(e) => return Err(e),
            }
            out.flush()?;
        }

        if banner {
            writeln!(out, "{GOODBYE}")?;
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderbook::{Order, OrderId};

    fn run_script(session: &mut Session, script: &str) -> (String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        session
            .run(script.as_bytes(), &mut out, &mut err, false)
            .expect("session runs");
        (
            String::from_utf8(out).expect("utf8"),
            String::from_utf8(err).expect("utf8"),
        )
    }

    #[test]
    fn trades_are_printed_one_per_line() {
        let mut session = Session::new(OutputFormat::Text, 1);
        let (out, err) = run_script(&mut session, "sell 5@99\nsell 5@100\nbuy 8@100\n");

        assert_eq!(
            out,
            "TRADE 5@99 (active #3, passive #1)\nTRADE 3@100 (active #3, passive #2)\n"
        );
        assert!(err.is_empty());
        assert_eq!(
            session.book().orders(Side::Sell),
            vec![Order::new(OrderId(2), Side::Sell, 100, 2)]
        );
    }

    #[test]
    fn list_prints_both_sides_in_priority_order() {
        let mut session = Session::new(OutputFormat::Text, 1);
        let script = "buy 1@100\nbuy 2@101 #10\nsell 3@105\nsell 4@104\n\nlist\n";
        let (out, _) = run_script(&mut session, script);

        assert_eq!(
            out,
            "BUY:\nBUY 2@101 #10\nBUY 1@100 #1\nSELL:\nSELL 4@104 #12\nSELL 3@105 #11\n"
        );
    }

    #[test]
    fn bad_input_is_reported_and_loop_continues() {
        let mut session = Session::new(OutputFormat::Text, 1);
        let (out, err) = run_script(&mut session, "buy ten@100\nsell 1@5\nlist\n");

        assert_eq!(
            err,
            "Bad input: quantity must be a positive integer, got 'ten'\n"
        );
        assert_eq!(out, "BUY:\nSELL:\nSELL 1@5 #1\n");
    }

    #[test]
    fn duplicate_id_is_rejected_without_change() {
        let mut session = Session::new(OutputFormat::Text, 1);
        let (out, err) = run_script(&mut session, "sell 10@100 #1\nbuy 10@100 #1\nlist\n");

        assert_eq!(err, "Rejected: order #1 is already resting in the book\n");
        assert_eq!(out, "BUY:\nSELL:\nSELL 10@100 #1\n");
    }

    #[test]
    fn quit_stops_reading() {
        let mut session = Session::new(OutputFormat::Text, 1);
        let (out, _) = run_script(&mut session, "sell 1@1\nquit\nsell 1@2\n");

        assert!(out.is_empty());
        assert_eq!(session.book().len(), 1);
    }

    #[test]
    fn banner_wraps_session() {
        let mut session = Session::new(OutputFormat::Text, 1);
        let mut out = Vec::new();
        let mut err = Vec::new();
        session
            .run("help\nquit\n".as_bytes(), &mut out, &mut err, true)
            .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with(&format!("{WELCOME}\n\n")));
        assert!(out.contains("buy|sell <quantity>@<price> [#<id>]"));
        assert!(out.ends_with(&format!("{GOODBYE}\n")));
    }

    #[test]
    fn json_output() {
        let mut session = Session::new(OutputFormat::Json, 1);
        let (out, _) = run_script(&mut session, "sell 4@100\nbuy 10@100\nlist\n");

        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(
            lines,
            vec![
                serde_json::json!({"active": 2, "passive": 1, "price": 100, "qty": 4}),
                serde_json::json!({
                    "buy": [{"id": 2, "side": "buy", "price": 100, "qty": 6}],
                    "sell": []
                }),
            ]
        );
    }

    #[test]
    fn execute_reports_flow() {
        let mut session = Session::new(OutputFormat::Text, 1);
        let mut out = Vec::new();
        assert_eq!(session.execute("", &mut out).unwrap(), Flow::Continue);
        assert_eq!(session.execute("quit", &mut out).unwrap(), Flow::Quit);
        assert!(session
            .execute("buy 0@1", &mut out)
            .unwrap_err()
            .is_recoverable());
    }

    #[test]
    fn max_explicit_id_does_not_block_allocated_ids() {
        let mut session = Session::new(OutputFormat::Text, 1);
        let script = "sell 1@1 #18446744073709551615\nsell 1@2\nsell 1@3\nlist\n";
        let (out, err) = run_script(&mut session, script);

        assert!(err.is_empty());
        assert_eq!(
            out,
            "BUY:\nSELL:\nSELL 1@1 #18446744073709551615\nSELL 1@2 #1\nSELL 1@3 #2\n"
        );
    }

    #[test]
    fn allocated_ids_keep_counting_after_max_id_fills() {
        let mut session = Session::new(OutputFormat::Text, 1);
        let script = "sell 1@1 #18446744073709551615\nbuy 1@1\nsell 1@2\nsell 1@3 #5\nsell 1@4\nlist\n";
        let (out, err) = run_script(&mut session, script);

        assert!(err.is_empty());
        assert_eq!(
            out,
            "TRADE 1@1 (active #1, passive #18446744073709551615)\n\
             BUY:\nSELL:\nSELL 1@2 #2\nSELL 1@3 #5\nSELL 1@4 #6\n"
        );
    }

    #[test]
    fn exhausted_ids_are_reported_as_bad_input() {
        let mut session = Session::new(OutputFormat::Text, u64::MAX);
        let (out, err) = run_script(&mut session, "sell 1@1\nsell 1@2\nsell 1@3 #4\nlist\n");

        assert_eq!(
            err,
            "Bad input: no order ids left to assign, enter an explicit '#<id>'\n"
        );
        assert_eq!(
            out,
            "BUY:\nSELL:\nSELL 1@1 #18446744073709551615\nSELL 1@3 #4\n"
        );
    }
}
