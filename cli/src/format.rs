//! Text and JSON renderings of book output.

use clap::ValueEnum;
use orderbook::{Order, Trade};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// `BUY 10@100 #1`, one record per line
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

#[derive(Serialize)]
struct Listing<'a> {
    buy: &'a [Order],
    sell: &'a [Order],
}

pub fn render_order(order: &Order, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(format!(
            "{} {}@{} #{}",
            order.side, order.qty, order.price, order.id
        )),
        OutputFormat::Json => serde_json::to_string(order),
    }
}

pub fn render_trade(trade: &Trade, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(format!(
            "TRADE {}@{} (active #{}, passive #{})",
            trade.qty, trade.price, trade.active, trade.passive
        )),
        OutputFormat::Json => serde_json::to_string(trade),
    }
}

/// Both sides of the book, buy side first. Each line ends with a newline.
pub fn render_listing(
    buy: &[Order],
    sell: &[Order],
    format: OutputFormat,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => {
            let mut out = String::from("BUY:\n");
            for order in buy {
                out.push_str(&render_order(order, format)?);
                out.push('\n');
            }
            out.push_str("SELL:\n");
            for order in sell {
                out.push_str(&render_order(order, format)?);
                out.push('\n');
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let mut out = serde_json::to_string(&Listing { buy, sell })?;
            out.push('\n');
            Ok(out)
        }
    }
}
