//! Order-line grammar: `buy|sell <quantity>@<price> [#<id>]`.

use orderbook::{Order, OrderBook, OrderId, Side};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty order")]
    Empty,

    #[error("unknown side '{0}', use 'buy' or 'sell'")]
    UnknownSide(String),

    #[error("missing <quantity>@<price>")]
    MissingQuantityPrice,

    #[error("expected <quantity>@<price>, got '{0}'")]
    MalformedQuantityPrice(String),

    #[error("quantity must be a positive integer, got '{0}'")]
    InvalidQuantity(String),

    #[error("price must be a positive integer, got '{0}'")]
    InvalidPrice(String),

    #[error("id must be '#' followed by a non-negative integer, got '{0}'")]
    InvalidId(String),

    #[error("unexpected input after order: '{0}'")]
    TrailingInput(String),

    #[error("no order ids left to assign, enter an explicit '#<id>'")]
    IdsExhausted,
}

/// A parsed order line. The id is only present when the user typed one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrderRequest {
    pub side: Side,
    pub qty: i64,
    pub price: i64,
    pub id: Option<OrderId>,
}

impl OrderRequest {
    /// Resolves the id (explicit or allocated) and builds the order for the book.
    pub fn into_order(self, ids: &mut IdAllocator, book: &OrderBook) -> Result<Order, ParseError> {
        let id = ids.assign(self.id, book)?;
        Ok(Order::new(id, self.side, self.price, self.qty))
    }
}

impl FromStr for OrderRequest {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();

        let side = parse_side(tokens.next().ok_or(ParseError::Empty)?)?;
        let (qty, price) = parse_qty_price(tokens.next().ok_or(ParseError::MissingQuantityPrice)?)?;
        let id = tokens.next().map(parse_id).transpose()?;

        if let Some(extra) = tokens.next() {
            return Err(ParseError::TrailingInput(extra.to_string()));
        }

        Ok(Self {
            side,
            qty,
            price,
            id,
        })
    }
}

fn parse_side(s: &str) -> Result<Side, ParseError> {
    match s.to_lowercase().as_str() {
        "buy" => Ok(Side::Buy),
        "sell" => Ok(Side::Sell),
        _ => Err(ParseError::UnknownSide(s.to_string())),
    }
}

fn parse_qty_price(s: &str) -> Result<(i64, i64), ParseError> {
    let (qty, price) = s
        .split_once('@')
        .ok_or_else(|| ParseError::MalformedQuantityPrice(s.to_string()))?;
    let qty = parse_positive(qty).ok_or_else(|| ParseError::InvalidQuantity(qty.to_string()))?;
    let price = parse_positive(price).ok_or_else(|| ParseError::InvalidPrice(price.to_string()))?;
    Ok((qty, price))
}

fn parse_id(s: &str) -> Result<OrderId, ParseError> {
    s.strip_prefix('#')
        .filter(|digits| digits.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|digits| digits.parse::<u64>().ok())
        .map(OrderId)
        .ok_or_else(|| ParseError::InvalidId(s.to_string()))
}

fn parse_positive(s: &str) -> Option<i64> {
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<i64>().ok().filter(|v| *v > 0)
}

/// Hands out ids for orders typed without `#<id>`.
///
/// An explicit id moves the counter past it, so later allocated ids never
/// repeat one the user already chose. The counter only moves forward and
/// skips ids resting in the book; once `u64::MAX` has been handed out it is
/// exhausted.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    /// `None` once every id has been handed out
    next: Option<u64>,
}

impl IdAllocator {
    pub fn new(first: u64) -> Self {
        Self { next: Some(first) }
    }

    pub fn assign(
        &mut self,
        requested: Option<OrderId>,
        book: &OrderBook,
    ) -> Result<OrderId, ParseError> {
        if let Some(id) = requested {
            // u64::MAX has no successor; leave the counter where it is
            if let (Some(next), Some(after)) = (self.next, id.0.checked_add(1)) {
                self.next = Some(next.max(after));
            }
            return Ok(id);
        }

        loop {
            let candidate = self.next.ok_or(ParseError::IdsExhausted)?;
            self.next = candidate.checked_add(1);
            if !book.contains(OrderId(candidate)) {
                return Ok(OrderId(candidate));
            }
        }
    }
}
