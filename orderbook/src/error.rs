//! Rejections raised by the order book before any state is touched.

use thiserror::Error;

use crate::types::OrderId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("invalid price {price}, must be positive")]
    InvalidPrice { price: i64 },

    #[error("invalid quantity {qty}, must be positive")]
    InvalidQuantity { qty: i64 },

    #[error("order #{0} is already resting in the book")]
    DuplicateId(OrderId),
}
