/// Error types for the Binance client.
///
/// Three families reach the caller: validation failures raised locally by the
/// order builder, exchange rejections carrying the venue's `code`/`msg`, and
/// transport failures (HTTP, JSON, missing credentials).
use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::enums::OrderType;

/// A field of an order, cancel or withdrawal request, named by its wire
/// parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderField {
    Symbol,
    Quantity,
    Price,
    StopPrice,
    TimeInForce,
    OrigClientOrderId,
    Asset,
    Address,
    Amount,
}

impl OrderField {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderField::Symbol => "symbol",
            OrderField::Quantity => "quantity",
            OrderField::Price => "price",
            OrderField::StopPrice => "stopPrice",
            OrderField::TimeInForce => "timeInForce",
            OrderField::OrigClientOrderId => "origClientOrderId",
            OrderField::Asset => "coin",
            OrderField::Address => "address",
            OrderField::Amount => "amount",
        }
    }
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An order request that cannot be dispatched as given.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: OrderField },

    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: OrderField, value: Decimal },

    #[error("{field} is required for {order_type} orders")]
    Missing {
        field: OrderField,
        order_type: OrderType,
    },

    #[error("{field} is not accepted for {order_type} orders")]
    NotAllowed {
        field: OrderField,
        order_type: OrderType,
    },
}

impl ValidationError {
    /// The offending field.
    pub fn field(&self) -> OrderField {
        match self {
            ValidationError::Empty { field }
            | ValidationError::NotPositive { field, .. }
            | ValidationError::Missing { field, .. }
            | ValidationError::NotAllowed { field, .. } => *field,
        }
    }
}

/// Coarse classification of a [`BinanceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Exchange,
    Transport,
}

/// The primary error type for the client.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BinanceError {
    // Raised before dispatch
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    // Venue rejected a well-formed request
    #[error("Exchange error ({code}): {message}")]
    Exchange { code: i64, message: String },

    // Transport errors
    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("JSON error: {0}")]
    JsonError(String),

    // Unrecognized wire string
    #[error("Parse error: {0}")]
    Parse(String),

    // Generic
    #[error("{0}")]
    Other(String),
}

impl BinanceError {
    /// Build an exchange rejection from the venue's `{"code", "msg"}` body.
    pub fn exchange(code: i64, message: impl Into<String>) -> Self {
        BinanceError::Exchange {
            code,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            BinanceError::Validation(_) => ErrorKind::Validation,
            BinanceError::Exchange { .. } => ErrorKind::Exchange,
            _ => ErrorKind::Transport,
        }
    }

    /// Returns the venue error code if this is an exchange rejection.
    pub fn error_code(&self) -> Option<i64> {
        match self {
            BinanceError::Exchange { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns true if this error suggests retrying with backoff.
    ///
    /// Covers `-1000` (unknown), `-1001` (disconnected), `-1003` (too many
    /// requests) and `-1007` (backend timeout). The client itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BinanceError::Exchange {
                code: -1000 | -1001 | -1003 | -1007,
                ..
            } | BinanceError::HttpError(_)
        )
    }
}

impl From<reqwest::Error> for BinanceError {
    fn from(err: reqwest::Error) -> Self {
        BinanceError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for BinanceError {
    fn from(err: serde_json::Error) -> Self {
        BinanceError::JsonError(err.to_string())
    }
}

impl From<url::ParseError> for BinanceError {
    fn from(err: url::ParseError) -> Self {
        BinanceError::Config(format!("URL parse error: {err}"))
    }
}
