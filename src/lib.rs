//! Binance spot client for Rust.
//!
//! A thin client facade over the Binance spot REST API with validated order
//! construction and matching async and blocking entry points.
//!
//! # What This Crate Provides
//!
//! - Async client: [`BinanceClient`]
//! - Blocking client: [`blocking::BinanceClient`]
//! - Order validation and defaults: [`build_order`] and the typed `build_*_order` helpers
//! - The exchange seam: [`ExchangeRepository`], with [`api::BinanceApi`] as the REST implementation
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use binance_client::{BinanceClient, Environment, KlineInterval};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), binance_client::BinanceError> {
//!     let client = BinanceClient::public(Environment::Testnet)?;
//!
//!     let server_time = client.get_server_time().await?;
//!     println!("server time: {server_time}");
//!
//!     let book = client.get_order_book("BTCUSDT", Some(5)).await?;
//!     println!("best bid: {:?}", book.best_bid());
//!
//!     let candles = client
//!         .get_candlesticks("BTCUSDT", KlineInterval::OneHour, None)
//!         .await?;
//!     println!("{} candles", candles.len());
//!     Ok(())
//! }
//! ```
//!
//! # Placing Orders
//!
//! Orders are validated before anything is sent. A `LIMIT` order without a
//! time in force gets `GTC`; a missing price, stop price or required time in
//! force is reported as a [`ValidationError`] and the exchange is never
//! contacted.
//!
//! ```rust,no_run
//! use binance_client::{BinanceClient, ClientConfig, Environment, Side};
//! use rust_decimal::Decimal;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), binance_client::BinanceError> {
//!     let config = ClientConfig::from_environment(Environment::Testnet)
//!         .with_credentials("api-key", "api-secret");
//!     let client = BinanceClient::from_config(config)?;
//!
//!     let response = client
//!         .place_limit_order(
//!             "BTCUSDT",
//!             Side::Buy,
//!             Decimal::new(1, 3),
//!             Decimal::new(20_000, 0),
//!             None,
//!         )
//!         .await?;
//!     println!("order id: {:?}", response.order_id);
//!     Ok(())
//! }
//! ```
//!
//! # Blocking Use
//!
//! ```rust,no_run
//! use binance_client::blocking::BinanceClient;
//! use binance_client::Environment;
//!
//! fn main() -> Result<(), binance_client::BinanceError> {
//!     let client = BinanceClient::public(Environment::Testnet)?;
//!     let tickers = client.get_tickers(Some("BTCUSDT"))?;
//!     println!("{tickers:?}");
//!     Ok(())
//! }
//! ```
//!
//! # Logging
//!
//! This crate emits debug-level logs through the [`log`](https://docs.rs/log/) facade
//! for client and API calls. Configure any compatible logger in your binary, then set
//! `RUST_LOG=debug` to inspect request flow. Secrets are never logged.
//!
//! # Errors
//!
//! All fallible operations return [`BinanceError`]. Use [`BinanceError::kind`] to tell
//! the three failure classes apart:
//!
//! - Local validation failures (`Validation`), raised before any network call
//! - Exchange rejections (`Exchange`), carrying Binance's own `code` and `msg`
//! - Transport/serialization failures (`HttpError`, `JsonError`, etc.)
pub mod api;
pub mod blocking;
pub mod builder;
pub mod client;
pub mod config;
pub mod enums;
pub mod errors;
pub mod models;
pub mod repository;
pub mod signer;

// Re-export primary types for convenience.
pub use builder::{
    build_cancel, build_limit_maker_order, build_limit_order, build_market_order, build_order,
    build_stop_loss_limit_order, build_stop_loss_order, build_take_profit_limit_order,
    build_take_profit_order, build_withdraw, OrderParams, TradeRequest,
};
pub use client::BinanceClient;
pub use config::{ClientConfig, Environment};
pub use enums::*;
pub use errors::{BinanceError, ErrorKind, OrderField, ValidationError};
pub use models::*;
pub use repository::ExchangeRepository;
