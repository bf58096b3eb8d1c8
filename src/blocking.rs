/// Blocking client facade.
///
/// Wraps the async [`crate::client::BinanceClient`] and a private
/// current-thread tokio runtime. Every method drives the async method of the
/// same name to completion, so validation, defaults and error mapping are
/// shared and the two variants cannot drift apart.
///
/// Do not call into this client from inside an async runtime: blocking on a
/// runtime from within another one panics. Use the async client there.
use std::future::Future;
use std::path::Path;

use rust_decimal::Decimal;
use tokio::runtime::{Builder, Runtime};

use crate::api::BinanceApi;
use crate::builder::{OrderParams, TradeRequest};
use crate::client::BinanceClient as AsyncClient;
use crate::config::{ClientConfig, Environment};
use crate::enums::{DepositStatus, KlineInterval, Side, TimeInForce, WithdrawalStatus};
use crate::errors::BinanceError;
use crate::models::*;
use crate::repository::ExchangeRepository;

/// The blocking Binance client.
#[derive(Debug)]
pub struct BinanceClient<R = BinanceApi> {
    inner: AsyncClient<R>,
    runtime: Runtime,
}

impl BinanceClient<BinanceApi> {
    pub fn from_config(config: ClientConfig) -> Result<Self, BinanceError> {
        Self::new(BinanceApi::new(config)?)
    }

    /// Unauthenticated client for `environment`; only market data works.
    pub fn public(environment: Environment) -> Result<Self, BinanceError> {
        Self::from_config(ClientConfig::from_environment(environment))
    }

    pub fn from_env() -> Result<Self, BinanceError> {
        Self::from_config(ClientConfig::from_env())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, BinanceError> {
        Self::from_config(ClientConfig::from_file(path)?)
    }
}

impl<R: ExchangeRepository> BinanceClient<R> {
    pub fn new(repository: R) -> Result<Self, BinanceError> {
        Self::from_async(AsyncClient::new(repository))
    }

    /// Wrap an existing async client.
    pub fn from_async(inner: AsyncClient<R>) -> Result<Self, BinanceError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| BinanceError::Other(format!("Failed to start runtime: {e}")))?;
        Ok(Self { inner, runtime })
    }

    /// The async client this facade drives.
    pub fn as_async(&self) -> &AsyncClient<R> {
        &self.inner
    }

    fn wait<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    pub fn is_configured(&self) -> bool {
        self.inner.is_configured()
    }

    // -----------------------------------------------------------------------
    // Account Data
    // -----------------------------------------------------------------------

    pub fn get_balance(&self) -> Result<Account, BinanceError> {
        self.wait(self.inner.get_balance())
    }

    pub fn get_transactions(&self) -> Result<Vec<Transaction>, BinanceError> {
        self.wait(self.inner.get_transactions())
    }

    pub fn get_order(&self, symbol: &str, order_id: u64) -> Result<OrderResponse, BinanceError> {
        self.wait(self.inner.get_order(symbol, order_id))
    }

    pub fn get_orders(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<Vec<OrderResponse>, BinanceError> {
        self.wait(self.inner.get_orders(symbol, limit))
    }

    pub fn get_open_orders(&self, symbol: &str) -> Result<Vec<OrderResponse>, BinanceError> {
        self.wait(self.inner.get_open_orders(symbol))
    }

    // -----------------------------------------------------------------------
    // Market Data
    // -----------------------------------------------------------------------

    pub fn get_order_book(&self, symbol: &str, limit: Option<u32>) -> Result<OrderBook, BinanceError> {
        self.wait(self.inner.get_order_book(symbol, limit))
    }

    pub fn get_tickers(&self, symbol: Option<&str>) -> Result<Vec<PriceTicker>, BinanceError> {
        self.wait(self.inner.get_tickers(symbol))
    }

    pub fn get_candlesticks(
        &self,
        symbol: &str,
        interval: KlineInterval,
        limit: Option<u32>,
    ) -> Result<Vec<Candlestick>, BinanceError> {
        self.wait(self.inner.get_candlesticks(symbol, interval, limit))
    }

    pub fn get_24h_stats(&self, symbol: Option<&str>) -> Result<Vec<DayStats>, BinanceError> {
        self.wait(self.inner.get_24h_stats(symbol))
    }

    pub fn get_server_time(&self) -> Result<i64, BinanceError> {
        self.wait(self.inner.get_server_time())
    }

    // -----------------------------------------------------------------------
    // Trading
    // -----------------------------------------------------------------------

    pub fn place_order(&self, params: OrderParams) -> Result<TradeResponse, BinanceError> {
        self.wait(self.inner.place_order(params))
    }

    pub fn post_trade(&self, request: TradeRequest) -> Result<TradeResponse, BinanceError> {
        self.wait(self.inner.post_trade(request))
    }

    pub fn place_limit_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: Decimal,
        price: Decimal,
        time_in_force: Option<TimeInForce>,
    ) -> Result<TradeResponse, BinanceError> {
        self.wait(
            self.inner
                .place_limit_order(symbol, side, quantity, price, time_in_force),
        )
    }

    pub fn place_limit_maker_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: Decimal,
        price: Decimal,
    ) -> Result<TradeResponse, BinanceError> {
        self.wait(
            self.inner
                .place_limit_maker_order(symbol, side, quantity, price),
        )
    }

    pub fn place_market_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: Decimal,
    ) -> Result<TradeResponse, BinanceError> {
        self.wait(self.inner.place_market_order(symbol, side, quantity))
    }

    pub fn place_stop_loss_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: Decimal,
        stop_price: Decimal,
    ) -> Result<TradeResponse, BinanceError> {
        self.wait(
            self.inner
                .place_stop_loss_order(symbol, side, quantity, stop_price),
        )
    }

    pub fn place_stop_loss_limit_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: Decimal,
        price: Decimal,
        stop_price: Decimal,
        time_in_force: TimeInForce,
    ) -> Result<TradeResponse, BinanceError> {
        self.wait(self.inner.place_stop_loss_limit_order(
            symbol,
            side,
            quantity,
            price,
            stop_price,
            time_in_force,
        ))
    }

    pub fn place_take_profit_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: Decimal,
        stop_price: Decimal,
    ) -> Result<TradeResponse, BinanceError> {
        self.wait(
            self.inner
                .place_take_profit_order(symbol, side, quantity, stop_price),
        )
    }

    pub fn place_take_profit_limit_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: Decimal,
        price: Decimal,
        stop_price: Decimal,
        time_in_force: TimeInForce,
    ) -> Result<TradeResponse, BinanceError> {
        self.wait(self.inner.place_take_profit_limit_order(
            symbol,
            side,
            quantity,
            price,
            stop_price,
            time_in_force,
        ))
    }

    pub fn cancel_order(&self, request: CancelRequest) -> Result<TradeResponse, BinanceError> {
        self.wait(self.inner.cancel_order(request))
    }

    // -----------------------------------------------------------------------
    // Wallet
    // -----------------------------------------------------------------------

    pub fn withdraw(&self, request: WithdrawRequest) -> Result<WithdrawResponse, BinanceError> {
        self.wait(self.inner.withdraw(request))
    }

    pub fn get_deposit_history(
        &self,
        query: HistoryQuery<DepositStatus>,
    ) -> Result<Vec<DepositRecord>, BinanceError> {
        self.wait(self.inner.get_deposit_history(query))
    }

    pub fn get_withdrawal_history(
        &self,
        query: HistoryQuery<WithdrawalStatus>,
    ) -> Result<Vec<WithdrawalRecord>, BinanceError> {
        self.wait(self.inner.get_withdrawal_history(query))
    }

    pub fn get_deposit_address(&self, asset: &str) -> Result<DepositAddress, BinanceError> {
        self.wait(self.inner.get_deposit_address(asset))
    }
}
