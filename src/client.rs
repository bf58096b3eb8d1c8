/// The async client facade.
///
/// This is the primary entry point for SDK users. Mutating operations run the
/// order builder first and hand the validated request to the repository; read
/// operations only fill in defaults and delegate. Validation failures return
/// before the repository is touched, and repository errors come back
/// unchanged.
///
/// See [`crate::blocking::BinanceClient`] for the blocking variant, which
/// drives these same methods to completion.
use std::path::Path;

use log::debug;
use rust_decimal::Decimal;

use crate::api::BinanceApi;
use crate::builder::{
    build_cancel, build_limit_maker_order, build_limit_order, build_market_order, build_order,
    build_stop_loss_limit_order, build_stop_loss_order, build_take_profit_limit_order,
    build_take_profit_order, build_withdraw, OrderParams, TradeRequest,
};
use crate::config::{ClientConfig, Environment};
use crate::enums::{DepositStatus, KlineInterval, Side, TimeInForce, WithdrawalStatus};
use crate::errors::BinanceError;
use crate::models::*;
use crate::repository::ExchangeRepository;

/// Orders returned by [`BinanceClient::get_orders`] when no limit is given.
pub const DEFAULT_ORDERS_LIMIT: u32 = 20;
/// Depth returned by [`BinanceClient::get_order_book`] when no limit is given.
pub const DEFAULT_ORDER_BOOK_LIMIT: u32 = 100;
/// Klines returned by [`BinanceClient::get_candlesticks`] when no limit is given.
pub const DEFAULT_CANDLESTICK_LIMIT: u32 = 500;

/// The async Binance client.
///
/// Holds one repository for its whole lifetime and no other state, so a
/// single instance can be shared between tasks behind an `Arc`.
#[derive(Debug)]
pub struct BinanceClient<R = BinanceApi> {
    repository: R,
}

impl BinanceClient<BinanceApi> {
    /// Client backed by the REST repository built from `config`.
    pub fn from_config(config: ClientConfig) -> Result<Self, BinanceError> {
        Ok(Self::new(BinanceApi::new(config)?))
    }

    /// Unauthenticated client for `environment`; only market data works.
    pub fn public(environment: Environment) -> Result<Self, BinanceError> {
        Self::from_config(ClientConfig::from_environment(environment))
    }

    /// Client configured from `BINANCE_API_KEY` / `BINANCE_API_SECRET` /
    /// `BINANCE_API_BASE`.
    pub fn from_env() -> Result<Self, BinanceError> {
        Self::from_config(ClientConfig::from_env())
    }

    /// Client configured from a JSON file (see [`ClientConfig::from_file`]).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, BinanceError> {
        Self::from_config(ClientConfig::from_file(path)?)
    }
}

impl<R: ExchangeRepository> BinanceClient<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Whether the repository holds credentials for trading. No network call.
    pub fn is_configured(&self) -> bool {
        self.repository.is_configured()
    }

    // -----------------------------------------------------------------------
    // Account Data
    // -----------------------------------------------------------------------

    pub async fn get_balance(&self) -> Result<Account, BinanceError> {
        debug!("client.get_balance");
        self.repository.get_balance().await
    }

    /// Deposits and withdrawals on the account, limited to the venue's default
    /// history window (about 90 days).
    pub async fn get_transactions(&self) -> Result<Vec<Transaction>, BinanceError> {
        debug!("client.get_transactions");
        self.repository.get_transactions().await
    }

    pub async fn get_order(
        &self,
        symbol: &str,
        order_id: u64,
    ) -> Result<OrderResponse, BinanceError> {
        debug!("client.get_order symbol={} order_id={}", symbol, order_id);
        self.repository.get_order(symbol, order_id).await
    }

    /// Most recent orders for `symbol`; 20 unless `limit` is given.
    pub async fn get_orders(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<Vec<OrderResponse>, BinanceError> {
        let limit = limit.unwrap_or(DEFAULT_ORDERS_LIMIT);
        debug!("client.get_orders symbol={} limit={}", symbol, limit);
        self.repository.get_orders(symbol, limit).await
    }

    pub async fn get_open_orders(&self, symbol: &str) -> Result<Vec<OrderResponse>, BinanceError> {
        debug!("client.get_open_orders symbol={}", symbol);
        self.repository.get_open_orders(symbol).await
    }

    // -----------------------------------------------------------------------
    // Market Data
    // -----------------------------------------------------------------------

    /// Order book for `symbol`; 100 levels per side unless `limit` is given.
    pub async fn get_order_book(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<OrderBook, BinanceError> {
        let limit = limit.unwrap_or(DEFAULT_ORDER_BOOK_LIMIT);
        debug!("client.get_order_book symbol={} limit={}", symbol, limit);
        self.repository.get_order_book(symbol, limit).await
    }

    /// Latest price for `symbol`, or for every symbol when `None`.
    pub async fn get_tickers(
        &self,
        symbol: Option<&str>,
    ) -> Result<Vec<PriceTicker>, BinanceError> {
        debug!("client.get_tickers symbol={:?}", symbol);
        self.repository.get_tickers(symbol).await
    }

    /// Klines for `symbol`; 500 unless `limit` is given.
    pub async fn get_candlesticks(
        &self,
        symbol: &str,
        interval: KlineInterval,
        limit: Option<u32>,
    ) -> Result<Vec<Candlestick>, BinanceError> {
        let limit = limit.unwrap_or(DEFAULT_CANDLESTICK_LIMIT);
        debug!(
            "client.get_candlesticks symbol={} interval={} limit={}",
            symbol, interval, limit
        );
        self.repository
            .get_candlesticks(symbol, interval, limit)
            .await
    }

    /// 24-hour statistics for `symbol`, or for every symbol when `None`.
    pub async fn get_24h_stats(&self, symbol: Option<&str>) -> Result<Vec<DayStats>, BinanceError> {
        debug!("client.get_24h_stats symbol={:?}", symbol);
        self.repository.get_24h_stats(symbol).await
    }

    /// Exchange clock in epoch milliseconds.
    pub async fn get_server_time(&self) -> Result<i64, BinanceError> {
        debug!("client.get_server_time");
        self.repository.get_server_time().await
    }

    // -----------------------------------------------------------------------
    // Trading
    // -----------------------------------------------------------------------

    /// Validate `params` and place the resulting order.
    pub async fn place_order(&self, params: OrderParams) -> Result<TradeResponse, BinanceError> {
        let request = build_order(params)?;
        self.post_trade(request).await
    }

    /// Place an order that has already been built.
    pub async fn post_trade(&self, request: TradeRequest) -> Result<TradeResponse, BinanceError> {
        debug!(
            "client.post_trade symbol={} side={} type={}",
            request.symbol(),
            request.side(),
            request.order_type()
        );
        self.repository.place_order(request).await
    }

    /// LIMIT order; GTC unless `time_in_force` is given.
    pub async fn place_limit_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: Decimal,
        price: Decimal,
        time_in_force: Option<TimeInForce>,
    ) -> Result<TradeResponse, BinanceError> {
        let request = build_limit_order(symbol, side, quantity, price, time_in_force)?;
        self.post_trade(request).await
    }

    pub async fn place_limit_maker_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: Decimal,
        price: Decimal,
    ) -> Result<TradeResponse, BinanceError> {
        let request = build_limit_maker_order(symbol, side, quantity, price)?;
        self.post_trade(request).await
    }

    pub async fn place_market_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: Decimal,
    ) -> Result<TradeResponse, BinanceError> {
        let request = build_market_order(symbol, side, quantity)?;
        self.post_trade(request).await
    }

    pub async fn place_stop_loss_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: Decimal,
        stop_price: Decimal,
    ) -> Result<TradeResponse, BinanceError> {
        let request = build_stop_loss_order(symbol, side, quantity, stop_price)?;
        self.post_trade(request).await
    }

    pub async fn place_stop_loss_limit_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: Decimal,
        price: Decimal,
        stop_price: Decimal,
        time_in_force: TimeInForce,
    ) -> Result<TradeResponse, BinanceError> {
        let request =
            build_stop_loss_limit_order(symbol, side, quantity, price, stop_price, time_in_force)?;
        self.post_trade(request).await
    }

    pub async fn place_take_profit_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: Decimal,
        stop_price: Decimal,
    ) -> Result<TradeResponse, BinanceError> {
        let request = build_take_profit_order(symbol, side, quantity, stop_price)?;
        self.post_trade(request).await
    }

    pub async fn place_take_profit_limit_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: Decimal,
        price: Decimal,
        stop_price: Decimal,
        time_in_force: TimeInForce,
    ) -> Result<TradeResponse, BinanceError> {
        let request = build_take_profit_limit_order(
            symbol,
            side,
            quantity,
            price,
            stop_price,
            time_in_force,
        )?;
        self.post_trade(request).await
    }

    /// Cancel an order. An empty symbol or client id fails before dispatch; a
    /// venue rejection (e.g. already cancelled) is returned as-is.
    pub async fn cancel_order(&self, request: CancelRequest) -> Result<TradeResponse, BinanceError> {
        let request = build_cancel(request)?;
        debug!(
            "client.cancel_order symbol={} order={:?}",
            request.symbol(),
            request.order()
        );
        self.repository.cancel_order(request).await
    }

    // -----------------------------------------------------------------------
    // Wallet
    // -----------------------------------------------------------------------

    /// Request a withdrawal. Asset, address and a positive amount are checked
    /// before dispatch.
    pub async fn withdraw(&self, request: WithdrawRequest) -> Result<WithdrawResponse, BinanceError> {
        let request = build_withdraw(request)?;
        debug!(
            "client.withdraw asset={} amount={}",
            request.asset, request.amount
        );
        self.repository.withdraw(request).await
    }

    /// Deposit history. Without a time range the venue applies its default
    /// window (about the last 90 days), so `HistoryQuery::all()` is not
    /// all-time.
    pub async fn get_deposit_history(
        &self,
        query: HistoryQuery<DepositStatus>,
    ) -> Result<Vec<DepositRecord>, BinanceError> {
        debug!("client.get_deposit_history query={:?}", query);
        self.repository.get_deposit_history(query).await
    }

    /// Withdrawal history. Without a time range the venue applies its default
    /// window (about the last 90 days), so `HistoryQuery::all()` is not
    /// all-time.
    pub async fn get_withdrawal_history(
        &self,
        query: HistoryQuery<WithdrawalStatus>,
    ) -> Result<Vec<WithdrawalRecord>, BinanceError> {
        debug!("client.get_withdrawal_history query={:?}", query);
        self.repository.get_withdrawal_history(query).await
    }

    pub async fn get_deposit_address(&self, asset: &str) -> Result<DepositAddress, BinanceError> {
        debug!("client.get_deposit_address asset={}", asset);
        self.repository.get_deposit_address(asset).await
    }
}
