/// The exchange collaborator behind [`BinanceClient`](crate::BinanceClient).
///
/// A repository owns signing, transport and decoding. It receives requests
/// that have already been validated and returns the venue's answer or error
/// untouched; the client layers no retries or caching on top.
///
/// [`BinanceApi`](crate::api::BinanceApi) is the REST implementation.
/// Tests and alternative transports implement this trait directly.
use std::future::Future;

use crate::builder::TradeRequest;
use crate::enums::{DepositStatus, KlineInterval, WithdrawalStatus};
use crate::errors::BinanceError;
use crate::models::*;

pub trait ExchangeRepository: Send + Sync {
    /// Whether credentials for signed endpoints are present. Local check.
    fn is_configured(&self) -> bool;

    fn get_balance(&self) -> impl Future<Output = Result<Account, BinanceError>> + Send;

    fn get_transactions(
        &self,
    ) -> impl Future<Output = Result<Vec<Transaction>, BinanceError>> + Send;

    fn get_order(
        &self,
        symbol: &str,
        order_id: u64,
    ) -> impl Future<Output = Result<OrderResponse, BinanceError>> + Send;

    fn get_orders(
        &self,
        symbol: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<OrderResponse>, BinanceError>> + Send;

    fn get_open_orders(
        &self,
        symbol: &str,
    ) -> impl Future<Output = Result<Vec<OrderResponse>, BinanceError>> + Send;

    fn get_order_book(
        &self,
        symbol: &str,
        limit: u32,
    ) -> impl Future<Output = Result<OrderBook, BinanceError>> + Send;

    /// Dispatch a validated order. The request is consumed: one request,
    /// one dispatch.
    fn place_order(
        &self,
        request: TradeRequest,
    ) -> impl Future<Output = Result<TradeResponse, BinanceError>> + Send;

    fn cancel_order(
        &self,
        request: CancelRequest,
    ) -> impl Future<Output = Result<TradeResponse, BinanceError>> + Send;

    /// Latest prices; every symbol when `symbol` is `None`.
    fn get_tickers(
        &self,
        symbol: Option<&str>,
    ) -> impl Future<Output = Result<Vec<PriceTicker>, BinanceError>> + Send;

    fn get_candlesticks(
        &self,
        symbol: &str,
        interval: KlineInterval,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Candlestick>, BinanceError>> + Send;

    /// 24-hour statistics; every symbol when `symbol` is `None`.
    fn get_24h_stats(
        &self,
        symbol: Option<&str>,
    ) -> impl Future<Output = Result<Vec<DayStats>, BinanceError>> + Send;

    /// Exchange clock in epoch milliseconds.
    fn get_server_time(&self) -> impl Future<Output = Result<i64, BinanceError>> + Send;

    fn withdraw(
        &self,
        request: WithdrawRequest,
    ) -> impl Future<Output = Result<WithdrawResponse, BinanceError>> + Send;

    fn get_deposit_history(
        &self,
        query: HistoryQuery<DepositStatus>,
    ) -> impl Future<Output = Result<Vec<DepositRecord>, BinanceError>> + Send;

    fn get_withdrawal_history(
        &self,
        query: HistoryQuery<WithdrawalStatus>,
    ) -> impl Future<Output = Result<Vec<WithdrawalRecord>, BinanceError>> + Send;

    fn get_deposit_address(
        &self,
        asset: &str,
    ) -> impl Future<Output = Result<DepositAddress, BinanceError>> + Send;
}
