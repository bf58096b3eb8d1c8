/// REST implementation of [`ExchangeRepository`] for the Binance spot API.
///
/// Public market-data endpoints are plain GETs. Account, order and wallet
/// endpoints are signed: `recvWindow` (if configured), `timestamp` and an
/// HMAC `signature` are appended to the query string and the API key is sent
/// in the `X-MBX-APIKEY` header. Every call is a single HTTP attempt.
use std::any::type_name;
use std::time::{SystemTime, UNIX_EPOCH};

use log::debug;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;

use crate::builder::TradeRequest;
use crate::config::ClientConfig;
use crate::enums::{DepositStatus, KlineInterval, WithdrawalStatus};
use crate::errors::BinanceError;
use crate::models::*;
use crate::repository::ExchangeRepository;
use crate::signer::{RequestSigner, API_KEY_HEADER};

/// Spot REST paths.
pub mod endpoints {
    // Public
    pub const TIME: &str = "/api/v3/time";
    pub const DEPTH: &str = "/api/v3/depth";
    pub const TICKER_PRICE: &str = "/api/v3/ticker/price";
    pub const TICKER_24HR: &str = "/api/v3/ticker/24hr";
    pub const KLINES: &str = "/api/v3/klines";

    // Signed
    pub const ACCOUNT: &str = "/api/v3/account";
    pub const ORDER: &str = "/api/v3/order";
    pub const ALL_ORDERS: &str = "/api/v3/allOrders";
    pub const OPEN_ORDERS: &str = "/api/v3/openOrders";
    pub const WITHDRAW: &str = "/sapi/v1/capital/withdraw/apply";
    pub const DEPOSIT_HISTORY: &str = "/sapi/v1/capital/deposit/hisrec";
    pub const WITHDRAW_HISTORY: &str = "/sapi/v1/capital/withdraw/history";
    pub const DEPOSIT_ADDRESS: &str = "/sapi/v1/capital/deposit/address";
}

/// Form-encode `params` in order. The signature covers exactly this string.
pub fn encode_query(params: &[(&str, String)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

fn timestamp_ms() -> Result<u64, BinanceError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .map_err(|e| BinanceError::Other(format!("System clock before epoch: {e}")))
}

/// Low-level REST client for Binance spot.
#[derive(Debug, Clone)]
pub struct BinanceApi {
    client: Client,
    api_base: String,
    signer: Option<RequestSigner>,
    recv_window: Option<u64>,
}

impl BinanceApi {
    /// Create a new API client from `config`.
    ///
    /// Credentials are optional; without them only public endpoints work and
    /// signed calls fail with [`BinanceError::NotConfigured`].
    pub fn new(config: ClientConfig) -> Result<Self, BinanceError> {
        config.base_url()?;
        let signer = if config.is_configured() {
            match (&config.api_key, &config.api_secret) {
                (Some(key), Some(secret)) => Some(RequestSigner::new(key.trim(), secret.trim())),
                _ => None,
            }
        } else {
            None
        };
        Ok(Self {
            client: Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            signer,
            recv_window: config.recv_window,
        })
    }

    /// Parse an API response, turning the venue's `{"code", "msg"}` error
    /// body into [`BinanceError::Exchange`].
    async fn parse_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, BinanceError> {
        let status = response.status();
        let text = response.text().await?;
        let target_type = type_name::<T>();
        debug!(
            "api.parse_response status={} target_type={} body_len={}",
            status,
            target_type,
            text.len()
        );

        if !status.is_success() {
            debug!(
                "api.parse_response non_success status={} body={}",
                status, text
            );
            if let Ok(err) = serde_json::from_str::<serde_json::Value>(&text) {
                if let Some(code) = err.get("code").and_then(|c| c.as_i64()) {
                    let message = err
                        .get("msg")
                        .and_then(|m| m.as_str())
                        .unwrap_or("Unknown error");
                    return Err(BinanceError::exchange(code, message));
                }
            }
            return Err(BinanceError::HttpError(format!("HTTP {}: {}", status, text)));
        }

        match serde_json::from_str(&text) {
            Ok(parsed) => {
                debug!("api.parse_response decode_ok target_type={}", target_type);
                Ok(parsed)
            }
            Err(e) => {
                debug!(
                    "api.parse_response decode_failed target_type={} error={}",
                    target_type, e
                );
                Err(BinanceError::JsonError(format!(
                    "Failed to parse response: {e}\nBody: {}",
                    text.chars().take(500).collect::<String>()
                )))
            }
        }
    }

    async fn public_get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Vec<(&'static str, String)>,
    ) -> Result<T, BinanceError> {
        let query = encode_query(&params);
        let url = if query.is_empty() {
            format!("{}{}", self.api_base, path)
        } else {
            format!("{}{}?{}", self.api_base, path, query)
        };
        debug!("api.public_get path={} query={}", path, query);
        let resp = self.client.get(&url).send().await?;
        self.parse_response(resp).await
    }

    async fn signed<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        mut params: Vec<(&'static str, String)>,
    ) -> Result<T, BinanceError> {
        let signer = self.signer.as_ref().ok_or_else(|| {
            BinanceError::NotConfigured(format!("{path} requires an API key and secret"))
        })?;
        if let Some(window) = self.recv_window {
            params.push(("recvWindow", window.to_string()));
        }
        params.push(("timestamp", timestamp_ms()?.to_string()));
        let query = encode_query(&params);
        let signature = signer.sign(&query)?;
        let url = format!(
            "{}{}?{}&signature={}",
            self.api_base, path, query, signature
        );
        debug!(
            "api.signed method={} path={} param_count={}",
            method,
            path,
            params.len()
        );
        let resp = self
            .client
            .request(method, &url)
            .header(API_KEY_HEADER, signer.api_key())
            .send()
            .await?;
        self.parse_response(resp).await
    }
}

impl ExchangeRepository for BinanceApi {
    fn is_configured(&self) -> bool {
        self.signer.is_some()
    }

    // -----------------------------------------------------------------------
    // Account
    // -----------------------------------------------------------------------

    /// GET /api/v3/account
    async fn get_balance(&self) -> Result<Account, BinanceError> {
        debug!("api.get_balance");
        self.signed(Method::GET, endpoints::ACCOUNT, Vec::new())
            .await
    }

    /// Deposits and withdrawals merged, newest first. Both histories are
    /// fetched without a time range, so only the venue's default window
    /// (about 90 days) is covered.
    async fn get_transactions(&self) -> Result<Vec<Transaction>, BinanceError> {
        debug!("api.get_transactions");
        let deposits = self.get_deposit_history(HistoryQuery::all()).await?;
        let withdrawals = self.get_withdrawal_history(HistoryQuery::all()).await?;
        let mut transactions: Vec<Transaction> = deposits
            .into_iter()
            .map(Transaction::from)
            .chain(withdrawals.into_iter().map(Transaction::from))
            .collect();
        transactions.sort_by(|a, b| b.time.cmp(&a.time));
        Ok(transactions)
    }

    // -----------------------------------------------------------------------
    // Orders
    // -----------------------------------------------------------------------

    /// GET /api/v3/order
    async fn get_order(&self, symbol: &str, order_id: u64) -> Result<OrderResponse, BinanceError> {
        debug!("api.get_order symbol={} order_id={}", symbol, order_id);
        let params = vec![("symbol", symbol.to_string()), ("orderId", order_id.to_string())];
        self.signed(Method::GET, endpoints::ORDER, params).await
    }

    /// GET /api/v3/allOrders
    async fn get_orders(
        &self,
        symbol: &str,
        limit: u32,
    ) -> Result<Vec<OrderResponse>, BinanceError> {
        debug!("api.get_orders symbol={} limit={}", symbol, limit);
        let params = vec![("symbol", symbol.to_string()), ("limit", limit.to_string())];
        self.signed(Method::GET, endpoints::ALL_ORDERS, params).await
    }

    /// GET /api/v3/openOrders
    async fn get_open_orders(&self, symbol: &str) -> Result<Vec<OrderResponse>, BinanceError> {
        debug!("api.get_open_orders symbol={}", symbol);
        let params = vec![("symbol", symbol.to_string())];
        self.signed(Method::GET, endpoints::OPEN_ORDERS, params).await
    }

    /// POST /api/v3/order
    async fn place_order(&self, request: TradeRequest) -> Result<TradeResponse, BinanceError> {
        debug!(
            "api.place_order symbol={} side={} type={} quantity={} price={:?} stop_price={:?} time_in_force={:?}",
            request.symbol(),
            request.side(),
            request.order_type(),
            request.quantity(),
            request.price(),
            request.stop_price(),
            request.time_in_force()
        );
        self.signed(Method::POST, endpoints::ORDER, request.to_params())
            .await
    }

    /// DELETE /api/v3/order
    async fn cancel_order(&self, request: CancelRequest) -> Result<TradeResponse, BinanceError> {
        debug!(
            "api.cancel_order symbol={} order={:?}",
            request.symbol(),
            request.order()
        );
        self.signed(Method::DELETE, endpoints::ORDER, request.to_params())
            .await
    }

    // -----------------------------------------------------------------------
    // Market Data
    // -----------------------------------------------------------------------

    /// GET /api/v3/depth
    async fn get_order_book(&self, symbol: &str, limit: u32) -> Result<OrderBook, BinanceError> {
        debug!("api.get_order_book symbol={} limit={}", symbol, limit);
        let params = vec![("symbol", symbol.to_string()), ("limit", limit.to_string())];
        self.public_get(endpoints::DEPTH, params).await
    }

    /// GET /api/v3/ticker/price
    async fn get_tickers(&self, symbol: Option<&str>) -> Result<Vec<PriceTicker>, BinanceError> {
        debug!("api.get_tickers symbol={:?}", symbol);
        let params: Vec<(&'static str, String)> = symbol
            .map(|s| vec![("symbol", s.to_string())])
            .unwrap_or_default();
        let tickers: OneOrMany<PriceTicker> =
            self.public_get(endpoints::TICKER_PRICE, params).await?;
        Ok(tickers.into())
    }

    /// GET /api/v3/klines
    async fn get_candlesticks(
        &self,
        symbol: &str,
        interval: KlineInterval,
        limit: u32,
    ) -> Result<Vec<Candlestick>, BinanceError> {
        debug!(
            "api.get_candlesticks symbol={} interval={} limit={}",
            symbol, interval, limit
        );
        let params = vec![
            ("symbol", symbol.to_string()),
            ("interval", interval.as_str().to_string()),
            ("limit", limit.to_string()),
        ];
        self.public_get(endpoints::KLINES, params).await
    }

    /// GET /api/v3/ticker/24hr
    async fn get_24h_stats(&self, symbol: Option<&str>) -> Result<Vec<DayStats>, BinanceError> {
        debug!("api.get_24h_stats symbol={:?}", symbol);
        let params: Vec<(&'static str, String)> = symbol
            .map(|s| vec![("symbol", s.to_string())])
            .unwrap_or_default();
        let stats: OneOrMany<DayStats> = self.public_get(endpoints::TICKER_24HR, params).await?;
        Ok(stats.into())
    }

    /// GET /api/v3/time
    async fn get_server_time(&self) -> Result<i64, BinanceError> {
        debug!("api.get_server_time");
        let time: ServerTime = self.public_get(endpoints::TIME, Vec::new()).await?;
        Ok(time.server_time)
    }

    // -----------------------------------------------------------------------
    // Wallet
    // -----------------------------------------------------------------------

    /// POST /sapi/v1/capital/withdraw/apply
    async fn withdraw(&self, request: WithdrawRequest) -> Result<WithdrawResponse, BinanceError> {
        debug!(
            "api.withdraw asset={} amount={} has_tag={} has_name={}",
            request.asset,
            request.amount,
            request.address_tag.is_some(),
            request.name.is_some()
        );
        self.signed(Method::POST, endpoints::WITHDRAW, request.to_params())
            .await
    }

    /// GET /sapi/v1/capital/deposit/hisrec
    async fn get_deposit_history(
        &self,
        query: HistoryQuery<DepositStatus>,
    ) -> Result<Vec<DepositRecord>, BinanceError> {
        debug!("api.get_deposit_history query={:?}", query);
        self.signed(Method::GET, endpoints::DEPOSIT_HISTORY, query.to_params())
            .await
    }

    /// GET /sapi/v1/capital/withdraw/history
    async fn get_withdrawal_history(
        &self,
        query: HistoryQuery<WithdrawalStatus>,
    ) -> Result<Vec<WithdrawalRecord>, BinanceError> {
        debug!("api.get_withdrawal_history query={:?}", query);
        self.signed(Method::GET, endpoints::WITHDRAW_HISTORY, query.to_params())
            .await
    }

    /// GET /sapi/v1/capital/deposit/address
    async fn get_deposit_address(&self, asset: &str) -> Result<DepositAddress, BinanceError> {
        debug!("api.get_deposit_address asset={}", asset);
        let params = vec![("coin", asset.to_string())];
        self.signed(Method::GET, endpoints::DEPOSIT_ADDRESS, params)
            .await
    }
}
