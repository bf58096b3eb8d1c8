/// Data models for Binance spot API requests and responses.
///
/// Responses are passed back to the caller unchanged; the client does not
/// interpret them. Prices and quantities use [`rust_decimal::Decimal`], which
/// the venue sends as JSON strings.
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::enums::{DepositStatus, OrderType, Side, TimeInForce, WithdrawalStatus};

/// Binance returns either one object or an array depending on whether a
/// symbol was given. Normalise both shapes to a `Vec`.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

// ---------------------------------------------------------------------------
// Cancel
// ---------------------------------------------------------------------------

/// How an existing order is identified.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrderRef {
    /// Exchange-assigned `orderId`.
    Id(u64),
    /// Caller-assigned `origClientOrderId`.
    ClientId(String),
}

/// Request to cancel one order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CancelRequest {
    symbol: String,
    order: OrderRef,
}

impl CancelRequest {
    pub fn by_id(symbol: impl Into<String>, order_id: u64) -> Self {
        Self {
            symbol: symbol.into(),
            order: OrderRef::Id(order_id),
        }
    }

    pub fn by_client_id(symbol: impl Into<String>, client_order_id: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            order: OrderRef::ClientId(client_order_id.into()),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn order(&self) -> &OrderRef {
        &self.order
    }

    /// Wire parameters for `DELETE /api/v3/order`.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let id = match &self.order {
            OrderRef::Id(id) => ("orderId", id.to_string()),
            OrderRef::ClientId(id) => ("origClientOrderId", id.clone()),
        };
        vec![("symbol", self.symbol.clone()), id]
    }
}

// ---------------------------------------------------------------------------
// Wallet requests
// ---------------------------------------------------------------------------

/// Request body for `POST /sapi/v1/capital/withdraw/apply`.
///
/// `address_tag` (memo) and `name` (address-book description) are optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawRequest {
    pub asset: String,
    pub address: String,
    pub amount: Decimal,
    pub address_tag: Option<String>,
    pub name: Option<String>,
}

impl WithdrawRequest {
    pub fn new(asset: impl Into<String>, address: impl Into<String>, amount: Decimal) -> Self {
        Self {
            asset: asset.into(),
            address: address.into(),
            amount,
            address_tag: None,
            name: None,
        }
    }

    pub fn with_address_tag(mut self, tag: impl Into<String>) -> Self {
        self.address_tag = Some(tag.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("coin", self.asset.clone()),
            ("address", self.address.clone()),
        ];
        if let Some(tag) = &self.address_tag {
            params.push(("addressTag", tag.clone()));
        }
        params.push(("amount", self.amount.normalize().to_string()));
        if let Some(name) = &self.name {
            params.push(("name", name.clone()));
        }
        params
    }
}

/// Filter for deposit/withdrawal history queries.
///
/// The default query sets no filters. With no `startTime`/`endTime` the venue
/// only returns its default window, roughly the last 90 days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryQuery<S> {
    pub asset: Option<String>,
    pub status: Option<S>,
    pub start_time: Option<u64>,
    pub end_time: Option<u64>,
}

impl<S> Default for HistoryQuery<S> {
    fn default() -> Self {
        Self {
            asset: None,
            status: None,
            start_time: None,
            end_time: None,
        }
    }
}

impl<S> HistoryQuery<S> {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn asset(mut self, asset: impl Into<String>) -> Self {
        self.asset = Some(asset.into());
        self
    }

    pub fn status(mut self, status: S) -> Self {
        self.status = Some(status);
        self
    }

    /// Restrict to `[start_ms, end_ms]`, both epoch milliseconds.
    pub fn between(mut self, start_ms: u64, end_ms: u64) -> Self {
        self.start_time = Some(start_ms);
        self.end_time = Some(end_ms);
        self
    }
}

impl HistoryQuery<DepositStatus> {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        history_params(self, |s| s.as_str())
    }
}

impl HistoryQuery<WithdrawalStatus> {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        history_params(self, |s| s.as_str())
    }
}

fn history_params<S>(
    query: &HistoryQuery<S>,
    status_str: impl Fn(&S) -> &'static str,
) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(asset) = &query.asset {
        params.push(("coin", asset.clone()));
    }
    if let Some(status) = &query.status {
        params.push(("status", status_str(status).to_string()));
    }
    if let Some(start) = query.start_time {
        params.push(("startTime", start.to_string()));
    }
    if let Some(end) = query.end_time {
        params.push(("endTime", end.to_string()));
    }
    params
}

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

/// Asset balance within an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub asset: String,
    pub free: Decimal,
    pub locked: Decimal,
}

/// Response from `GET /api/v3/account`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(default)]
    pub maker_commission: i64,
    #[serde(default)]
    pub taker_commission: i64,
    #[serde(default)]
    pub buyer_commission: i64,
    #[serde(default)]
    pub seller_commission: i64,
    pub can_trade: bool,
    pub can_withdraw: bool,
    pub can_deposit: bool,
    #[serde(default)]
    pub update_time: i64,
    #[serde(default)]
    pub account_type: Option<String>,
    pub balances: Vec<Balance>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl Account {
    /// Balance for `asset`, if the account lists it.
    pub fn balance(&self, asset: &str) -> Option<&Balance> {
        self.balances.iter().find(|b| b.asset == asset)
    }
}

/// Direction of a wallet transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

/// A deposit or withdrawal on the account, newest first when listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub kind: TransactionKind,
    pub asset: String,
    pub amount: Decimal,
    pub address: String,
    pub tx_id: Option<String>,
    /// Raw venue status code; see [`DepositStatus::from_code`] and
    /// [`WithdrawalStatus::from_code`].
    pub status: u8,
    /// Epoch milliseconds, when the venue reported a parseable time.
    pub time: Option<i64>,
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

/// Order record from `GET /api/v3/order`, `/allOrders` and `/openOrders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub symbol: String,
    pub order_id: u64,
    #[serde(default)]
    pub order_list_id: i64,
    pub client_order_id: String,
    pub price: Decimal,
    pub orig_qty: Decimal,
    pub executed_qty: Decimal,
    #[serde(default)]
    pub cummulative_quote_qty: Option<Decimal>,
    pub status: String,
    pub time_in_force: TimeInForce,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub side: Side,
    #[serde(default)]
    pub stop_price: Option<Decimal>,
    #[serde(default)]
    pub iceberg_qty: Option<Decimal>,
    #[serde(default)]
    pub time: i64,
    #[serde(default)]
    pub update_time: i64,
    #[serde(default)]
    pub is_working: bool,
}

/// A fill reported with a FULL new-order response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fill {
    pub price: Decimal,
    pub qty: Decimal,
    pub commission: Decimal,
    pub commission_asset: String,
    #[serde(default)]
    pub trade_id: Option<u64>,
}

/// Response from `POST /api/v3/order` and `DELETE /api/v3/order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeResponse {
    pub symbol: String,
    pub order_id: u64,
    #[serde(default)]
    pub order_list_id: i64,
    pub client_order_id: String,
    /// Set on cancel responses.
    #[serde(default)]
    pub orig_client_order_id: Option<String>,
    /// Set on new-order responses.
    #[serde(default)]
    pub transact_time: Option<i64>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub orig_qty: Option<Decimal>,
    #[serde(default)]
    pub executed_qty: Option<Decimal>,
    #[serde(default)]
    pub cummulative_quote_qty: Option<Decimal>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub time_in_force: Option<TimeInForce>,
    #[serde(default, rename = "type")]
    pub order_type: Option<OrderType>,
    #[serde(default)]
    pub side: Option<Side>,
    #[serde(default)]
    pub fills: Vec<Fill>,
}

// ---------------------------------------------------------------------------
// Market data
// ---------------------------------------------------------------------------

/// One price level. The venue encodes it as `["price", "qty"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookLevel {
    pub price: Decimal,
    pub quantity: Decimal,
}

/// Response from `GET /api/v3/depth`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBook {
    pub last_update_id: u64,
    pub bids: Vec<BookLevel>,
    pub asks: Vec<BookLevel>,
}

impl OrderBook {
    pub fn best_bid(&self) -> Option<&BookLevel> {
        self.bids.first()
    }

    pub fn best_ask(&self) -> Option<&BookLevel> {
        self.asks.first()
    }
}

/// Latest price for a symbol from `GET /api/v3/ticker/price`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTicker {
    pub symbol: String,
    pub price: Decimal,
}

/// Rolling 24-hour statistics from `GET /api/v3/ticker/24hr`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayStats {
    pub symbol: String,
    pub price_change: Decimal,
    pub price_change_percent: Decimal,
    pub weighted_avg_price: Decimal,
    #[serde(default)]
    pub prev_close_price: Option<Decimal>,
    pub last_price: Decimal,
    #[serde(default)]
    pub last_qty: Option<Decimal>,
    #[serde(default)]
    pub bid_price: Option<Decimal>,
    #[serde(default)]
    pub ask_price: Option<Decimal>,
    pub open_price: Decimal,
    pub high_price: Decimal,
    pub low_price: Decimal,
    pub volume: Decimal,
    pub quote_volume: Decimal,
    pub open_time: i64,
    pub close_time: i64,
    #[serde(default)]
    pub first_id: i64,
    #[serde(default)]
    pub last_id: i64,
    #[serde(default)]
    pub count: u64,
}

/// One kline from `GET /api/v3/klines`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candlestick {
    pub open_time: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
    pub close_time: i64,
    pub quote_volume: Decimal,
    pub trades: u64,
    pub taker_buy_base_volume: Decimal,
    pub taker_buy_quote_volume: Decimal,
}

type RawKline = (
    i64,
    Decimal,
    Decimal,
    Decimal,
    Decimal,
    Decimal,
    i64,
    Decimal,
    u64,
    Decimal,
    Decimal,
    serde_json::Value,
);

impl<'de> Deserialize<'de> for Candlestick {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (
            open_time,
            open,
            high,
            low,
            close,
            volume,
            close_time,
            quote_volume,
            trades,
            taker_buy_base_volume,
            taker_buy_quote_volume,
            _,
        ) = RawKline::deserialize(deserializer)?;
        Ok(Self {
            open_time,
            open,
            high,
            low,
            close,
            volume,
            close_time,
            quote_volume,
            trades,
            taker_buy_base_volume,
            taker_buy_quote_volume,
        })
    }
}

/// Response from `GET /api/v3/time`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ServerTime {
    pub server_time: i64,
}

// ---------------------------------------------------------------------------
// Wallet responses
// ---------------------------------------------------------------------------

/// Response from `POST /sapi/v1/capital/withdraw/apply`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawResponse {
    pub id: String,
}

/// Entry from `GET /sapi/v1/capital/deposit/hisrec`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub amount: Decimal,
    pub coin: String,
    #[serde(default)]
    pub network: Option<String>,
    pub status: u8,
    pub address: String,
    #[serde(default)]
    pub address_tag: Option<String>,
    #[serde(default)]
    pub tx_id: Option<String>,
    pub insert_time: i64,
    #[serde(default)]
    pub confirm_times: Option<String>,
}

impl DepositRecord {
    pub fn status(&self) -> Option<DepositStatus> {
        DepositStatus::from_code(self.status)
    }
}

/// Entry from `GET /sapi/v1/capital/withdraw/history`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalRecord {
    pub id: String,
    pub amount: Decimal,
    #[serde(default)]
    pub transaction_fee: Option<Decimal>,
    pub coin: String,
    pub status: u8,
    pub address: String,
    #[serde(default)]
    pub address_tag: Option<String>,
    #[serde(default)]
    pub tx_id: Option<String>,
    /// UTC, formatted `YYYY-MM-DD HH:MM:SS`.
    pub apply_time: String,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub info: Option<String>,
}

impl WithdrawalRecord {
    pub fn status(&self) -> Option<WithdrawalStatus> {
        WithdrawalStatus::from_code(self.status)
    }

    /// `apply_time` as epoch milliseconds.
    pub fn apply_time_ms(&self) -> Option<i64> {
        chrono::NaiveDateTime::parse_from_str(&self.apply_time, "%Y-%m-%d %H:%M:%S")
            .ok()
            .map(|t| t.and_utc().timestamp_millis())
    }
}

/// Response from `GET /sapi/v1/capital/deposit/address`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositAddress {
    pub address: String,
    pub coin: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl From<DepositRecord> for Transaction {
    fn from(record: DepositRecord) -> Self {
        Self {
            kind: TransactionKind::Deposit,
            asset: record.coin,
            amount: record.amount,
            address: record.address,
            tx_id: record.tx_id,
            status: record.status,
            time: Some(record.insert_time),
        }
    }
}

impl From<WithdrawalRecord> for Transaction {
    fn from(record: WithdrawalRecord) -> Self {
        let time = record.apply_time_ms();
        Self {
            kind: TransactionKind::Withdrawal,
            asset: record.coin,
            amount: record.amount,
            address: record.address,
            tx_id: record.tx_id,
            status: record.status,
            time,
        }
    }
}
