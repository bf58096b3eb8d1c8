#![allow(dead_code)]
/// Deterministic in-memory repository shared by the facade tests.
///
/// Every call is appended to a log as `"<method> <args>"` so tests can check
/// what reached the repository and what did not. Take the log handle with
/// [`StubRepository::call_log`] before moving the stub into a client.
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use rust_decimal_macros::dec;
use serde_json::json;

use binance_client::*;

pub const SERVER_TIME: i64 = 1_700_000_000_000;

/// Shared view of the calls a [`StubRepository`] has received.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    fn push(&self, call: String) {
        self.0.lock().unwrap().push(call);
    }
}

#[derive(Default)]
pub struct StubRepository {
    configured: bool,
    failure: Option<BinanceError>,
    calls: CallLog,
    cancelled: Mutex<HashSet<OrderRef>>,
}

impl StubRepository {
    pub fn new() -> Self {
        Self {
            configured: true,
            ..Self::default()
        }
    }

    pub fn unconfigured() -> Self {
        Self::default()
    }

    /// A repository whose every call fails with `error`.
    pub fn failing(error: BinanceError) -> Self {
        Self {
            configured: true,
            failure: Some(error),
            ..Self::default()
        }
    }

    pub fn call_log(&self) -> CallLog {
        self.calls.clone()
    }

    fn record(&self, call: String) -> Result<(), BinanceError> {
        self.calls.push(call);
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

/// Wrap `repository` in a client, keeping a handle on its call log.
pub fn stub_client(repository: StubRepository) -> (BinanceClient<StubRepository>, CallLog) {
    let log = repository.call_log();
    (BinanceClient::new(repository), log)
}

pub fn order_response(symbol: &str, order_id: u64) -> OrderResponse {
    serde_json::from_value(json!({
        "symbol": symbol,
        "orderId": order_id,
        "orderListId": -1,
        "clientOrderId": format!("stub-{order_id}"),
        "price": "100.00000000",
        "origQty": "1.00000000",
        "executedQty": "0.00000000",
        "cummulativeQuoteQty": "0.00000000",
        "status": "NEW",
        "timeInForce": "GTC",
        "type": "LIMIT",
        "side": "BUY",
        "stopPrice": "0.00000000",
        "icebergQty": "0.00000000",
        "time": 1_499_827_319_559i64,
        "updateTime": 1_499_827_319_559i64,
        "isWorking": true
    }))
    .unwrap()
}

pub fn trade_response(symbol: &str, order_id: u64, status: &str) -> TradeResponse {
    serde_json::from_value(json!({
        "symbol": symbol,
        "orderId": order_id,
        "orderListId": -1,
        "clientOrderId": format!("stub-{order_id}"),
        "transactTime": SERVER_TIME,
        "status": status
    }))
    .unwrap()
}

fn order_id_of(order: &OrderRef) -> u64 {
    match order {
        OrderRef::Id(id) => *id,
        OrderRef::ClientId(_) => 0,
    }
}

impl ExchangeRepository for StubRepository {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn get_balance(&self) -> Result<Account, BinanceError> {
        self.record("get_balance".to_string())?;
        Ok(Account {
            maker_commission: 10,
            taker_commission: 10,
            buyer_commission: 0,
            seller_commission: 0,
            can_trade: true,
            can_withdraw: true,
            can_deposit: true,
            update_time: SERVER_TIME,
            account_type: Some("SPOT".to_string()),
            balances: vec![Balance {
                asset: "BTC".to_string(),
                free: dec!(1.5),
                locked: dec!(0.25),
            }],
            permissions: vec!["SPOT".to_string()],
        })
    }

    async fn get_transactions(&self) -> Result<Vec<Transaction>, BinanceError> {
        self.record("get_transactions".to_string())?;
        Ok(vec![Transaction {
            kind: TransactionKind::Deposit,
            asset: "USDT".to_string(),
            amount: dec!(250),
            address: "0xabc".to_string(),
            tx_id: Some("0xdeadbeef".to_string()),
            status: 1,
            time: Some(SERVER_TIME),
        }])
    }

    async fn get_order(&self, symbol: &str, order_id: u64) -> Result<OrderResponse, BinanceError> {
        self.record(format!("get_order {symbol} {order_id}"))?;
        Ok(order_response(symbol, order_id))
    }

    async fn get_orders(
        &self,
        symbol: &str,
        limit: u32,
    ) -> Result<Vec<OrderResponse>, BinanceError> {
        self.record(format!("get_orders {symbol} {limit}"))?;
        Ok((1..=3).map(|id| order_response(symbol, id)).collect())
    }

    async fn get_open_orders(&self, symbol: &str) -> Result<Vec<OrderResponse>, BinanceError> {
        self.record(format!("get_open_orders {symbol}"))?;
        Ok(vec![order_response(symbol, 7)])
    }

    async fn get_order_book(&self, symbol: &str, limit: u32) -> Result<OrderBook, BinanceError> {
        self.record(format!("get_order_book {symbol} {limit}"))?;
        Ok(OrderBook {
            last_update_id: 1027024,
            bids: vec![BookLevel {
                price: dec!(4.00000000),
                quantity: dec!(431.00000000),
            }],
            asks: vec![BookLevel {
                price: dec!(4.00000200),
                quantity: dec!(12.00000000),
            }],
        })
    }

    async fn place_order(&self, request: TradeRequest) -> Result<TradeResponse, BinanceError> {
        let rendered: Vec<String> = request
            .to_params()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        self.record(format!("place_order {}", rendered.join("&")))?;
        Ok(trade_response(request.symbol(), 28, "NEW"))
    }

    async fn cancel_order(&self, request: CancelRequest) -> Result<TradeResponse, BinanceError> {
        self.record(format!(
            "cancel_order {} {:?}",
            request.symbol(),
            request.order()
        ))?;
        let first_cancel = self.cancelled.lock().unwrap().insert(request.order().clone());
        if first_cancel {
            Ok(trade_response(
                request.symbol(),
                order_id_of(request.order()),
                "CANCELED",
            ))
        } else {
            Err(BinanceError::exchange(-2011, "Unknown order sent."))
        }
    }

    async fn get_tickers(&self, symbol: Option<&str>) -> Result<Vec<PriceTicker>, BinanceError> {
        self.record(format!("get_tickers {symbol:?}"))?;
        let symbols = match symbol {
            Some(s) => vec![s.to_string()],
            None => vec!["BTCUSDT".to_string(), "ETHUSDT".to_string()],
        };
        Ok(symbols
            .into_iter()
            .map(|symbol| PriceTicker {
                symbol,
                price: dec!(42000.5),
            })
            .collect())
    }

    async fn get_candlesticks(
        &self,
        symbol: &str,
        interval: KlineInterval,
        limit: u32,
    ) -> Result<Vec<Candlestick>, BinanceError> {
        self.record(format!("get_candlesticks {symbol} {interval} {limit}"))?;
        Ok(vec![Candlestick {
            open_time: 1_499_040_000_000,
            open: dec!(0.01634790),
            high: dec!(0.80000000),
            low: dec!(0.01575800),
            close: dec!(0.01577100),
            volume: dec!(148976.11427815),
            close_time: 1_499_644_799_999,
            quote_volume: dec!(2434.19055334),
            trades: 308,
            taker_buy_base_volume: dec!(1756.87402397),
            taker_buy_quote_volume: dec!(28.46694368),
        }])
    }

    async fn get_24h_stats(&self, symbol: Option<&str>) -> Result<Vec<DayStats>, BinanceError> {
        self.record(format!("get_24h_stats {symbol:?}"))?;
        Ok(Vec::new())
    }

    async fn get_server_time(&self) -> Result<i64, BinanceError> {
        self.record("get_server_time".to_string())?;
        Ok(SERVER_TIME)
    }

    async fn withdraw(&self, request: WithdrawRequest) -> Result<WithdrawResponse, BinanceError> {
        self.record(format!(
            "withdraw {} {} {:?} {:?}",
            request.asset, request.amount, request.address_tag, request.name
        ))?;
        Ok(WithdrawResponse {
            id: format!("withdraw-{}", request.asset),
        })
    }

    async fn get_deposit_history(
        &self,
        query: HistoryQuery<DepositStatus>,
    ) -> Result<Vec<DepositRecord>, BinanceError> {
        self.record(format!("get_deposit_history {:?}", query.to_params()))?;
        Ok(Vec::new())
    }

    async fn get_withdrawal_history(
        &self,
        query: HistoryQuery<WithdrawalStatus>,
    ) -> Result<Vec<WithdrawalRecord>, BinanceError> {
        self.record(format!("get_withdrawal_history {:?}", query.to_params()))?;
        Ok(Vec::new())
    }

    async fn get_deposit_address(&self, asset: &str) -> Result<DepositAddress, BinanceError> {
        self.record(format!("get_deposit_address {asset}"))?;
        Ok(DepositAddress {
            address: "1HPn8Rx2y6nNSfagQBKy27GB99Vbzg89wv".to_string(),
            coin: asset.to_string(),
            tag: String::new(),
            url: None,
        })
    }
}
