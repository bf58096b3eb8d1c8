/// Tests for the REST repository using an in-process mock HTTP server.
///
/// The server answers each connection with one canned response chosen by
/// request path and records the raw request head, so signing and error
/// mapping can be checked without touching the network.
use std::sync::{Arc, Mutex};

use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use binance_client::api::{encode_query, BinanceApi};
use binance_client::signer::RequestSigner;
use binance_client::*;
use rust_decimal_macros::dec;

type Route = fn(&str) -> (u16, String);
type RequestLog = Arc<Mutex<Vec<String>>>;

/// Start a mock server; returns its base URL and the log of request heads.
async fn mock_server(route: Route) -> (String, RequestLog) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let requests = Arc::clone(&log);

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = match stream.read(&mut chunk).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => n,
                };
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let head = String::from_utf8_lossy(&buf).to_string();
            let path = head
                .split_whitespace()
                .nth(1)
                .unwrap_or("/")
                .split('?')
                .next()
                .unwrap_or("/")
                .to_string();
            requests.lock().unwrap().push(head);

            let (status, body) = route(&path);
            let reason = match status {
                200 => "OK",
                400 => "Bad Request",
                401 => "Unauthorized",
                _ => "Internal Server Error",
            };
            let response = format!(
                "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    (format!("http://{addr}"), log)
}

fn public_api(base: &str) -> BinanceApi {
    let mut config = ClientConfig::from_environment(Environment::Testnet);
    config.api_base = base.to_string();
    BinanceApi::new(config).unwrap()
}

fn signed_api(base: &str) -> BinanceApi {
    let mut config = ClientConfig::from_environment(Environment::Testnet)
        .with_credentials("test-key", "test-secret")
        .with_recv_window(5000);
    config.api_base = format!("{base}/");
    BinanceApi::new(config).unwrap()
}

fn ok(body: serde_json::Value) -> (u16, String) {
    (200, body.to_string())
}

fn request_target(head: &str) -> &str {
    head.split_whitespace().nth(1).unwrap()
}

// ---------------------------------------------------------------------------
// Public endpoints
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_server_time() {
    let (base, log) = mock_server(|path| match path {
        "/api/v3/time" => ok(json!({ "serverTime": 1499827319559i64 })),
        _ => (404, String::new()),
    })
    .await;

    let api = public_api(&base);
    assert_eq!(api.get_server_time().await.unwrap(), 1499827319559);

    let heads = log.lock().unwrap().clone();
    assert_eq!(heads.len(), 1);
    assert!(heads[0].starts_with("GET /api/v3/time HTTP/1.1"));
}

#[tokio::test]
async fn test_order_book_and_klines_decode() {
    let (base, log) = mock_server(|path| match path {
        "/api/v3/depth" => ok(json!({
            "lastUpdateId": 1027024,
            "bids": [["4.00000000", "431.00000000"]],
            "asks": [["4.00000200", "12.00000000"]]
        })),
        "/api/v3/klines" => ok(json!([[
            1499040000000i64, "0.01634790", "0.80000000", "0.01575800", "0.01577100",
            "148976.11427815", 1499644799999i64, "2434.19055334", 308,
            "1756.87402397", "28.46694368", "0"
        ]])),
        _ => (404, String::new()),
    })
    .await;

    let client = BinanceClient::new(public_api(&base));
    let book = client.get_order_book("BNBBTC", Some(5)).await.unwrap();
    assert_eq!(book.last_update_id, 1027024);
    assert_eq!(book.best_bid().unwrap().quantity, dec!(431));

    let candles = client
        .get_candlesticks("BNBBTC", KlineInterval::FifteenMinutes, None)
        .await
        .unwrap();
    assert_eq!(candles.len(), 1);
    assert_eq!(candles[0].trades, 308);
    assert_eq!(candles[0].close, dec!(0.01577100));

    let heads = log.lock().unwrap().clone();
    assert_eq!(request_target(&heads[0]), "/api/v3/depth?symbol=BNBBTC&limit=5");
    assert_eq!(
        request_target(&heads[1]),
        "/api/v3/klines?symbol=BNBBTC&interval=15m&limit=500"
    );
}

#[tokio::test]
async fn test_tickers_single_and_all() {
    let (base, _log) = mock_server(|path| match path {
        "/api/v3/ticker/price" => ok(json!({ "symbol": "LTCBTC", "price": "4.00000200" })),
        _ => (404, String::new()),
    })
    .await;
    let api = public_api(&base);
    let one = api.get_tickers(Some("LTCBTC")).await.unwrap();
    assert_eq!(one.len(), 1);
    assert_eq!(one[0].price, dec!(4.000002));

    let (base, log) = mock_server(|_| {
        ok(json!([
            { "symbol": "LTCBTC", "price": "4.00000200" },
            { "symbol": "ETHBTC", "price": "0.07946600" }
        ]))
    })
    .await;
    let api = public_api(&base);
    let all = api.get_tickers(None).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(
        request_target(&log.lock().unwrap()[0]),
        "/api/v3/ticker/price"
    );
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_error_body_maps_to_exchange_error() {
    let (base, _log) = mock_server(|_| {
        (400, json!({ "code": -1121, "msg": "Invalid symbol." }).to_string())
    })
    .await;

    let err = public_api(&base)
        .get_order_book("NOPE", 5)
        .await
        .unwrap_err();
    assert_eq!(err, BinanceError::exchange(-1121, "Invalid symbol."));
    assert_eq!(err.kind(), ErrorKind::Exchange);
}

#[tokio::test]
async fn test_non_json_error_maps_to_http_error() {
    let (base, _log) = mock_server(|_| (500, "upstream unavailable".to_string())).await;
    let err = public_api(&base).get_server_time().await.unwrap_err();
    match err {
        BinanceError::HttpError(message) => {
            assert!(message.contains("500"));
            assert!(message.contains("upstream unavailable"));
        }
        other => panic!("expected HttpError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_undecodable_body_maps_to_json_error() {
    let (base, _log) = mock_server(|_| ok(json!({ "unexpected": true }))).await;
    let err = public_api(&base).get_server_time().await.unwrap_err();
    assert!(matches!(err, BinanceError::JsonError(_)));
}

// ---------------------------------------------------------------------------
// Signed endpoints
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_signed_call_without_credentials_is_not_configured() {
    let (base, log) = mock_server(|_| ok(json!({}))).await;
    let api = public_api(&base);
    assert!(!api.is_configured());

    let err = api.get_balance().await.unwrap_err();
    assert!(matches!(err, BinanceError::NotConfigured(_)));
    assert_eq!(err.kind(), ErrorKind::Transport);

    let order = build_market_order("BTCUSDT", Side::Buy, dec!(1)).unwrap();
    assert!(matches!(
        api.place_order(order).await.unwrap_err(),
        BinanceError::NotConfigured(_)
    ));
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_place_order_is_signed() {
    let (base, log) = mock_server(|path| match path {
        "/api/v3/order" => ok(json!({
            "symbol": "BTCUSDT",
            "orderId": 28,
            "orderListId": -1,
            "clientOrderId": "6gCrw2kRUAF9CvJDGP16IP",
            "transactTime": 1507725176595i64,
            "price": "100.00000000",
            "origQty": "1.00000000",
            "executedQty": "0.00000000",
            "cummulativeQuoteQty": "0.00000000",
            "status": "NEW",
            "timeInForce": "GTC",
            "type": "LIMIT",
            "side": "BUY"
        })),
        _ => (404, String::new()),
    })
    .await;

    let api = signed_api(&base);
    assert!(api.is_configured());
    let request = build_limit_order("BTCUSDT", Side::Buy, dec!(1), dec!(100), None).unwrap();
    let response = api.place_order(request).await.unwrap();
    assert_eq!(response.order_id, 28);
    assert_eq!(response.time_in_force, Some(TimeInForce::GoodTillCancelled));
    assert_eq!(response.order_type, Some(OrderType::Limit));

    let head = log.lock().unwrap()[0].clone();
    assert!(head.starts_with("POST /api/v3/order?"));
    assert!(head.to_ascii_lowercase().contains("x-mbx-apikey: test-key"));

    let target = request_target(&head);
    let query = target.split_once('?').unwrap().1;
    let (payload, signature) = query.split_once("&signature=").unwrap();
    assert!(payload.starts_with(
        "symbol=BTCUSDT&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=100&recvWindow=5000&timestamp="
    ));
    let expected = RequestSigner::new("test-key", "test-secret")
        .sign(payload)
        .unwrap();
    assert_eq!(signature, expected);
}

#[tokio::test]
async fn test_cancel_uses_delete() {
    let (base, log) = mock_server(|_| {
        (400, json!({ "code": -2011, "msg": "Unknown order sent." }).to_string())
    })
    .await;
    let api = signed_api(&base);
    let err = api
        .cancel_order(CancelRequest::by_id("BTCUSDT", 28))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), Some(-2011));

    let head = log.lock().unwrap()[0].clone();
    assert!(head.starts_with("DELETE /api/v3/order?symbol=BTCUSDT&orderId=28&"));
}

#[tokio::test]
async fn test_transactions_merge_newest_first() {
    let (base, log) = mock_server(|path| match path {
        "/sapi/v1/capital/deposit/hisrec" => ok(json!([
            {
                "id": "769800519366885376",
                "amount": "0.00999800",
                "coin": "PAXG",
                "network": "ETH",
                "status": 1,
                "address": "0x788cabe9236ce061e5a892e1a59395a81fc8d62c",
                "addressTag": "",
                "txId": "0xaad4654a3234aa6118af9b4b335f5ae81c360b2394721c019b5d1e75328b09f3",
                "insertTime": 1599621997000i64,
                "confirmTimes": "12/12"
            }
        ])),
        "/sapi/v1/capital/withdraw/history" => ok(json!([
            {
                "id": "b6ae22b3aa844210a7041aee7589627c",
                "amount": "8.91000000",
                "transactionFee": "0.004",
                "coin": "USDT",
                "status": 6,
                "address": "0x94df8b352de7f46f64b01d3666bf6e936e44ce60",
                "txId": "0xb5ef8c13b968a406cc62a93a8bd80f9e9a906ef1b3fcf20a2e48573c17659268",
                "applyTime": "2020-09-12 02:46:40",
                "network": "ETH"
            }
        ])),
        _ => (404, String::new()),
    })
    .await;

    let transactions = signed_api(&base).get_transactions().await.unwrap();
    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0].kind, TransactionKind::Withdrawal);
    assert_eq!(transactions[0].time, Some(1599878800000));
    assert_eq!(transactions[0].amount, dec!(8.91));
    assert_eq!(transactions[1].kind, TransactionKind::Deposit);
    assert_eq!(transactions[1].asset, "PAXG");

    let heads = log.lock().unwrap().clone();
    assert_eq!(heads.len(), 2);
    assert!(heads[0].starts_with("GET /sapi/v1/capital/deposit/hisrec?recvWindow=5000&timestamp="));
}

#[test]
fn test_encode_query_escapes_values() {
    let query = encode_query(&[
        ("symbol", "BTCUSDT".to_string()),
        ("name", "cold wallet & more".to_string()),
    ]);
    assert_eq!(query, "symbol=BTCUSDT&name=cold+wallet+%26+more");
}
