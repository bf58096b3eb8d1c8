/// Quickstart for the Binance client.
///
/// Reads credentials from `BINANCE_API_KEY` / `BINANCE_API_SECRET`, checks the
/// account, then places and cancels a resting limit order on the testnet.
use binance_client::*;
use rust_decimal::Decimal;

const SYMBOL: &str = "BTCUSDT";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ClientConfig::from_env();
    config.api_base = Environment::Testnet.api_base().to_string();
    let client = BinanceClient::from_config(config)?;

    if !client.is_configured() {
        println!("No credentials found; set BINANCE_API_KEY and BINANCE_API_SECRET");
        return Ok(());
    }

    let account = client.get_balance().await?;
    for balance in account.balances.iter().filter(|b| !b.free.is_zero()) {
        println!("{}: free={} locked={}", balance.asset, balance.free, balance.locked);
    }

    // Rest well below the market so the order does not fill
    let last = client.get_tickers(Some(SYMBOL)).await?;
    let price = (last[0].price * Decimal::new(8, 1)).round_dp(2);

    // Validation happens before anything is sent
    match client
        .place_stop_loss_limit_order(
            SYMBOL,
            Side::Sell,
            Decimal::new(1, 3),
            price,
            Decimal::ZERO,
            TimeInForce::GoodTillCancelled,
        )
        .await
    {
        Err(e) if e.kind() == ErrorKind::Validation => println!("Rejected locally: {e}"),
        other => println!("Unexpected: {other:?}"),
    }

    let placed = client
        .place_limit_order(SYMBOL, Side::Buy, Decimal::new(1, 3), price, None)
        .await?;
    println!("Placed order {} at {price}", placed.order_id);

    let cancelled = client
        .cancel_order(CancelRequest::by_id(SYMBOL, placed.order_id))
        .await?;
    println!("Cancelled: {:?}", cancelled.status);

    Ok(())
}
