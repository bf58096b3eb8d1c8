/// Market data with the blocking client.
///
/// No credentials needed; everything here hits public endpoints.
use binance_client::blocking::BinanceClient;
use binance_client::{Environment, KlineInterval};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = BinanceClient::public(Environment::Production)?;
    let symbol = std::env::args().nth(1).unwrap_or_else(|| "BTCUSDT".to_string());

    let server_time = client.get_server_time()?;
    println!("Server time: {server_time}");

    let book = client.get_order_book(&symbol, Some(5))?;
    println!("Top of book for {symbol}:");
    for (bid, ask) in book.bids.iter().zip(book.asks.iter()) {
        println!("  {:>16} {:>12} | {:<16} {:<12}", bid.quantity, bid.price, ask.price, ask.quantity);
    }

    let stats = client.get_24h_stats(Some(&symbol))?;
    if let Some(day) = stats.first() {
        println!(
            "24h: last={} change={}% high={} low={} volume={}",
            day.last_price, day.price_change_percent, day.high_price, day.low_price, day.volume
        );
    }

    let candles = client.get_candlesticks(&symbol, KlineInterval::OneHour, Some(6))?;
    println!("Last {} hourly candles:", candles.len());
    for c in candles {
        println!("  {} o={} h={} l={} c={}", c.open_time, c.open, c.high, c.low, c.close);
    }

    Ok(())
}
