//! Ticker-price tools backed by the Binance public API.
//!
//! Both tools deliberately swallow fetch failures into display text: the
//! model can only act on text, so transport errors and bad symbols come back
//! as formatted strings rather than errors.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::Tool;

/// How many tickers the top-prices report includes.
const TOP_N: usize = 10;

/// A single ticker as returned by the price API.
///
/// The price is kept as text; it is rendered, never computed with.
#[derive(Debug, Clone, Deserialize)]
pub struct Ticker {
    pub symbol: String,
    pub price: String,
}

fn ticker_price_url(base_url: &str) -> String {
    format!("{}/api/v3/ticker/price", base_url.trim_end_matches('/'))
}

/// Render the first `TOP_N` tickers, one `<symbol>: $<price>` line each,
/// in upstream order.
fn render_top_prices(tickers: &[Ticker]) -> String {
    tickers
        .iter()
        .take(TOP_N)
        .map(|t| format!("{}: ${}", t.symbol, t.price))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fetch the ticker list and render the top entries as a report string.
///
/// Any transport failure or non-2xx status becomes an error-formatted
/// string; this function never fails.
pub async fn fetch_top_prices(client: &reqwest::Client, base_url: &str) -> String {
    let result: Result<Vec<Ticker>, reqwest::Error> = async {
        client
            .get(ticker_price_url(base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
    .await;

    match result {
        Ok(tickers) => render_top_prices(&tickers),
        Err(e) => format!("❌ An error occurred: {}", e),
    }
}

/// Fetch the price of one symbol (case-insensitive input).
///
/// A non-200 status means the symbol is unknown; transport failures become
/// an error-formatted string. This function never fails.
pub async fn fetch_coin_price(client: &reqwest::Client, base_url: &str, symbol: &str) -> String {
    let symbol = symbol.to_uppercase();
    let url = format!(
        "{}?symbol={}",
        ticker_price_url(base_url),
        urlencoding::encode(&symbol)
    );

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return format!("❌ An error occurred: {}", e),
    };

    if response.status() != reqwest::StatusCode::OK {
        return format!("❌ Coin {} not found. Please check the symbol.", symbol);
    }

    match response.json::<Ticker>().await {
        Ok(ticker) => format!("🔎 Current price of {}: ${}", symbol, ticker.price),
        Err(e) => format!("❌ An error occurred: {}", e),
    }
}

/// Report the top cryptocurrency prices.
pub struct TopPrices {
    client: reqwest::Client,
    base_url: String,
}

impl TopPrices {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl Tool for TopPrices {
    fn name(&self) -> &str {
        "get_top_prices"
    }

    fn description(&self) -> &str {
        "Returns the current prices of the top 10 cryptocurrency trading pairs from Binance, one per line."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _args: Value) -> anyhow::Result<String> {
        Ok(fetch_top_prices(&self.client, &self.base_url).await)
    }
}

/// Look up the price of a specific trading pair.
pub struct CoinPrice {
    client: reqwest::Client,
    base_url: String,
}

impl CoinPrice {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl Tool for CoinPrice {
    fn name(&self) -> &str {
        "get_coin_price"
    }

    fn description(&self) -> &str {
        "Returns the current price of a specific trading pair like BTCUSDT from Binance."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "symbol": {
                    "type": "string",
                    "description": "Trading pair symbol, e.g. BTCUSDT or ETHUSDT"
                }
            },
            "required": ["symbol"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let symbol = args["symbol"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'symbol' argument"))?;

        Ok(fetch_coin_price(&self.client, &self.base_url, symbol).await)
    }
}
