use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json;

use crate::models::{CmcResponse, Quote};

const QUOTES_URL: &str = "https://pro-api.coinmarketcap.com/v1/cryptocurrency/quotes/latest";

/// Narrow seam over the quote provider so the calculation flow can be
/// exercised with a stub instead of the live endpoint.
#[async_trait]
pub trait PriceSource {
    async fn get_quote(&self, symbol: &str) -> Result<Quote>;
}

pub struct CmcClient {
    client: Client,
    api_key: String,
}

impl CmcClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl PriceSource for CmcClient {
    async fn get_quote(&self, symbol: &str) -> Result<Quote> {
        if symbol.is_empty() {
            anyhow::bail!("symbol empty");
        }

        let response = self
            .client
            .get(QUOTES_URL)
            .query(&[("symbol", symbol), ("convert", "USD")])
            .header("X-CMC_PRO_API_KEY", &self.api_key)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        let text = response.text().await.context("Failed to get response text")?;

        if !status.is_success() {
            anyhow::bail!("API request failed: {} - {}", status, text);
        }

        extract_quote(&text, symbol)
    }
}

/// Pulls the USD quote for `symbol` out of a raw quotes-endpoint body.
/// A price of zero or below is not a usable quote and is rejected here.
pub fn extract_quote(text: &str, symbol: &str) -> Result<Quote> {
    let parsed: CmcResponse =
        serde_json::from_str(text).context("Failed to parse quotes response")?;

    if let Some(status) = &parsed.status {
        if status.error_code != 0 {
            anyhow::bail!(
                "Quote API error {}: {}",
                status.error_code,
                status.error_message.as_deref().unwrap_or("unknown error")
            );
        }
    }

    let data = parsed
        .data
        .get(symbol)
        .with_context(|| format!("No data returned for {}", symbol))?;

    let usd = data
        .quote
        .get("USD")
        .with_context(|| format!("No USD quote returned for {}", symbol))?;

    let price = usd
        .price
        .with_context(|| format!("No price in USD quote for {}", symbol))?;

    if price <= 0.0 {
        anyhow::bail!("Non-positive price {} returned for {}", price, symbol);
    }

    Ok(Quote {
        symbol: data.symbol.clone(),
        price_usd: price,
        last_updated: usd.last_updated.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quote_body(symbol: &str, price: f64) -> String {
        format!(
            r#"{{
                "status": {{"timestamp": "2025-01-24T10:00:00.000Z", "error_code": 0, "error_message": null}},
                "data": {{
                    "{symbol}": {{
                        "id": 2,
                        "name": "Litecoin",
                        "symbol": "{symbol}",
                        "quote": {{
                            "USD": {{"price": {price}, "volume_24h": 350945354.7, "last_updated": "2025-01-24T10:00:00.000Z"}}
                        }}
                    }}
                }}
            }}"#
        )
    }

    #[test]
    fn test_extract_quote() {
        let quote = extract_quote(&quote_body("LTC", 62.5), "LTC").unwrap();
        assert_eq!(quote.symbol, "LTC");
        assert_relative_eq!(quote.price_usd, 62.5, epsilon = 1e-9);
        assert_eq!(
            quote.last_updated.as_deref(),
            Some("2025-01-24T10:00:00.000Z")
        );
    }

    #[test]
    fn test_extract_quote_missing_symbol() {
        // Response carries data for a different ticker than the one requested
        let result = extract_quote(&quote_body("LTC", 62.5), "XMR");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("No data returned"));
    }

    #[test]
    fn test_extract_quote_missing_price() {
        let body = r#"{
            "status": {"error_code": 0, "error_message": null},
            "data": {"TRX": {"symbol": "TRX", "quote": {"USD": {"last_updated": "2025-01-24T10:00:00.000Z"}}}}
        }"#;
        let result = extract_quote(body, "TRX");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("No price in USD quote"));
    }

    #[test]
    fn test_extract_quote_api_error_envelope() {
        let body = r#"{
            "status": {"error_code": 1001, "error_message": "This API Key is invalid."},
            "data": {}
        }"#;
        let result = extract_quote(body, "LTC");
        assert!(result.is_err());
        let message = result.unwrap_err().to_string();
        assert!(message.contains("1001"));
        assert!(message.contains("This API Key is invalid."));
    }

    #[test]
    fn test_extract_quote_non_positive_price() {
        let result = extract_quote(&quote_body("LTC", 0.0), "LTC");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Non-positive price"));

        let result = extract_quote(&quote_body("LTC", -1.25), "LTC");
        assert!(result.is_err());
    }

    #[test]
    fn test_extract_quote_malformed_json() {
        let result = extract_quote("not json at all", "LTC");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to parse quotes response"));
    }
}
