use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// A single USD spot price as shown to the user.
#[derive(Debug, Clone)]
pub struct Quote {
    pub symbol: String,
    pub price_usd: f64,
    pub last_updated: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CmcResponse {
    pub status: Option<CmcStatus>,
    #[serde(default)]
    pub data: HashMap<String, CmcCryptoData>,
}

#[derive(Debug, Deserialize)]
pub struct CmcStatus {
    #[serde(rename = "error_code", default)]
    pub error_code: i64,
    #[serde(rename = "error_message")]
    pub error_message: Option<String>,
    // Add catch-all for other fields we don't care about
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct CmcCryptoData {
    pub symbol: String,
    pub name: Option<String>,
    #[serde(default)]
    pub quote: HashMap<String, CmcQuote>,
    // Add catch-all for other fields we don't care about
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct CmcQuote {
    pub price: Option<f64>,
    #[serde(rename = "last_updated")]
    pub last_updated: Option<String>,
    // Add catch-all for other fields we don't care about
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}
