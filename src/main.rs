mod api;
mod config;
mod convert;
mod models;
mod tui;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::Parser;
use dotenvy::dotenv;
use std::env;

use crate::api::{CmcClient, PriceSource};
use crate::config::{Config, CurrencyEntry};
use crate::models::Quote;

#[derive(Parser, Debug)]
#[command(name = "cryptocalc-rs", about = "Fee-adjusted crypto payment calculator")]
struct Cli {
    /// USD amount to convert; invalid values fall back to the default
    #[arg(long)]
    amount: Option<String>,

    /// Catalog ticker to use directly, skipping the interactive menu
    #[arg(long)]
    symbol: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    let config = Config::default();

    let (mut usd_amount, warning) = convert::resolve_amount(cli.amount.as_deref());
    if let Some(warning) = &warning {
        eprintln!("⚠️  {}", warning);
    }
    // The amount is only locked when the flag supplied a usable value
    let amount_fixed = cli.amount.is_some() && warning.is_none();

    let entry = match cli.symbol.as_deref() {
        Some(symbol) => {
            let known = config
                .currencies
                .iter()
                .map(|c| c.symbol.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            config
                .by_symbol(symbol)
                .with_context(|| format!("Unknown ticker {} (expected one of: {})", symbol, known))?
                .clone()
        }
        None => match select_currency(&config, usd_amount, amount_fixed)? {
            Some((entry, typed)) => {
                if !amount_fixed {
                    let typed = typed.trim();
                    let (resolved, typed_warning) =
                        convert::resolve_amount((!typed.is_empty()).then_some(typed));
                    if let Some(warning) = &typed_warning {
                        eprintln!("⚠️  {}", warning);
                    }
                    usd_amount = resolved;
                }
                entry
            }
            None => {
                println!("Exiting...");
                return Ok(());
            }
        },
    };

    let api_key = env::var("COINMARKETCAP_API_KEY").expect("COINMARKETCAP_API_KEY must be set");
    let client = CmcClient::new(api_key);

    println!("\nFetching the spot price for {} ⌛️", entry.symbol);
    match fetch_and_convert(&client, &entry.symbol, usd_amount).await {
        Ok((quote, quantity)) => print_payment(&entry, &quote, quantity),
        Err(e) => eprintln!("Error fetching price for {}: {:#}", entry.symbol, e),
    }

    Ok(())
}

fn select_currency(
    config: &Config,
    usd_amount: f64,
    amount_fixed: bool,
) -> Result<Option<(CurrencyEntry, String)>> {
    let options: Vec<String> = config
        .currencies
        .iter()
        .map(|c| format!("{} ({})", c.name, c.symbol))
        .collect();
    let prefill = if amount_fixed {
        format!("{:.2}", usd_amount)
    } else {
        format!("{}", usd_amount)
    };

    let selected = tui::start_tui(options, prefill, !amount_fixed)?;
    Ok(selected.map(|(index, typed)| (config.currencies[index].clone(), typed)))
}

async fn fetch_and_convert<P: PriceSource>(
    source: &P,
    symbol: &str,
    usd_amount: f64,
) -> Result<(Quote, f64)> {
    let quote = source.get_quote(symbol).await?;
    let quantity = convert::convert(usd_amount, quote.price_usd);
    Ok((quote, quantity))
}

fn print_payment(entry: &CurrencyEntry, quote: &Quote, quantity: f64) {
    print!("✅ 1 {} = {:.2} USD", quote.symbol, quote.price_usd);
    if let Some(updated) = quote.last_updated.as_deref() {
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(updated) {
            print!(
                " (as of {})",
                timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
            );
        }
    }
    println!();

    println!("\nTotal Amount");
    println!("{}", convert::format_quantity(quantity, &entry.symbol));
    println!("\nPayment Address");
    println!("{}", entry.address);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubPriceSource {
        price: f64,
    }

    #[async_trait::async_trait]
    impl PriceSource for StubPriceSource {
        async fn get_quote(&self, symbol: &str) -> Result<Quote> {
            if self.price <= 0.0 {
                anyhow::bail!("Non-positive price {} returned for {}", self.price, symbol);
            }
            Ok(Quote {
                symbol: symbol.to_string(),
                price_usd: self.price,
                last_updated: None,
            })
        }
    }

    #[tokio::test]
    async fn test_calculate_ltc_payment() -> Result<()> {
        let config = Config::default();
        let entry = config.by_symbol("LTC").unwrap();
        let source = StubPriceSource { price: 62.50 };

        let (quote, quantity) = fetch_and_convert(&source, &entry.symbol, 5.0).await?;
        assert_eq!(quote.symbol, "LTC");
        assert_eq!(
            convert::format_quantity(quantity, &entry.symbol),
            "0.08400000 LTC"
        );
        assert_eq!(entry.address, "ltc1q2y4xh62xe39c8hsljzavdj0ccwjqmjj736g0t8");

        Ok(())
    }

    #[tokio::test]
    async fn test_unavailable_price_aborts_calculation() {
        let source = StubPriceSource { price: 0.0 };
        let result = fetch_and_convert(&source, "LTC", 5.0).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_amount_flag_overrides_default() -> Result<()> {
        let source = StubPriceSource { price: 62.50 };
        let (usd_amount, warning) = convert::resolve_amount(Some("10"));
        assert!(warning.is_none());

        let (_, quantity) = fetch_and_convert(&source, "LTC", usd_amount).await?;
        assert_eq!(convert::format_quantity(quantity, "LTC"), "0.16800000 LTC");

        Ok(())
    }
}
