// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

/// Fixed 5% markup applied on top of the raw conversion.
pub const SURCHARGE_MULTIPLIER: f64 = 1.05;

/// USD amount used when the caller supplies nothing usable.
pub const DEFAULT_USD_AMOUNT: f64 = 5.0;

/// Convert a USD amount into a crypto quantity at the given unit price,
/// surcharge included. Pure function, both inputs must be positive.
pub fn convert(usd_amount: f64, unit_price: f64) -> f64 {
    (usd_amount / unit_price) * SURCHARGE_MULTIPLIER
}

/// Render a quantity with exactly 8 fractional digits, whatever the
/// currency's actual divisibility.
pub fn format_quantity(quantity: f64, symbol: &str) -> String {
    format!("{:.8} {}", quantity, symbol)
}

/// Ordered fallback chain for the USD amount: explicit argument first,
/// then the hard-coded default. An argument that does not parse as a
/// positive finite number yields the default plus a warning.
pub fn resolve_amount(arg: Option<&str>) -> (f64, Option<String>) {
    match arg {
        Some(raw) => match raw.trim().parse::<f64>() {
            Ok(amount) if amount > 0.0 && amount.is_finite() => (amount, None),
            _ => (
                DEFAULT_USD_AMOUNT,
                Some(format!(
                    "Invalid amount {:?}, falling back to {} USD",
                    raw, DEFAULT_USD_AMOUNT
                )),
            ),
        },
        None => (DEFAULT_USD_AMOUNT, None),
    }
}
