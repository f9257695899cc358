use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyEntry {
    pub name: String,
    pub symbol: String,
    pub address: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub currencies: Vec<CurrencyEntry>,
}

impl Default for Config {
    fn default() -> Self {
        // Try to read from config.toml first
        if let Ok(config) = load_config() {
            return config;
        }

        // Fallback to hardcoded defaults
        Self {
            currencies: vec![
                CurrencyEntry {
                    name: "Litecoin".to_string(),
                    symbol: "LTC".to_string(),
                    address: "ltc1q2y4xh62xe39c8hsljzavdj0ccwjqmjj736g0t8".to_string(),
                },
                CurrencyEntry {
                    name: "Tron".to_string(),
                    symbol: "TRX".to_string(),
                    address: "TPHK7t5AmBLPaKHxTiygH8e8CrSmpetUjM".to_string(),
                },
                CurrencyEntry {
                    name: "Monero".to_string(),
                    symbol: "XMR".to_string(),
                    address: "88amiwvnVgC89AFUHAvxTm1628cquTfX3Np1S88Y1H6rKXXBzo58dn68pyDvoW5T3UArt9iouuKYyfPHLcn2vi3A6xHQiBN".to_string(),
                },
            ],
        }
    }
}

impl Config {
    /// Look up a catalog entry by its display name.
    pub fn by_name(&self, name: &str) -> Option<&CurrencyEntry> {
        self.currencies.iter().find(|c| c.name == name)
    }

    /// Look up a catalog entry by ticker symbol, case-insensitive.
    pub fn by_symbol(&self, symbol: &str) -> Option<&CurrencyEntry> {
        self.currencies
            .iter()
            .find(|c| c.symbol.eq_ignore_ascii_case(symbol))
    }
}

fn get_config_path() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("config.toml");
    path
}

fn read_config(path: &Path) -> anyhow::Result<Config> {
    let config_str = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}

fn write_config(path: &Path, config: &Config) -> anyhow::Result<()> {
    let config_str = toml::to_string_pretty(config)?;
    fs::write(path, config_str)?;
    Ok(())
}

pub fn load_config() -> anyhow::Result<Config> {
    read_config(&get_config_path())
}

pub fn save_config(config: &Config) -> anyhow::Result<()> {
    write_config(&get_config_path(), config)
}
