// src/config.rs
use anyhow::{Result, bail};
use config::{Config as Loader, Environment, File};
use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::cli::Cli;

/// Откуда берём сделки на день поставки
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")] // В TOML пишем "simulated" или "file"
pub enum TradeSourceKind {
    Simulated,
    File,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    // Отчёт
    #[serde(default = "default_folder_path")]
    pub folder_path: String,
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u64,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    #[serde(default = "default_single_flight")]
    pub single_flight: bool, // false = циклы могут перекрываться

    // Источник сделок
    #[serde(default = "default_trade_source")]
    pub trade_source: TradeSourceKind,
    #[serde(default = "default_trades_dir")]
    pub trades_dir: String,
    #[serde(default)]
    pub simulated_failure_rate: f64,
    #[serde(default = "default_simulated_max_trades")]
    pub simulated_max_trades: u32,
}

// --- Значения по умолчанию ---
fn default_folder_path() -> String { ".".into() }
fn default_interval_minutes() -> u64 { 15 }
fn default_retry_delay_ms() -> u64 { 2000 }
fn default_single_flight() -> bool { true }
fn default_trade_source() -> TradeSourceKind { TradeSourceKind::Simulated }
fn default_trades_dir() -> String { "trades".into() }
fn default_simulated_max_trades() -> u32 { 5 }

impl Default for Config {
    fn default() -> Self {
        Self {
            folder_path: default_folder_path(),
            interval_minutes: default_interval_minutes(),
            retry_delay_ms: default_retry_delay_ms(),
            single_flight: default_single_flight(),
            trade_source: default_trade_source(),
            trades_dir: default_trades_dir(),
            simulated_failure_rate: 0.0,
            simulated_max_trades: default_simulated_max_trades(),
        }
    }
}

impl Config {
    /// Файл из `--config`, затем `POWER_REPORT_CONFIG`, иначе `Config.toml`.
    pub fn load(cli: &Cli) -> Result<Self> {
        let file = cli
            .config
            .clone()
            .or_else(|| env::var("POWER_REPORT_CONFIG").ok())
            .unwrap_or_else(|| "Config.toml".into());
        Self::load_from(&file, cli)
    }

    /// Слои: TOML-файл (необязательный) -> переменные окружения -> аргументы командной строки.
    pub fn load_from(file: &str, cli: &Cli) -> Result<Self> {
        let loader = Loader::builder()
            .add_source(File::with_name(file).required(false))
            .add_source(
                Environment::with_prefix("POWER_REPORT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("folder_path", cli.folder_path.clone())?
            .set_override_option("interval_minutes", cli.interval_minutes.map(|m| m as i64))?
            .build()?;

        let cfg: Config = loader.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        if self.interval_minutes == 0 {
            bail!("interval_minutes must be greater than zero");
        }
        if !(0.0..=1.0).contains(&self.simulated_failure_rate) {
            bail!(
                "simulated_failure_rate must be within [0, 1], got {}",
                self.simulated_failure_rate
            );
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_minutes * 60)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_toml(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_gives_defaults() {
        let cfg = Config::load_from("definitely-not-here.toml", &Cli::default()).unwrap();
        assert_eq!(cfg.folder_path, ".");
        assert_eq!(cfg.interval_minutes, 15);
        assert_eq!(cfg.retry_delay(), Duration::from_millis(2000));
        assert!(cfg.single_flight);
        assert_eq!(cfg.trade_source, TradeSourceKind::Simulated);
    }

    #[test]
    fn file_values_are_read() {
        let file = write_toml(
            r#"
            folder_path = "/tmp/reports"
            interval_minutes = 5
            trade_source = "file"
            trades_dir = "/data/trades"
            "#,
        );
        let cfg = Config::load_from(file.path().to_str().unwrap(), &Cli::default()).unwrap();
        assert_eq!(cfg.folder_path, "/tmp/reports");
        assert_eq!(cfg.interval(), Duration::from_secs(300));
        assert_eq!(cfg.trade_source, TradeSourceKind::File);
        assert_eq!(cfg.trades_dir, "/data/trades");
    }

    #[test]
    fn cli_overrides_file() {
        let file = write_toml("folder_path = \"from-file\"\ninterval_minutes = 5\n");
        let cli = Cli {
            folder_path: Some("from-cli".into()),
            interval_minutes: Some(30),
            config: None,
        };
        let cfg = Config::load_from(file.path().to_str().unwrap(), &cli).unwrap();
        assert_eq!(cfg.folder_path, "from-cli");
        assert_eq!(cfg.interval_minutes, 30);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let file = write_toml("interval_minutes = 0\n");
        assert!(Config::load_from(file.path().to_str().unwrap(), &Cli::default()).is_err());
    }

    #[test]
    fn failure_rate_out_of_range_is_rejected() {
        let file = write_toml("simulated_failure_rate = 1.5\n");
        assert!(Config::load_from(file.path().to_str().unwrap(), &Cli::default()).is_err());
    }
}
