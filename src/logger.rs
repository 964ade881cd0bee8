// src/logger.rs

use crate::config::{Config, TradeSourceKind};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;

/// Фильтр из RUST_LOG, иначе `info`
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Инициализация логирования через tracing и сводка настроек отчёта
pub fn init(cfg: &Config) {
    fmt()
        .with_env_filter(env_filter())
        .with_target(false) // не показывать target (модуль)
        .init();

    tracing::info!(
        folder = %cfg.folder_path,
        interval_min = cfg.interval_minutes,
        retry_delay_ms = cfg.retry_delay_ms,
        single_flight = cfg.single_flight,
        "Power position reporter configured, trade source: {}",
        describe_source(cfg)
    );
}

fn describe_source(cfg: &Config) -> String {
    match cfg.trade_source {
        TradeSourceKind::Simulated => format!(
            "simulated (max {} trades, failure rate {})",
            cfg.simulated_max_trades, cfg.simulated_failure_rate
        ),
        TradeSourceKind::File => format!("file ({})", cfg.trades_dir),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_configured_trade_source() {
        let mut cfg = Config::default();
        assert_eq!(describe_source(&cfg), "simulated (max 5 trades, failure rate 0)");

        cfg.trade_source = TradeSourceKind::File;
        cfg.trades_dir = "/data/trades".into();
        assert_eq!(describe_source(&cfg), "file (/data/trades)");
    }
}
