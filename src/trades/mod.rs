// src/trades/mod.rs

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

use crate::config::{Config, TradeSourceKind};
use crate::models::Trade;

mod file;
mod simulated;

pub use file::FileTradeSource;
pub use simulated::SimulatedTradeSource;

/// Провайдер сделок. Любая ошибка считается временной: вызывающая сторона повторит запрос.
#[async_trait]
pub trait TradeSource: Send + Sync {
    async fn get_trades(&self, date: NaiveDate) -> anyhow::Result<Vec<Trade>>;

    fn name(&self) -> &str;
}

#[async_trait]
impl<T: TradeSource + ?Sized> TradeSource for Arc<T> {
    async fn get_trades(&self, date: NaiveDate) -> anyhow::Result<Vec<Trade>> {
        (**self).get_trades(date).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Выбор реализации по конфигу
pub fn build_source(cfg: &Config) -> Arc<dyn TradeSource> {
    match cfg.trade_source {
        TradeSourceKind::Simulated => Arc::new(SimulatedTradeSource::new(
            cfg.simulated_max_trades,
            cfg.simulated_failure_rate,
        )),
        TradeSourceKind::File => Arc::new(FileTradeSource::new(&cfg.trades_dir)),
    }
}
