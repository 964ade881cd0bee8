// src/trades/file.rs

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::TradeSource;
use crate::models::Trade;

/// Сделки из JSON-файлов `trades_<yyyyMMdd>.json` (массив сделок).
#[derive(Debug, Clone)]
pub struct FileTradeSource {
    dir: PathBuf,
}

impl FileTradeSource {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("trades_{}.json", date.format("%Y%m%d")))
    }
}

fn parse_trades(raw: &str) -> Result<Vec<Trade>> {
    let de = &mut serde_json::Deserializer::from_str(raw);
    // serde_path_to_error подскажет, какое именно поле сломано
    let trades: Vec<Trade> = serde_path_to_error::deserialize(de)?;
    Ok(trades)
}

#[async_trait]
impl TradeSource for FileTradeSource {
    async fn get_trades(&self, date: NaiveDate) -> Result<Vec<Trade>> {
        let path = self.path_for(date);
        let raw = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read trades file {:?}", path))?;
        let trades = parse_trades(&raw)
            .with_context(|| format!("Malformed trades file {:?}", path))?;
        debug!("Loaded {} trades from {:?}", trades.len(), path);
        Ok(trades)
    }

    fn name(&self) -> &str {
        "file"
    }
}
