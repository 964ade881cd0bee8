// src/trades/simulated.rs

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use rand::Rng;
use rust_decimal::Decimal;
use tracing::debug;

use super::TradeSource;
use crate::models::{Period, Trade};

const PERIODS_PER_DAY: i32 = 24;
const MAX_ABS_VOLUME_CENTS: i64 = 50_000; // ±500.00

/// Заглушка торговой системы: случайные сделки и, при желании, случайные отказы.
#[derive(Debug, Clone)]
pub struct SimulatedTradeSource {
    max_trades: u32,
    failure_rate: f64,
}

impl SimulatedTradeSource {
    pub fn new(max_trades: u32, failure_rate: f64) -> Self {
        Self {
            max_trades,
            failure_rate: if failure_rate.is_nan() { 0.0 } else { failure_rate.clamp(0.0, 1.0) },
        }
    }

    fn generate<R: Rng>(&self, rng: &mut R, date: NaiveDate) -> Result<Vec<Trade>> {
        if rng.gen_bool(self.failure_rate) {
            return Err(anyhow!("simulated trading service outage for {}", date));
        }

        let count = if self.max_trades == 0 { 0 } else { rng.gen_range(1..=self.max_trades) };
        let trades = (0..count)
            .map(|i| Trade {
                date,
                trade_id: format!("SIM-{}-{}", date.format("%Y%m%d"), i + 1),
                periods: (1..=PERIODS_PER_DAY)
                    .map(|period| Period {
                        period,
                        volume: Decimal::new(
                            rng.gen_range(-MAX_ABS_VOLUME_CENTS..=MAX_ABS_VOLUME_CENTS),
                            2,
                        ),
                    })
                    .collect(),
            })
            .collect();
        Ok(trades)
    }
}

#[async_trait]
impl TradeSource for SimulatedTradeSource {
    async fn get_trades(&self, date: NaiveDate) -> Result<Vec<Trade>> {
        // ThreadRng не Send, поэтому генерируем до любых await
        let trades = self.generate(&mut rand::thread_rng(), date)?;
        debug!("Simulated {} trades for {}", trades.len(), date);
        Ok(trades)
    }

    fn name(&self) -> &str {
        "simulated"
    }
}
