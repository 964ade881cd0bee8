// tests/common/mod.rs
#![allow(dead_code)]

use anyhow::{Result, bail};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use power_position::clock::Clock;
use power_position::models::{Period, Trade};
use power_position::trades::TradeSource;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU32, Ordering};

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// 2024-06-01 10:30 UTC -> день поставки 2024-06-02
pub fn june_first() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2024, 6, 1, 10, 30, 0).unwrap())
}

pub fn trade(periods: &[(i32, Decimal)]) -> Trade {
    Trade {
        date: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
        trade_id: String::new(),
        periods: periods
            .iter()
            .map(|&(period, volume)| Period { period, volume })
            .collect(),
    }
}

type CallHook = Box<dyn Fn(u32) + Send + Sync>;

/// Провайдер по сценарию: N отказов, потом успех (или вечное ожидание)
pub struct ScriptedSource {
    trades: Vec<Trade>,
    failures: u32,
    hang: bool,
    on_call: Option<CallHook>,
    calls: AtomicU32,
}

impl ScriptedSource {
    pub fn ok(trades: Vec<Trade>) -> Self {
        Self {
            trades,
            failures: 0,
            hang: false,
            on_call: None,
            calls: AtomicU32::new(0),
        }
    }

    pub fn failing_first(mut self, failures: u32) -> Self {
        self.failures = failures;
        self
    }

    pub fn hanging(mut self) -> Self {
        self.hang = true;
        self
    }

    pub fn on_call(mut self, hook: impl Fn(u32) + Send + Sync + 'static) -> Self {
        self.on_call = Some(Box::new(hook));
        self
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TradeSource for ScriptedSource {
    async fn get_trades(&self, date: NaiveDate) -> Result<Vec<Trade>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(hook) = &self.on_call {
            hook(call);
        }
        if self.hang {
            std::future::pending::<()>().await;
        }
        if call <= self.failures {
            bail!("provider unavailable for {} (call {})", date, call);
        }
        Ok(self.trades.clone())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
