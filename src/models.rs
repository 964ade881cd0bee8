// src/models.rs
use chrono::{DateTime, Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Сделка на дату поставки (как её отдаёт провайдер)
#[derive(Debug, Clone, Deserialize)]
pub struct Trade {
    pub date: NaiveDate,
    #[serde(default)]
    pub trade_id: String,
    pub periods: Vec<Period>,
}

/// Объём в одном периоде дня поставки. Нумерация периодов задаётся провайдером.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Period {
    pub period: i32,
    pub volume: Decimal, // строка или число в JSON
}

/// Строка отчёта: суммарный объём за час (UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregatedPosition {
    pub timestamp: DateTime<Utc>,
    pub volume: Decimal,
}

impl AggregatedPosition {
    /// `YYYY-MM-DDTHH:00:00Z`
    pub fn timestamp_label(&self) -> String {
        self.timestamp.format("%Y-%m-%dT%H:00:00Z").to_string()
    }
}

/// Контекст одного цикла. Фиксируется один раз и не меняется между повторами.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRun {
    pub delivery_date: NaiveDate,
    pub generated_at: DateTime<Utc>,
}

impl ReportRun {
    /// День поставки = завтрашняя дата по UTC
    pub fn capture(now: DateTime<Utc>) -> Self {
        Self {
            delivery_date: now.date_naive() + Days::new(1),
            generated_at: now,
        }
    }

    pub fn file_name(&self) -> String {
        format!(
            "PowerPosition_{}_{}.csv",
            self.delivery_date.format("%Y%m%d"),
            self.generated_at.format("%Y%m%d%H%M")
        )
    }
}
