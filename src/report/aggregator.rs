// src/report/aggregator.rs

use anyhow::{Result, anyhow};
use chrono::{Duration, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::{AggregatedPosition, Trade};

/// Смещение периода относительно полуночи дня поставки: период 1 = 23:00 UTC предыдущего дня.
const PERIOD_HOUR_OFFSET: i64 = 2;

/// Суммирует объёмы всех сделок по номеру периода и переводит период в час UTC.
/// Результат отсортирован по времени, по одной строке на период.
/// Переполнение суммы или времени - ошибка, цикл её повторит.
pub fn aggregate(trades: &[Trade], delivery_date: NaiveDate) -> Result<Vec<AggregatedPosition>> {
    let mut totals: BTreeMap<i32, Decimal> = BTreeMap::new();
    for period in trades.iter().flat_map(|t| t.periods.iter()) {
        let total = totals.entry(period.period).or_default();
        *total = total.checked_add(period.volume).ok_or_else(|| {
            anyhow!("volume overflow while summing period {}", period.period)
        })?;
    }

    let midnight = delivery_date.and_time(NaiveTime::MIN).and_utc();

    // BTreeMap уже упорядочен по периоду, а время монотонно по периоду
    totals
        .into_iter()
        .map(|(period, volume)| {
            let offset = Duration::hours(i64::from(period) - PERIOD_HOUR_OFFSET);
            let timestamp = midnight
                .checked_add_signed(offset)
                .ok_or_else(|| anyhow!("period {} is out of the supported date range", period))?;
            Ok(AggregatedPosition { timestamp, volume })
        })
        .collect()
}
