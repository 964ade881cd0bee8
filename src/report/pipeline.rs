// src/report/pipeline.rs

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{error, info};

use super::aggregator::aggregate;
use super::writer::write_report;
use crate::clock::Clock;
use crate::models::ReportRun;
use crate::trades::TradeSource;

/// Задержка между повторами по умолчанию
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(2000);

/// Почему не удалась одна попытка. Обе ветки повторяются одинаково.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("trade extraction failed: {0:#}")]
    Fetch(anyhow::Error),
    #[error("report generation failed: {0:#}")]
    Process(anyhow::Error),
}

/// Итог успешного цикла
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleOutcome {
    pub path: PathBuf,
    pub attempts: u32,
    pub rows: usize,
}

pub struct ReportPipeline<S> {
    source: S,
    clock: Arc<dyn Clock>,
    folder: PathBuf,
    retry_delay: Duration,
}

impl<S: TradeSource> ReportPipeline<S> {
    pub fn new(source: S, clock: Arc<dyn Clock>, folder: impl Into<PathBuf>) -> Self {
        Self {
            source,
            clock,
            folder: folder.into(),
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Один полный цикл: загрузка -> агрегация -> запись.
    /// Повторяет с начала (включая загрузку) до первого успеха, без ограничения числа попыток.
    pub async fn run_cycle(&self) -> CycleOutcome {
        // 1) дата поставки и время генерации фиксируются на весь цикл
        let run = ReportRun::capture(self.clock.now());
        info!(
            "Starting aggregated trade report for delivery date {} (source: {})",
            run.delivery_date,
            self.source.name()
        );

        // 2) повторяем до успеха
        let mut attempts: u32 = 0;
        loop {
            attempts += 1;
            match self.attempt(&run).await {
                Ok((path, rows)) => {
                    info!(
                        "Aggregated trade report completed after {} attempt(s). File saved to {}",
                        attempts,
                        path.display()
                    );
                    return CycleOutcome { path, attempts, rows };
                }
                Err(e) => {
                    error!(attempt = attempts, "{}. Retrying in {:?}...", e, self.retry_delay);
                    sleep(self.retry_delay).await;
                }
            }
        }
    }

    async fn attempt(&self, run: &ReportRun) -> Result<(PathBuf, usize), CycleError> {
        let trades = self
            .source
            .get_trades(run.delivery_date)
            .await
            .map_err(CycleError::Fetch)?;

        info!("Generating aggregated trade report from {} trades...", trades.len());
        let rows = aggregate(&trades, run.delivery_date).map_err(CycleError::Process)?;

        let path = write_report(&rows, run, &self.folder)
            .await
            .map_err(CycleError::Process)?;
        Ok((path, rows.len()))
    }
}
