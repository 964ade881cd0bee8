// src/scheduler.rs

use anyhow::{Result, bail};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{info, warn};

use crate::report::ReportPipeline;
use crate::trades::TradeSource;

/// Периодический запуск отчёта: сразу при старте, затем каждые `interval`
/// от предыдущего срабатывания. Каждый цикл идёт отдельной задачей tokio.
pub struct Scheduler<S> {
    pipeline: Arc<ReportPipeline<S>>,
    interval: Duration,
    // Один разрешённый цикл одновременно; None = циклы могут перекрываться
    in_flight: Option<Arc<Semaphore>>,
}

impl<S> Scheduler<S>
where
    S: TradeSource + 'static,
{
    pub fn new(pipeline: ReportPipeline<S>, interval: Duration, single_flight: bool) -> Result<Self> {
        if interval.is_zero() {
            bail!("report interval must be greater than zero");
        }
        Ok(Self {
            pipeline: Arc::new(pipeline),
            interval,
            in_flight: single_flight.then(|| Arc::new(Semaphore::new(1))),
        })
    }

    /// Работает до конца жизни процесса
    pub async fn run(self) {
        self.run_until(std::future::pending::<()>()).await
    }

    /// Как `run`, но перестаёт планировать новые циклы, когда `shutdown` завершится.
    /// Уже запущенные циклы не отменяются.
    pub async fn run_until<F: Future>(self, shutdown: F) {
        info!(
            "Power reporting service started: every {} min, single-flight: {}",
            self.interval.as_secs() / 60,
            self.in_flight.is_some()
        );

        let mut ticker = interval(self.interval); // первый tick сразу
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("Shutdown requested, no further reports will be scheduled");
                    break;
                }
                _ = ticker.tick() => self.trigger(),
            }
        }
    }

    fn trigger(&self) {
        let permit = match &self.in_flight {
            Some(gate) => match gate.clone().try_acquire_owned() {
                Ok(permit) => Some(permit),
                Err(_) => {
                    warn!("Previous report cycle is still running, skipping this trigger");
                    return;
                }
            },
            None => None,
        };

        let pipeline = self.pipeline.clone();
        tokio::spawn(async move {
            let _permit = permit; // держим до конца цикла
            pipeline.run_cycle().await;
        });
    }
}
