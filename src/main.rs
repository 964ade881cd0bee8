// src/main.rs
use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use power_position::cli::Cli;
use power_position::clock::SystemClock;
use power_position::config::Config;
use power_position::logger;
use power_position::report::ReportPipeline;
use power_position::scheduler::Scheduler;
use power_position::trades::{TradeSource, build_source};

#[tokio::main]
async fn main() -> Result<()> {
    // 1) .env, аргументы, конфиг и логгер
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    let cfg = Config::load(&cli)?;
    logger::init(&cfg);

    // 2) источник сделок
    let source = build_source(&cfg);
    tracing::info!("Trade source: {}", source.name());

    // 3) конвейер и планировщик
    let pipeline = ReportPipeline::new(source, Arc::new(SystemClock), &cfg.folder_path)
        .with_retry_delay(cfg.retry_delay());
    let scheduler = Scheduler::new(pipeline, cfg.interval(), cfg.single_flight)?;

    // 4) работаем до Ctrl-C
    scheduler.run_until(tokio::signal::ctrl_c()).await;
    Ok(())
}
