// src/cli.rs
use clap::Parser;

/// Day-ahead power position report service
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "power-position", version)]
pub struct Cli {
    /// Папка для CSV-отчётов
    #[arg(long)]
    pub folder_path: Option<String>,

    /// Интервал между отчётами, минуты
    #[arg(long)]
    pub interval_minutes: Option<u64>,

    /// Путь к TOML-конфигу
    #[arg(long)]
    pub config: Option<String>,
}
