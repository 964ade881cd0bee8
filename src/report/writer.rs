// src/report/writer.rs

use anyhow::{Context, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{info, warn};

use crate::models::{AggregatedPosition, ReportRun};

pub const HEADER: &str = "Datetime;Volume";

/// Объём с двумя знаками после точки, без учёта локали
fn format_volume(volume: Decimal) -> String {
    let mut v = volume.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if v.is_zero() {
        v.set_sign_positive(true); // без "-0.00"
    }
    format!("{:.2}", v)
}

/// Содержимое CSV целиком
pub fn render(rows: &[AggregatedPosition]) -> String {
    let mut out = String::with_capacity(HEADER.len() + 1 + rows.len() * 32);
    out.push_str(HEADER);
    out.push('\n');
    for row in rows {
        out.push_str(&row.timestamp_label());
        out.push(';');
        out.push_str(&format_volume(row.volume));
        out.push('\n');
    }
    out
}

/// Пишет отчёт в `folder/PowerPosition_<yyyyMMdd>_<yyyyMMddHHmm>.csv`, перезаписывая старый.
/// Сначала пишем во временный файл рядом и только потом переименовываем, поэтому
/// под итоговым именем никогда не остаётся недописанный отчёт.
pub async fn write_report(
    rows: &[AggregatedPosition],
    run: &ReportRun,
    folder: &Path,
) -> Result<PathBuf> {
    fs::create_dir_all(folder)
        .await
        .with_context(|| format!("Failed to create report folder {:?}", folder))?;

    let file_name = run.file_name();
    let path = folder.join(&file_name);
    let tmp_path = folder.join(format!(".{}.tmp", file_name));

    if let Err(e) = write_file(&tmp_path, render(rows).as_bytes()).await {
        if let Err(cleanup) = fs::remove_file(&tmp_path).await {
            warn!("Failed to remove temporary report {:?}: {}", tmp_path, cleanup);
        }
        return Err(e);
    }

    fs::rename(&tmp_path, &path)
        .await
        .with_context(|| format!("Failed to move report into place at {:?}", path))?;

    info!("Report file saved to {}", path.display());
    Ok(path)
}

async fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    let file = fs::File::create(path)
        .await
        .with_context(|| format!("Failed to create {:?}", path))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(content)
        .await
        .with_context(|| format!("Failed to write {:?}", path))?;
    writer.flush().await?;
    writer.get_ref().sync_all().await?;
    Ok(())
}
