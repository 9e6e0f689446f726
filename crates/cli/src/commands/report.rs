use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use habitlog_core::config::bucket_zone_from_env;
use habitlog_service::MedicineService;
use habitlog_storage::Storage;

fn medicine_service(db_path: &Path) -> Result<MedicineService> {
    let storage = Arc::new(Storage::new(db_path)?);
    Ok(MedicineService::new(storage, bucket_zone_from_env()?))
}

pub(crate) async fn run_pivot(db_path: &Path, name: &str, days: u32) -> Result<()> {
    let points = medicine_service(db_path)?.daily_pivot(name, Some(days)).await?;
    println!("{}", serde_json::to_string_pretty(&points)?);
    Ok(())
}

pub(crate) async fn run_histogram(db_path: &Path, name: &str, hours: u32) -> Result<()> {
    let points = medicine_service(db_path)?.hourly_histogram(name, Some(hours)).await?;
    println!("{}", serde_json::to_string_pretty(&points)?);
    Ok(())
}

pub(crate) async fn run_substances(db_path: &Path) -> Result<()> {
    let substances = medicine_service(db_path)?.substances().await?;
    println!("{}", serde_json::to_string_pretty(&substances)?);
    Ok(())
}

pub(crate) async fn run_stats(db_path: &Path) -> Result<()> {
    let stats = medicine_service(db_path)?.stats().await?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
