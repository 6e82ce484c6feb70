use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

use wc_history::{loader, store};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let csv_path = parse_path_arg("--results")
        .or_else(|| std::env::var("RESULTS_CSV").ok().filter(|v| !v.trim().is_empty()).map(PathBuf::from))
        .ok_or_else(|| anyhow!("no results csv: pass --results <path> or set RESULTS_CSV"))?;

    let db_path = parse_path_arg("--db")
        .or_else(|| std::env::var("RESULTS_DB").ok().filter(|v| !v.trim().is_empty()).map(PathBuf::from))
        .or_else(store::default_db_path)
        .context("unable to resolve sqlite path")?;

    let matches = loader::read_results_csv(&csv_path)?;
    let mut conn = store::open_db(&db_path)?;
    let summary = store::import_matches(
        &mut conn,
        db_path.clone(),
        &csv_path.display().to_string(),
        &matches,
    )?;

    println!("Results import complete");
    println!("DB: {}", summary.db_path.display());
    println!("Run: {}", summary.run_id);
    println!("Matches imported: {}", summary.matches_imported);
    println!(
        "Dates: {} .. {}",
        summary
            .first_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "n/a".to_string()),
        summary
            .last_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "n/a".to_string())
    );

    Ok(())
}

fn parse_path_arg(flag: &str) -> Option<PathBuf> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let prefix = format!("{flag}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(path) = arg.strip_prefix(&prefix) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        if arg == flag {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(PathBuf::from(next));
            }
        }
    }
    None
}
