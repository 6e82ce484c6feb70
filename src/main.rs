use std::fs;

use anyhow::{Context, Result, anyhow};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use wc_history::config::ReportConfig;
use wc_history::matches::MatchRecord;
use wc_history::report::{Report, ReportOptions, build_report};
use wc_history::summary::RankingTable;
use wc_history::{export, loader, store};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut cfg = ReportConfig::from_env()?;
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    cfg.apply_args(&args)?;

    let table = load_table(&cfg)?;
    let ranking = match cfg.ranking_csv.as_deref() {
        Some(path) => loader::read_ranking_csv(path)?,
        None => {
            warn!("no ranking table configured; every team summary will be skipped");
            RankingTable::default()
        }
    };

    let opts = ReportOptions {
        start_year: Some(cfg.start_year),
        end_year: Some(cfg.end_year),
        teams: cfg.teams.clone(),
        pair: cfg.pair.clone(),
    };
    let report = build_report(&table, &ranking, &opts)?;
    print_report(&cfg, &report);

    if let Some(path) = cfg.xlsx_out.as_deref() {
        let out = export::export_report(path, &report)?;
        println!(
            "Workbook: {} ({} summaries, {} team rows, {} country rows)",
            path.display(),
            out.summaries,
            out.team_series,
            out.country_series
        );
    }
    if let Some(path) = cfg.json_out.as_deref() {
        let json = serde_json::to_string_pretty(&report).context("serialize report")?;
        fs::write(path, json).with_context(|| format!("write report json {}", path.display()))?;
        println!("JSON: {}", path.display());
    }

    Ok(())
}

fn load_table(cfg: &ReportConfig) -> Result<Vec<MatchRecord>> {
    if let Some(db_path) = cfg.db_path.as_deref() {
        let conn = store::open_db(db_path)?;
        if store::count_matches(&conn)? > 0 {
            let rows = store::load_matches(&conn, Some(cfg.start_year), Some(cfg.end_year))?;
            info!(db = %db_path.display(), matches = rows.len(), "loaded results from sqlite");
            return Ok(rows);
        }
        warn!(db = %db_path.display(), "sqlite store is empty, falling back to csv");
    }
    let path = cfg
        .results_csv
        .as_deref()
        .ok_or_else(|| anyhow!("no results source: pass --results or --db (or set RESULTS_CSV)"))?;
    let rows = loader::read_results_csv(path)?;
    info!(csv = %path.display(), matches = rows.len(), "loaded results from csv");
    Ok(rows)
}

fn print_report(cfg: &ReportConfig, report: &Report) {
    println!(
        "Results {}-{}: {} matches",
        cfg.start_year, cfg.end_year, report.matches_considered
    );

    if !report.summaries.is_empty() {
        println!();
        println!(
            "{:<24} {:>5} {:>5} {:>5} {:>7} {:>6} {:>6} {:>5}",
            "team", "win", "draw", "loss", "goal+/-", "for", "agst", "rank"
        );
        for s in &report.summaries {
            println!(
                "{:<24} {:>5} {:>5} {:>5} {:>7} {:>6.2} {:>6.2} {:>5}",
                s.team,
                s.win,
                s.draw,
                s.loss,
                s.goal_average,
                s.goal_scored_average,
                s.goal_taken_average,
                s.fifa_rank
            );
        }
    }
    if !report.skipped_teams.is_empty() {
        println!("Skipped: {}", report.skipped_teams.len());
        for skipped in report.skipped_teams.iter().take(6) {
            println!("   - {}: {}", skipped.team, skipped.reason);
        }
    }

    if let Some(h2h) = &report.head_to_head {
        println!();
        println!(
            "{} vs {}: {} played, {}-{}-{} (W-D-L), goals {}:{}",
            h2h.team1,
            h2h.team2,
            h2h.total,
            h2h.team1_wins,
            h2h.draws,
            h2h.team2_wins,
            h2h.team1_score,
            h2h.team2_score
        );
    }

    println!();
    println!("Team series rows: {}", report.team_series.len());
    println!("Country series rows: {}", report.country_series.len());
    let mut top_hosts = report
        .country_series
        .iter()
        .filter(|r| r.year == cfg.end_year.min(max_year(report)))
        .collect::<Vec<_>>();
    top_hosts.sort_by(|a, b| b.match_hosted.cmp(&a.match_hosted).then(a.country.cmp(&b.country)));
    for row in top_hosts.iter().take(5) {
        println!("  {:<24} {:>6} hosted by {}", row.country, row.match_hosted, row.year);
    }
}

fn max_year(report: &Report) -> i32 {
    report
        .country_series
        .iter()
        .map(|r| r.year)
        .max()
        .unwrap_or(i32::MIN)
}
