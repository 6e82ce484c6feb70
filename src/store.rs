use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use rusqlite::{Connection, params};
use tracing::info;

use crate::config::app_cache_dir;
use crate::matches::MatchRecord;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub db_path: PathBuf,
    pub run_id: i64,
    pub matches_imported: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

pub fn default_db_path() -> Option<PathBuf> {
    app_cache_dir().map(|dir| dir.join("international_results.sqlite"))
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    let conn =
        Connection::open(path).with_context(|| format!("open sqlite db {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        PRAGMA journal_mode = WAL;
        CREATE TABLE IF NOT EXISTS results (
            row_id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            home_team TEXT NOT NULL,
            away_team TEXT NOT NULL,
            home_score INTEGER NOT NULL,
            away_score INTEGER NOT NULL,
            tournament TEXT NOT NULL,
            city TEXT NOT NULL,
            country TEXT NOT NULL,
            neutral INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_results_date ON results(date);
        CREATE INDEX IF NOT EXISTS idx_results_home ON results(home_team);
        CREATE INDEX IF NOT EXISTS idx_results_away ON results(away_team);

        CREATE TABLE IF NOT EXISTS import_runs (
            run_id INTEGER PRIMARY KEY AUTOINCREMENT,
            started_at TEXT NOT NULL,
            finished_at TEXT NULL,
            source TEXT NOT NULL,
            matches_imported INTEGER NOT NULL
        );
        "#,
    )
    .context("create sqlite schema")?;
    Ok(())
}

/// Replaces the stored results with `matches` in one transaction.
pub fn import_matches(
    conn: &mut Connection,
    db_path: PathBuf,
    source: &str,
    matches: &[MatchRecord],
) -> Result<ImportSummary> {
    let started_at = Utc::now().to_rfc3339();
    let tx = conn.transaction().context("begin import transaction")?;
    tx.execute(
        "INSERT INTO import_runs(started_at, finished_at, source, matches_imported)
         VALUES (?1, NULL, ?2, 0)",
        params![started_at, source],
    )
    .context("insert import run")?;
    let run_id = tx.last_insert_rowid();

    tx.execute("DELETE FROM results", []).context("clear results")?;
    {
        let mut stmt = tx
            .prepare(
                "INSERT INTO results (
                    date, home_team, away_team, home_score, away_score,
                    tournament, city, country, neutral
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )
            .context("prepare result insert")?;
        for m in matches {
            stmt.execute(params![
                m.date.format(DATE_FORMAT).to_string(),
                m.home_team,
                m.away_team,
                m.home_score,
                m.away_score,
                m.tournament,
                m.host_city,
                m.host_country,
                bool_to_i64(m.neutral_venue),
            ])
            .context("insert result row")?;
        }
    }

    tx.execute(
        "UPDATE import_runs SET finished_at = ?1, matches_imported = ?2 WHERE run_id = ?3",
        params![Utc::now().to_rfc3339(), matches.len() as i64, run_id],
    )
    .context("update import run")?;
    tx.commit().context("commit import transaction")?;

    info!(run_id, matches = matches.len(), source, "results imported");

    Ok(ImportSummary {
        db_path,
        run_id,
        matches_imported: matches.len(),
        first_date: matches.iter().map(|m| m.date).min(),
        last_date: matches.iter().map(|m| m.date).max(),
    })
}

/// Stored results in date order, optionally limited to `[start-01-01, end-01-01]`.
pub fn load_matches(conn: &Connection, start: Option<i32>, end: Option<i32>) -> Result<Vec<MatchRecord>> {
    let lo = start.map(|y| format!("{y:04}-01-01"));
    let hi = end.map(|y| format!("{y:04}-01-01"));
    let mut stmt = conn
        .prepare(
            r#"
            SELECT
                date, home_team, away_team, home_score, away_score,
                tournament, city, country, neutral
            FROM results
            WHERE (?1 IS NULL OR date >= ?1)
              AND (?2 IS NULL OR date <= ?2)
            ORDER BY date ASC, row_id ASC
            "#,
        )
        .context("prepare load results query")?;

    let rows = stmt
        .query_map(params![lo, hi], |row| {
            Ok((
                row.get::<_, String>(0)?,
                MatchRecord {
                    date: NaiveDate::MIN,
                    home_team: row.get(1)?,
                    away_team: row.get(2)?,
                    home_score: row.get(3)?,
                    away_score: row.get(4)?,
                    tournament: row.get(5)?,
                    host_city: row.get(6)?,
                    host_country: row.get(7)?,
                    neutral_venue: row.get::<_, i64>(8)? != 0,
                },
            ))
        })
        .context("query load results")?;

    let mut out = Vec::new();
    for row in rows {
        let (raw_date, mut record) = row.context("decode result row")?;
        record.date = NaiveDate::parse_from_str(&raw_date, DATE_FORMAT)
            .with_context(|| format!("invalid stored date {raw_date}"))?;
        out.push(record);
    }
    Ok(out)
}

pub fn count_matches(conn: &Connection) -> Result<usize> {
    let n = conn
        .query_row("SELECT COUNT(*) FROM results", [], |row| row.get::<_, i64>(0))
        .context("count results")?;
    Ok(usize::try_from(n).unwrap_or(0))
}

fn bool_to_i64(v: bool) -> i64 {
    if v { 1 } else { 0 }
}
