use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};
use tracing::info;

use crate::encounters::PairwiseSummary;
use crate::report::Report;
use crate::series::{CountryYearRow, TeamYearRow};
use crate::summary::TeamSummary;

#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Text(String),
    Number(f64),
}

impl From<&str> for Cell {
    fn from(v: &str) -> Self {
        Cell::Text(v.to_string())
    }
}

fn num<T: Into<f64>>(v: T) -> Cell {
    Cell::Number(v.into())
}

// u64 counters stay well inside f64's exact integer range.
fn count(v: u64) -> Cell {
    Cell::Number(v as f64)
}

pub struct ExportReport {
    pub summaries: usize,
    pub team_series: usize,
    pub country_series: usize,
}

pub fn export_report(path: &Path, report: &Report) -> Result<ExportReport> {
    let mut summary_rows = vec![header(&[
        "team",
        "goal_average",
        "goal_scored_average",
        "goal_taken_average",
        "win",
        "draw",
        "loss",
        "FIFA_rank",
    ])];
    summary_rows.extend(report.summaries.iter().map(summary_row));

    let mut pair_rows = vec![header(&[
        "team1",
        "team2",
        "team1_score",
        "team2_score",
        "team1_wins",
        "team2_wins",
        "draws",
        "total",
    ])];
    pair_rows.extend(report.head_to_head.iter().map(pair_row));

    let mut team_rows = vec![header(&["year", "cumulated_score", "team"])];
    team_rows.extend(report.team_series.iter().map(team_series_row));

    let mut country_rows = vec![header(&["country", "match_hosted", "year"])];
    country_rows.extend(report.country_series.iter().map(country_series_row));

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Summaries")?;
        write_rows(sheet, &summary_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("HeadToHead")?;
        write_rows(sheet, &pair_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("TeamSeries")?;
        write_rows(sheet, &team_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("CountrySeries")?;
        write_rows(sheet, &country_rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;
    info!(path = %path.display(), "workbook written");

    Ok(ExportReport {
        summaries: summary_rows.len().saturating_sub(1),
        team_series: team_rows.len().saturating_sub(1),
        country_series: country_rows.len().saturating_sub(1),
    })
}

fn header(names: &[&str]) -> Vec<Cell> {
    names.iter().map(|n| Cell::from(*n)).collect()
}

fn summary_row(s: &TeamSummary) -> Vec<Cell> {
    vec![
        Cell::from(s.team.as_str()),
        Cell::Number(s.goal_average as f64),
        num(s.goal_scored_average),
        num(s.goal_taken_average),
        count(s.win),
        count(s.draw),
        count(s.loss),
        num(s.fifa_rank),
    ]
}

fn pair_row(p: &PairwiseSummary) -> Vec<Cell> {
    vec![
        Cell::from(p.team1.as_str()),
        Cell::from(p.team2.as_str()),
        count(p.team1_score),
        count(p.team2_score),
        count(p.team1_wins),
        count(p.team2_wins),
        count(p.draws),
        count(p.total),
    ]
}

fn team_series_row(r: &TeamYearRow) -> Vec<Cell> {
    vec![num(r.year), count(r.cumulated_score), Cell::from(r.team.as_str())]
}

fn country_series_row(r: &CountryYearRow) -> Vec<Cell> {
    vec![Cell::from(r.country.as_str()), count(r.match_hosted), num(r.year)]
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<Cell>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            let (r, c) = (row_idx as u32, col_idx as u16);
            let written = match value {
                Cell::Text(s) => worksheet.write_string(r, c, s),
                Cell::Number(n) => worksheet.write_number(r, c, *n),
            };
            written.with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
