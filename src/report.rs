use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::encounters::{PairwiseSummary, aggregate_encounters};
use crate::filter::{filter_by_date_range, filter_by_teams};
use crate::hosting::aggregate_hosted_matches;
use crate::matches::MatchRecord;
use crate::series::{
    CountryYearRow, TeamYearRow, YearSeries, cumulative_team_scores, fill_year_gaps,
};
use crate::summary::{RankingTable, TeamSummary, summarize_teams_report};

#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub teams: Vec<String>,
    pub pair: Option<(String, String)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub matches_considered: usize,
    pub summaries: Vec<TeamSummary>,
    pub skipped_teams: Vec<SkippedTeam>,
    pub head_to_head: Option<PairwiseSummary>,
    pub team_series: Vec<TeamYearRow>,
    pub country_series: Vec<CountryYearRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedTeam {
    pub team: String,
    pub reason: String,
}

pub fn build_report(
    table: &[MatchRecord],
    ranking: &RankingTable,
    opts: &ReportOptions,
) -> Result<Report> {
    let window = filter_by_date_range(table, opts.start_year, opts.end_year)
        .context("select report window")?;
    let team_rows = filter_by_teams(&window, &opts.teams);

    let batch = summarize_teams_report(&team_rows, &opts.teams, ranking);
    let skipped_teams = batch
        .skipped
        .into_iter()
        .map(|(team, err)| SkippedTeam {
            team,
            reason: err.to_string(),
        })
        .collect();

    let head_to_head = opts
        .pair
        .as_ref()
        .map(|(a, b)| aggregate_encounters(&window, a, b));

    let team_series = match fill_year_gaps(
        YearSeries::Team(cumulative_team_scores(&team_rows, &opts.teams)),
        "team",
    )
    .context("fill team series")?
    {
        YearSeries::Team(rows) => rows,
        YearSeries::Country(_) => Vec::new(),
    };

    let country_series = match fill_year_gaps(
        YearSeries::Country(aggregate_hosted_matches(&window)),
        "country",
    )
    .context("fill country series")?
    {
        YearSeries::Country(rows) => rows,
        YearSeries::Team(_) => Vec::new(),
    };

    info!(
        matches = window.len(),
        summaries = batch.summaries.len(),
        team_rows = team_series.len(),
        country_rows = country_series.len(),
        "report built"
    );

    Ok(Report {
        matches_considered: window.len(),
        summaries: batch.summaries,
        skipped_teams,
        head_to_head,
        team_series,
        country_series,
    })
}
