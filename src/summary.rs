use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{StatsError, StatsResult};
use crate::matches::MatchRecord;
use crate::orientation::{compute_goal_difference, merge_matches};

/// FIFA ranking lookup. Rank is the 0-based position of a country's first row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingTable {
    countries: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RankingRow {
    #[serde(rename = "Country")]
    pub country: String,
}

impl RankingTable {
    pub fn new<I, S>(countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            countries: countries.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn rank_of(&self, team: &str) -> StatsResult<u32> {
        self.countries
            .iter()
            .position(|c| c == team)
            .and_then(|idx| u32::try_from(idx).ok())
            .ok_or_else(|| StatsError::TeamNotFound(team.to_string()))
    }
}

impl FromIterator<String> for RankingTable {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self::new(iter)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub team: String,
    pub goal_average: i64,
    pub goal_scored_average: f64,
    pub goal_taken_average: f64,
    pub win: u64,
    pub draw: u64,
    pub loss: u64,
    #[serde(rename = "FIFA_rank")]
    pub fifa_rank: u32,
}

impl TeamSummary {
    pub fn played(&self) -> u64 {
        self.win + self.draw + self.loss
    }
}

pub fn summarize_team(
    table: &[MatchRecord],
    team: &str,
    ranking: &RankingTable,
) -> StatsResult<TeamSummary> {
    let (mut win, mut draw, mut loss) = (0u64, 0u64, 0u64);
    let mut goal_average = 0i64;
    let mut scored = 0u64;
    let mut taken = 0u64;

    for row in compute_goal_difference(&merge_matches(table, team)) {
        match row.goals_for().cmp(&row.goals_against()) {
            std::cmp::Ordering::Greater => win += 1,
            std::cmp::Ordering::Equal => draw += 1,
            std::cmp::Ordering::Less => loss += 1,
        }
        goal_average += row.goal_difference;
        scored += u64::from(row.goals_for());
        taken += u64::from(row.goals_against());
    }

    let played = win + draw + loss;
    if played == 0 {
        return Err(StatsError::DivisionByZero(team.to_string()));
    }
    let fifa_rank = ranking.rank_of(team)?;

    Ok(TeamSummary {
        team: team.to_string(),
        goal_average,
        goal_scored_average: scored as f64 / played as f64,
        goal_taken_average: taken as f64 / played as f64,
        win,
        draw,
        loss,
        fifa_rank,
    })
}

/// Summaries for every team that can be summarized, in input order.
pub fn summarize_teams<S>(table: &[MatchRecord], teams: &[S], ranking: &RankingTable) -> Vec<TeamSummary>
where
    S: AsRef<str> + Sync,
{
    summarize_teams_report(table, teams, ranking).summaries
}

#[derive(Debug, Clone, Default)]
pub struct SummaryBatch {
    pub summaries: Vec<TeamSummary>,
    pub skipped: Vec<(String, StatsError)>,
}

pub fn summarize_teams_report<S>(
    table: &[MatchRecord],
    teams: &[S],
    ranking: &RankingTable,
) -> SummaryBatch
where
    S: AsRef<str> + Sync,
{
    let results: Vec<(String, StatsResult<TeamSummary>)> = teams
        .par_iter()
        .map(|team| {
            let team = team.as_ref();
            (team.to_string(), summarize_team(table, team, ranking))
        })
        .collect();

    let mut batch = SummaryBatch::default();
    for (team, result) in results {
        match result {
            Ok(summary) => batch.summaries.push(summary),
            Err(err) => {
                debug!(team = %team, error = %err, "skipping team summary");
                batch.skipped.push((team, err));
            }
        }
    }
    batch
}
