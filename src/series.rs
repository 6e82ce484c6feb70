//! Year-indexed cumulative series and gap filling.
//!
//! Both series kinds share one filling routine through [`YearRow`]. A filled series has
//! one row per entity per year of the global `[min_year, max_year]` span.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{StatsError, StatsResult};
use crate::matches::MatchRecord;
use crate::orientation::merge_matches;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamYearRow {
    pub year: i32,
    pub cumulated_score: u64,
    pub team: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryYearRow {
    pub country: String,
    pub match_hosted: u64,
    pub year: i32,
}

pub trait YearRow: Clone {
    fn entity(&self) -> &str;
    fn year(&self) -> i32;
    fn value(&self) -> u64;
    fn synthetic(entity: &str, year: i32, value: u64) -> Self;
}

impl YearRow for TeamYearRow {
    fn entity(&self) -> &str {
        &self.team
    }

    fn year(&self) -> i32 {
        self.year
    }

    fn value(&self) -> u64 {
        self.cumulated_score
    }

    fn synthetic(entity: &str, year: i32, value: u64) -> Self {
        Self {
            year,
            cumulated_score: value,
            team: entity.to_string(),
        }
    }
}

impl YearRow for CountryYearRow {
    fn entity(&self) -> &str {
        &self.country
    }

    fn year(&self) -> i32 {
        self.year
    }

    fn value(&self) -> u64 {
        self.match_hosted
    }

    fn synthetic(entity: &str, year: i32, value: u64) -> Self {
        Self {
            country: entity.to_string(),
            match_hosted: value,
            year,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapFillMode {
    Team,
    Country,
}

impl FromStr for GapFillMode {
    type Err = StatsError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "team" => Ok(Self::Team),
            "country" => Ok(Self::Country),
            _ => Err(StatsError::InvalidMode(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum YearSeries {
    Team(Vec<TeamYearRow>),
    Country(Vec<CountryYearRow>),
}

impl YearSeries {
    pub fn mode(&self) -> GapFillMode {
        match self {
            Self::Team(_) => GapFillMode::Team,
            Self::Country(_) => GapFillMode::Country,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Team(rows) => rows.len(),
            Self::Country(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fills `series` after checking that `mode` names its kind.
pub fn fill_year_gaps(series: YearSeries, mode: &str) -> StatsResult<YearSeries> {
    let mode: GapFillMode = mode.parse()?;
    if mode != series.mode() {
        return Err(StatsError::InvalidMode(format!(
            "{mode:?} mode requested for a {:?} series",
            series.mode()
        )));
    }
    Ok(match series {
        YearSeries::Team(rows) => YearSeries::Team(fill_gaps(&rows)),
        YearSeries::Country(rows) => YearSeries::Country(fill_gaps(&rows)),
    })
}

/// Inserts the missing years of every entity.
///
/// Years before an entity's first row get 0. Every later year, observed or not, holds the
/// largest value seen so far, so each entity's series never decreases. Repeated
/// (entity, year) rows collapse to the larger value. Output is grouped by entity in order
/// of first appearance, years ascending.
pub fn fill_gaps<R: YearRow>(rows: &[R]) -> Vec<R> {
    let (Some(min_year), Some(max_year)) = (
        rows.iter().map(YearRow::year).min(),
        rows.iter().map(YearRow::year).max(),
    ) else {
        return Vec::new();
    };

    let mut order: Vec<&str> = Vec::new();
    let mut per_entity: HashMap<&str, BTreeMap<i32, u64>> = HashMap::new();
    for row in rows {
        let years = per_entity.entry(row.entity()).or_insert_with(|| {
            order.push(row.entity());
            BTreeMap::new()
        });
        let slot = years.entry(row.year()).or_insert(0);
        *slot = (*slot).max(row.value());
    }

    let span = usize::try_from(i64::from(max_year) - i64::from(min_year) + 1).unwrap_or(0);
    let mut out = Vec::with_capacity(order.len().saturating_mul(span));
    for entity in order {
        let Some(years) = per_entity.get(entity) else {
            continue;
        };
        let mut running = 0u64;
        for year in min_year..=max_year {
            if let Some(value) = years.get(&year) {
                running = running.max(*value);
            }
            out.push(R::synthetic(entity, year, running));
        }
    }
    out
}

/// Running total of goals scored per team per year, one row per year in which the team
/// played. Teams without matches produce no rows.
pub fn cumulative_team_scores<S: AsRef<str>>(table: &[MatchRecord], teams: &[S]) -> Vec<TeamYearRow> {
    let mut out = Vec::new();
    for team in teams {
        let team = team.as_ref();
        let mut per_year: BTreeMap<i32, u64> = BTreeMap::new();
        for row in merge_matches(table, team) {
            *per_year.entry(row.record.year()).or_insert(0) += u64::from(row.record.home_score);
        }
        let mut cumulated = 0u64;
        for (year, goals) in per_year {
            cumulated += goals;
            out.push(TeamYearRow {
                year,
                cumulated_score: cumulated,
                team: team.to_string(),
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team_row(year: i32, value: u64, team: &str) -> TeamYearRow {
        TeamYearRow {
            year,
            cumulated_score: value,
            team: team.to_string(),
        }
    }

    #[test]
    fn fills_before_and_after_an_entity() {
        let rows = vec![
            team_row(1998, 1, "Brazil"),
            team_row(2000, 5, "France"),
            team_row(2002, 7, "Brazil"),
        ];
        let filled = fill_gaps(&rows);
        let france: Vec<(i32, u64)> = filled
            .iter()
            .filter(|r| r.team == "France")
            .map(|r| (r.year, r.cumulated_score))
            .collect();
        assert_eq!(
            france,
            vec![(1998, 0), (1999, 0), (2000, 5), (2001, 5), (2002, 5)]
        );
        let brazil: Vec<u64> = filled
            .iter()
            .filter(|r| r.team == "Brazil")
            .map(|r| r.cumulated_score)
            .collect();
        assert_eq!(brazil, vec![1, 1, 1, 1, 7]);
    }

    #[test]
    fn duplicates_collapse_to_larger_value() {
        let rows = vec![team_row(2000, 2, "Chile"), team_row(2000, 4, "Chile")];
        assert_eq!(fill_gaps(&rows), vec![team_row(2000, 4, "Chile")]);
    }

    #[test]
    fn mode_must_be_known_and_match() {
        let series = YearSeries::Team(vec![team_row(2000, 1, "Chile")]);
        assert!(matches!(
            fill_year_gaps(series.clone(), "region"),
            Err(StatsError::InvalidMode(_))
        ));
        assert!(matches!(
            fill_year_gaps(series.clone(), "TEAM"),
            Err(StatsError::InvalidMode(_))
        ));
        assert!(matches!(
            fill_year_gaps(series.clone(), " team "),
            Err(StatsError::InvalidMode(_))
        ));
        assert!(matches!(
            fill_year_gaps(series.clone(), "country"),
            Err(StatsError::InvalidMode(_))
        ));
        assert_eq!(fill_year_gaps(series, "team").map(|s| s.len()), Ok(1));
    }

    #[test]
    fn observed_dip_keeps_running_maximum() {
        let rows = vec![team_row(1998, 5, "Brazil"), team_row(2000, 3, "Brazil")];
        let values: Vec<u64> = fill_gaps(&rows).iter().map(|r| r.cumulated_score).collect();
        assert_eq!(values, vec![5, 5, 5]);
    }

    #[test]
    fn extreme_years_do_not_overflow_span() {
        let rows = vec![team_row(i32::MAX, 2, "Chile"), team_row(i32::MAX - 1, 1, "Chile")];
        let filled = fill_gaps(&rows);
        assert_eq!(
            filled.iter().map(|r| (r.year, r.cumulated_score)).collect::<Vec<_>>(),
            vec![(i32::MAX - 1, 1), (i32::MAX, 2)]
        );
    }

    #[test]
    fn empty_series_stays_empty() {
        let rows: Vec<CountryYearRow> = Vec::new();
        assert!(fill_gaps(&rows).is_empty());
    }
}
