use std::collections::HashSet;

use chrono::NaiveDate;

use crate::error::{StatsError, StatsResult};
use crate::matches::MatchRecord;

/// First year covered by the international results dataset.
pub const DEFAULT_START_YEAR: i32 = 1872;
/// Last year boundary used when no end year is given.
pub const DEFAULT_END_YEAR: i32 = 2022;

/// Keeps records dated within `[start-01-01, end-01-01]`, both bounds inclusive.
pub fn filter_by_date_range(
    table: &[MatchRecord],
    start: Option<i32>,
    end: Option<i32>,
) -> StatsResult<Vec<MatchRecord>> {
    let start = start.unwrap_or(DEFAULT_START_YEAR);
    let end = end.unwrap_or(DEFAULT_END_YEAR);
    if start > end {
        return Err(StatsError::InvalidRange { start, end });
    }
    let (Some(lo), Some(hi)) = (new_year(start), new_year(end)) else {
        return Err(StatsError::InvalidRange { start, end });
    };
    Ok(table
        .iter()
        .filter(|m| m.date >= lo && m.date <= hi)
        .cloned()
        .collect())
}

/// Records in which any of `teams` plays, in table order. A fixture between two
/// listed teams is kept once.
pub fn filter_by_teams<S: AsRef<str>>(table: &[MatchRecord], teams: &[S]) -> Vec<MatchRecord> {
    if teams.is_empty() {
        return Vec::new();
    }
    let wanted: HashSet<&str> = teams.iter().map(|t| t.as_ref()).collect();
    table
        .iter()
        .filter(|m| wanted.contains(m.home_team.as_str()) || wanted.contains(m.away_team.as_str()))
        .cloned()
        .collect()
}

/// All fixtures between `team_a` and `team_b`, whichever side hosted.
pub fn filter_by_encounter(table: &[MatchRecord], team_a: &str, team_b: &str) -> Vec<MatchRecord> {
    table
        .iter()
        .filter(|m| {
            (m.home_team == team_a && m.away_team == team_b)
                || (m.home_team == team_b && m.away_team == team_a)
        })
        .cloned()
        .collect()
}

pub fn select_home_matches(table: &[MatchRecord], team: &str) -> Vec<MatchRecord> {
    table.iter().filter(|m| m.home_team == team).cloned().collect()
}

pub fn select_away_matches(table: &[MatchRecord], team: &str) -> Vec<MatchRecord> {
    table.iter().filter(|m| m.away_team == team).cloned().collect()
}

fn new_year(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(date: &str, home: &str, away: &str) -> MatchRecord {
        MatchRecord {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            home_team: home.to_string(),
            away_team: away.to_string(),
            home_score: 1,
            away_score: 0,
            tournament: "Friendly".to_string(),
            host_city: "City".to_string(),
            host_country: home.to_string(),
            neutral_venue: false,
        }
    }

    fn table() -> Vec<MatchRecord> {
        vec![
            m("1872-11-30", "Scotland", "England"),
            m("1950-06-24", "Brazil", "Mexico"),
            m("1998-01-01", "France", "Brazil"),
            m("2022-01-01", "England", "Scotland"),
            m("2022-06-01", "Brazil", "France"),
        ]
    }

    #[test]
    fn date_range_bounds_are_inclusive() {
        let rows = filter_by_date_range(&table(), Some(1998), Some(2022)).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].home_team, "France");
        assert_eq!(rows[1].home_team, "England");
    }

    #[test]
    fn date_range_defaults_cover_history() {
        let rows = filter_by_date_range(&table(), None, None).unwrap();
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn date_range_rejects_inverted_bounds() {
        let err = filter_by_date_range(&table(), Some(2000), Some(1990)).unwrap_err();
        assert_eq!(err, StatsError::InvalidRange { start: 2000, end: 1990 });
    }

    #[test]
    fn teams_filter_keeps_each_row_once() {
        let rows = filter_by_teams(&table(), &["France", "Brazil"]);
        assert_eq!(rows.len(), 3);
        let none: Vec<MatchRecord> = filter_by_teams::<&str>(&table(), &[]);
        assert!(none.is_empty());
    }

    #[test]
    fn encounter_ignores_side() {
        let rows = filter_by_encounter(&table(), "England", "Scotland");
        assert_eq!(rows.len(), 2);
        assert_eq!(select_home_matches(&table(), "Brazil").len(), 2);
        assert_eq!(select_away_matches(&table(), "Brazil").len(), 1);
    }
}
