use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::debug;

use crate::matches::MatchRecord;
use crate::series::CountryYearRow;

/// Cumulative number of matches hosted per country, one row per year between the
/// country's first and last hosted match.
///
/// Countries are taken from the `home_team` column in order of first appearance, so a
/// host country that never fielded a home side is not reported. A country that never
/// hosted is skipped.
pub fn aggregate_hosted_matches(table: &[MatchRecord]) -> Vec<CountryYearRow> {
    let mut hosted: HashMap<&str, BTreeMap<i32, u64>> = HashMap::new();
    for m in table {
        *hosted
            .entry(m.host_country.as_str())
            .or_default()
            .entry(m.year())
            .or_insert(0) += 1;
    }

    let mut seen = HashSet::new();
    table
        .iter()
        .map(|m| m.home_team.as_str())
        .filter(|country| seen.insert(*country))
        .filter_map(|country| {
            let rows = hosted_series(country, hosted.get(country));
            if rows.is_none() {
                debug!(country, "no hosted matches, skipping");
            }
            rows
        })
        .flatten()
        .collect()
}

fn hosted_series(country: &str, per_year: Option<&BTreeMap<i32, u64>>) -> Option<Vec<CountryYearRow>> {
    let per_year = per_year?;
    let first = *per_year.keys().next()?;
    let last = *per_year.keys().next_back()?;

    let mut cumulated = 0u64;
    let rows = (first..=last)
        .map(|year| {
            cumulated += per_year.get(&year).copied().unwrap_or(0);
            CountryYearRow {
                country: country.to_string(),
                match_hosted: cumulated,
                year,
            }
        })
        .collect();
    Some(rows)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn m(year: i32, home: &str, away: &str, host: &str) -> MatchRecord {
        MatchRecord {
            date: NaiveDate::from_ymd_opt(year, 5, 1).unwrap(),
            home_team: home.to_string(),
            away_team: away.to_string(),
            home_score: 0,
            away_score: 0,
            tournament: "Friendly".to_string(),
            host_city: "Somewhere".to_string(),
            host_country: host.to_string(),
            neutral_venue: home != host,
        }
    }

    #[test]
    fn counts_accumulate_across_years() {
        let table = vec![
            m(1930, "Uruguay", "Argentina", "Uruguay"),
            m(1930, "Argentina", "Chile", "Uruguay"),
            m(1932, "Uruguay", "Brazil", "Uruguay"),
            m(1932, "Argentina", "Brazil", "Argentina"),
        ];
        let rows = aggregate_hosted_matches(&table);
        let uruguay: Vec<(i32, u64)> = rows
            .iter()
            .filter(|r| r.country == "Uruguay")
            .map(|r| (r.year, r.match_hosted))
            .collect();
        assert_eq!(uruguay, vec![(1930, 2), (1931, 2), (1932, 3)]);
        let argentina: Vec<(i32, u64)> = rows
            .iter()
            .filter(|r| r.country == "Argentina")
            .map(|r| (r.year, r.match_hosted))
            .collect();
        assert_eq!(argentina, vec![(1932, 1)]);
    }

    #[test]
    fn home_sides_that_never_hosted_are_skipped() {
        let table = vec![m(1950, "Sweden", "Paraguay", "Brazil")];
        let rows = aggregate_hosted_matches(&table);
        assert!(rows.is_empty());
    }
}
