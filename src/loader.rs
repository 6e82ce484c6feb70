use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, anyhow};

use crate::matches::MatchRecord;
use crate::summary::{RankingRow, RankingTable};

/// Reads the results CSV (`date,home_team,away_team,home_score,away_score,tournament,
/// city,country,neutral`) and returns the records sorted by date.
pub fn read_results_csv(path: &Path) -> Result<Vec<MatchRecord>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("open results csv {}", path.display()))?;
    parse_results_csv(file).with_context(|| format!("parse results csv {}", path.display()))
}

pub fn parse_results_csv<R: Read>(reader: R) -> Result<Vec<MatchRecord>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut out = Vec::new();
    for (idx, row) in rdr.deserialize::<MatchRecord>().enumerate() {
        // +2: header line and 1-based numbering.
        let line = idx + 2;
        let record = row.with_context(|| format!("decode results row at line {line}"))?;
        if record.home_team == record.away_team {
            return Err(anyhow!(
                "line {line}: {} listed as both home and away team",
                record.home_team
            ));
        }
        out.push(record);
    }
    out.sort_by_key(|m| m.date);
    Ok(out)
}

pub fn read_ranking_csv(path: &Path) -> Result<RankingTable> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("open ranking csv {}", path.display()))?;
    parse_ranking_csv(file).with_context(|| format!("parse ranking csv {}", path.display()))
}

/// Only the `Country` column is read. Row order defines the rank.
pub fn parse_ranking_csv<R: Read>(reader: R) -> Result<RankingTable> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut countries = Vec::new();
    for row in rdr.deserialize::<RankingRow>() {
        countries.push(row.context("decode ranking row")?.country);
    }
    Ok(RankingTable::new(countries))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_are_sorted_and_flags_parsed() {
        let raw = "\
date,home_team,away_team,home_score,away_score,tournament,city,country,neutral
1873-03-08,England,Scotland,4,2,Friendly,London,England,FALSE
1872-11-30,Scotland,England,0,0,Friendly,Glasgow,Scotland,FALSE
1930-07-13,France,Mexico,4,1,FIFA World Cup,Montevideo,Uruguay,TRUE
";
        let rows = parse_results_csv(raw.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].home_team, "Scotland");
        assert!(!rows[0].neutral_venue);
        assert!(rows[2].neutral_venue);
        assert_eq!(rows[2].host_city, "Montevideo");
    }

    #[test]
    fn self_match_is_rejected() {
        let raw = "\
date,home_team,away_team,home_score,away_score,tournament,city,country,neutral
1900-01-01,Wales,Wales,1,1,Friendly,Cardiff,Wales,FALSE
";
        assert!(parse_results_csv(raw.as_bytes()).is_err());
    }

    #[test]
    fn ranking_keeps_row_order() {
        let raw = "Country,Points\nArgentina,1840\nFrance,1838\n";
        let ranking = parse_ranking_csv(raw.as_bytes()).unwrap();
        assert_eq!(ranking.rank_of("France"), Ok(1));
    }
}
