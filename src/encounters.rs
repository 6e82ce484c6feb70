use serde::{Deserialize, Serialize};

use crate::filter::filter_by_encounter;
use crate::matches::MatchRecord;

/// Head-to-head record of `team1` against `team2`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairwiseSummary {
    pub team1: String,
    pub team2: String,
    pub team1_score: u64,
    pub team2_score: u64,
    pub team1_wins: u64,
    pub team2_wins: u64,
    pub draws: u64,
    pub total: u64,
}

impl PairwiseSummary {
    fn empty(team1: &str, team2: &str) -> Self {
        Self {
            team1: team1.to_string(),
            team2: team2.to_string(),
            team1_score: 0,
            team2_score: 0,
            team1_wins: 0,
            team2_wins: 0,
            draws: 0,
            total: 0,
        }
    }

    /// The same record seen from `team2`'s side.
    pub fn mirrored(&self) -> Self {
        Self {
            team1: self.team2.clone(),
            team2: self.team1.clone(),
            team1_score: self.team2_score,
            team2_score: self.team1_score,
            team1_wins: self.team2_wins,
            team2_wins: self.team1_wins,
            draws: self.draws,
            total: self.total,
        }
    }
}

pub fn aggregate_encounters(table: &[MatchRecord], team1: &str, team2: &str) -> PairwiseSummary {
    let mut out = PairwiseSummary::empty(team1, team2);

    for m in filter_by_encounter(table, team1, team2) {
        let (score1, score2) = if m.home_team == team1 {
            (m.home_score, m.away_score)
        } else {
            (m.away_score, m.home_score)
        };
        out.team1_score += u64::from(score1);
        out.team2_score += u64::from(score2);
        match score1.cmp(&score2) {
            std::cmp::Ordering::Greater => out.team1_wins += 1,
            std::cmp::Ordering::Less => out.team2_wins += 1,
            std::cmp::Ordering::Equal => out.draws += 1,
        }
    }

    out.total = out.team1_wins + out.team2_wins + out.draws;
    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn m(year: i32, home: &str, away: &str, hs: u32, aws: u32) -> MatchRecord {
        MatchRecord {
            date: NaiveDate::from_ymd_opt(year, 3, 1).unwrap(),
            home_team: home.to_string(),
            away_team: away.to_string(),
            home_score: hs,
            away_score: aws,
            tournament: "Friendly".to_string(),
            host_city: "Glasgow".to_string(),
            host_country: "Scotland".to_string(),
            neutral_venue: false,
        }
    }

    #[test]
    fn attributes_goals_regardless_of_venue() {
        let table = vec![
            m(1872, "Scotland", "England", 0, 0),
            m(1873, "England", "Scotland", 4, 2),
            m(1874, "Scotland", "England", 2, 1),
            m(1875, "Wales", "Scotland", 0, 4),
        ];
        let out = aggregate_encounters(&table, "England", "Scotland");
        assert_eq!(out.team1_score, 5);
        assert_eq!(out.team2_score, 3);
        assert_eq!(out.team1_wins, 1);
        assert_eq!(out.team2_wins, 1);
        assert_eq!(out.draws, 1);
        assert_eq!(out.total, 3);
    }

    #[test]
    fn no_encounters_is_all_zero() {
        let out = aggregate_encounters(&[], "Brazil", "Japan");
        assert_eq!(out.total, 0);
        assert_eq!(out.team1, "Brazil");
    }
}
