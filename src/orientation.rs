//! Re-expresses a team's fixtures from its own point of view.
//!
//! After [`merge_matches`] the `home_*` columns hold the subject team and the `away_*`
//! columns its opponent, whatever the real venue was. Only [`OrientedMatch::home`]
//! tells whether the subject team was actually listed as the home side.

use serde::Serialize;

use crate::matches::MatchRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrientedMatch {
    #[serde(flatten)]
    pub record: MatchRecord,
    pub home: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredMatch {
    #[serde(flatten)]
    pub oriented: OrientedMatch,
    pub goal_difference: i64,
}

impl ScoredMatch {
    pub fn goals_for(&self) -> u32 {
        self.oriented.record.home_score
    }

    pub fn goals_against(&self) -> u32 {
        self.oriented.record.away_score
    }
}

pub fn swap_orientation(table: &[MatchRecord]) -> Vec<MatchRecord> {
    table.iter().map(MatchRecord::swapped).collect()
}

/// Every fixture of `team`, with its away fixtures swapped so `team` sits in the home
/// columns. Rows keep their original table (date) order.
pub fn merge_matches(table: &[MatchRecord], team: &str) -> Vec<OrientedMatch> {
    table
        .iter()
        .filter_map(|m| {
            if m.home_team == team {
                Some(OrientedMatch {
                    record: m.clone(),
                    home: true,
                })
            } else if m.away_team == team {
                Some(OrientedMatch {
                    record: m.swapped(),
                    home: false,
                })
            } else {
                None
            }
        })
        .collect()
}

/// Adds `home_score - away_score`. Meaningful only on rows from [`merge_matches`].
pub fn compute_goal_difference(rows: &[OrientedMatch]) -> Vec<ScoredMatch> {
    rows.iter()
        .map(|row| ScoredMatch {
            goal_difference: i64::from(row.record.home_score) - i64::from(row.record.away_score),
            oriented: row.clone(),
        })
        .collect()
}
