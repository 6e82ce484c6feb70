use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// One international fixture as it appears in the results table.
///
/// Column names follow the public results dataset: `city`, `country` and `neutral`
/// are exposed here as `host_city`, `host_country` and `neutral_venue`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
    pub tournament: String,
    #[serde(rename = "city")]
    pub host_city: String,
    #[serde(rename = "country")]
    pub host_country: String,
    #[serde(rename = "neutral", deserialize_with = "deserialize_flag")]
    pub neutral_venue: bool,
}

impl MatchRecord {
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn involves(&self, team: &str) -> bool {
        self.home_team == team || self.away_team == team
    }

    /// Same fixture with home and away sides exchanged. Venue fields are untouched.
    pub fn swapped(&self) -> Self {
        Self {
            home_team: self.away_team.clone(),
            away_team: self.home_team.clone(),
            home_score: self.away_score,
            away_score: self.home_score,
            ..self.clone()
        }
    }

    /// 'H', 'A' or 'D' from the listed home side's point of view.
    pub fn outcome(&self) -> char {
        if self.home_score > self.away_score {
            'H'
        } else if self.home_score < self.away_score {
            'A'
        } else {
            'D'
        }
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawFlag {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    match RawFlag::deserialize(deserializer)? {
        RawFlag::Bool(v) => Ok(v),
        RawFlag::Int(v) => Ok(v != 0),
        RawFlag::Text(raw) => parse_flag(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid boolean flag: {raw}"))),
    }
}

pub(crate) fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MatchRecord {
        MatchRecord {
            date: NaiveDate::from_ymd_opt(1930, 7, 13).unwrap(),
            home_team: "France".to_string(),
            away_team: "Mexico".to_string(),
            home_score: 4,
            away_score: 1,
            tournament: "FIFA World Cup".to_string(),
            host_city: "Montevideo".to_string(),
            host_country: "Uruguay".to_string(),
            neutral_venue: true,
        }
    }

    #[test]
    fn swapped_keeps_venue_fields() {
        let m = sample();
        let s = m.swapped();
        assert_eq!(s.home_team, "Mexico");
        assert_eq!(s.away_score, 4);
        assert_eq!(s.host_country, "Uruguay");
        assert!(s.neutral_venue);
        assert_eq!(s.outcome(), 'A');
        assert_eq!(s.swapped(), m);
    }

    #[test]
    fn parse_flag_accepts_dataset_spellings() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" False "), Some(false));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
