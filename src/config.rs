use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

use crate::filter::{DEFAULT_END_YEAR, DEFAULT_START_YEAR};

const CACHE_DIR: &str = "wc_history";

/// Report settings, read from the environment (and `.env`) and then overridden by
/// command-line flags.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub results_csv: Option<PathBuf>,
    pub ranking_csv: Option<PathBuf>,
    pub db_path: Option<PathBuf>,
    pub start_year: i32,
    pub end_year: i32,
    pub teams: Vec<String>,
    pub pair: Option<(String, String)>,
    pub xlsx_out: Option<PathBuf>,
    pub json_out: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            results_csv: None,
            ranking_csv: None,
            db_path: None,
            start_year: DEFAULT_START_YEAR,
            end_year: DEFAULT_END_YEAR,
            teams: Vec::new(),
            pair: None,
            xlsx_out: None,
            json_out: None,
        }
    }
}

impl ReportConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut cfg = Self::default();
        cfg.results_csv = get("RESULTS_CSV").map(PathBuf::from);
        cfg.ranking_csv = get("RANKING_CSV").map(PathBuf::from);
        cfg.db_path = get("RESULTS_DB").map(PathBuf::from);
        if let Some(raw) = get("REPORT_START_YEAR") {
            cfg.start_year = parse_year(&raw).context("REPORT_START_YEAR")?;
        }
        if let Some(raw) = get("REPORT_END_YEAR") {
            cfg.end_year = parse_year(&raw).context("REPORT_END_YEAR")?;
        }
        if let Some(raw) = get("REPORT_TEAMS") {
            cfg.teams = parse_list(&raw);
        }
        Ok(cfg)
    }

    /// Applies `--flag value` / `--flag=value` arguments on top of the current settings.
    pub fn apply_args(&mut self, args: &[String]) -> Result<()> {
        let mut idx = 0;
        while idx < args.len() {
            let arg = &args[idx];
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) => (flag, Some(value.to_string())),
                None => (arg.as_str(), None),
            };
            if !flag.starts_with("--") {
                return Err(anyhow!("unexpected argument: {arg}"));
            }
            let value = match inline {
                Some(v) => v,
                None => {
                    idx += 1;
                    args.get(idx)
                        .cloned()
                        .ok_or_else(|| anyhow!("missing value for {flag}"))?
                }
            };
            match flag {
                "--results" => self.results_csv = Some(PathBuf::from(value)),
                "--ranking" => self.ranking_csv = Some(PathBuf::from(value)),
                "--db" => self.db_path = Some(PathBuf::from(value)),
                "--start" => self.start_year = parse_year(&value).context("--start")?,
                "--end" => self.end_year = parse_year(&value).context("--end")?,
                "--teams" => self.teams = parse_list(&value),
                "--pair" => {
                    let names = parse_list(&value);
                    let [a, b] = names.as_slice() else {
                        return Err(anyhow!("--pair expects two teams, got {value:?}"));
                    };
                    self.pair = Some((a.clone(), b.clone()));
                }
                "--xlsx" => self.xlsx_out = Some(PathBuf::from(value)),
                "--json" => self.json_out = Some(PathBuf::from(value)),
                other => return Err(anyhow!("unknown flag: {other}")),
            }
            idx += 1;
        }
        Ok(())
    }
}

/// `$XDG_CACHE_HOME/wc_history`, falling back to `~/.cache/wc_history`.
pub fn app_cache_dir() -> Option<PathBuf> {
    if let Ok(base) = std::env::var("XDG_CACHE_HOME")
        && !base.trim().is_empty()
    {
        return Some(PathBuf::from(base).join(CACHE_DIR));
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(PathBuf::from(home).join(".cache").join(CACHE_DIR))
}

fn parse_year(raw: &str) -> Result<i32> {
    raw.trim()
        .parse::<i32>()
        .with_context(|| format!("invalid year {raw:?}"))
}

fn parse_list(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for part in raw.split([',', ';']) {
        let name = part.trim();
        if !name.is_empty() && !out.iter().any(|t| t == name) {
            out.push(name.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn env_then_args() {
        let env = HashMap::from([
            ("REPORT_START_YEAR", "1930"),
            ("REPORT_TEAMS", "France; Brazil,France, "),
            ("RESULTS_DB", ""),
        ]);
        let mut cfg = ReportConfig::from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(cfg.start_year, 1930);
        assert_eq!(cfg.end_year, DEFAULT_END_YEAR);
        assert_eq!(cfg.teams, vec!["France", "Brazil"]);
        assert!(cfg.db_path.is_none());

        let args: Vec<String> = ["--end=1998", "--pair", "France,Brazil", "--xlsx", "out.xlsx"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        cfg.apply_args(&args).unwrap();
        assert_eq!(cfg.end_year, 1998);
        assert_eq!(cfg.pair, Some(("France".to_string(), "Brazil".to_string())));
        assert_eq!(cfg.xlsx_out, Some(PathBuf::from("out.xlsx")));
    }

    #[test]
    fn bad_flags_are_errors() {
        let mut cfg = ReportConfig::default();
        assert!(cfg.apply_args(&["--start".to_string()]).is_err());
        assert!(cfg.apply_args(&["--colour=red".to_string()]).is_err());
        assert!(cfg.apply_args(&["--pair=France".to_string()]).is_err());
        assert!(cfg.apply_args(&["--end=abc".to_string()]).is_err());
    }
}
