use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use std::path::PathBuf;

pub(crate) const DEFAULT_MAPPING_FILE: &str = "tbl_MCC_Mapping.csv";
pub(crate) const DEFAULT_TOP_N: usize = 5;

/// Settings for one invocation, built once and handed to every stage.
#[derive(Debug, Clone)]
pub(crate) struct EtlConfig {
    pub(crate) db_path: PathBuf,
    pub(crate) mapping_path: PathBuf,
    /// Reference point for customer ages. Defaults to the run start time.
    pub(crate) as_of: NaiveDateTime,
    pub(crate) top_n: usize,
}

impl EtlConfig {
    /// Parse `--db`, `--mapping`, `--as-of` and `--top` from the arguments
    /// that follow the command name.
    pub(crate) fn from_args(args: &[String]) -> Result<Self> {
        let db_path = match flag_value(args, "--db") {
            Some(p) => PathBuf::from(shellexpand(p)),
            None => default_db_path()?,
        };

        let mapping_path = flag_value(args, "--mapping")
            .map(|p| PathBuf::from(shellexpand(p)))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MAPPING_FILE));

        let as_of = match flag_value(args, "--as-of") {
            Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .with_context(|| format!("Invalid --as-of date '{s}', expected YYYY-MM-DD"))?
                .and_time(chrono::NaiveTime::MIN),
            None => chrono::Local::now().naive_local(),
        };

        let top_n = match flag_value(args, "--top") {
            Some(s) => s
                .parse::<usize>()
                .with_context(|| format!("Invalid --top value '{s}'"))?,
            None => DEFAULT_TOP_N,
        };

        if let Some(flag) = args.iter().find(|a| a.starts_with("--") && !is_known_flag(a)) {
            anyhow::bail!("Unknown option: {flag}");
        }

        Ok(Self {
            db_path,
            mapping_path,
            as_of,
            top_n,
        })
    }
}

fn is_known_flag(flag: &str) -> bool {
    matches!(flag, "--db" | "--mapping" | "--as-of" | "--top")
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn default_db_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "bankdw", "BankDW")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("bankdw.db"))
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
