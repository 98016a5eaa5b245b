use anyhow::{Context, Result};

use super::pipeline::run_etl;
use super::report::{print_reports, print_run_summary};
use crate::config::EtlConfig;
use crate::db::Database;

pub(crate) fn as_cli(args: &[String]) -> Result<()> {
    match args[1].as_str() {
        "init" => cli_init(&args[2..]),
        "run" => cli_run(&args[2..]),
        "report" => cli_report(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("bankdw {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

pub(crate) fn print_usage() {
    println!("bankdw: star-schema warehouse loader for bank transactions");
    println!();
    println!("Usage: bankdw <command> [options]");
    println!();
    println!("Commands:");
    println!("  init                          Create source and warehouse tables");
    println!("  run                           Run the full ETL and print a summary");
    println!("  report                        Print spending reports from the warehouse");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Options:");
    println!("  --db <path>                   Database file (default: data dir bankdw.db)");
    println!("  --mapping <file.csv>          Merchant category mapping (default: tbl_MCC_Mapping.csv)");
    println!("  --as-of <YYYY-MM-DD>          Reference date for customer ages (default: now)");
    println!("  --top <N>                     Categories in the top list (default: 5)");
}

fn open(config: &EtlConfig) -> Result<Database> {
    Database::open(&config.db_path)
        .with_context(|| format!("Failed to open database {}", config.db_path.display()))
}

fn cli_init(args: &[String]) -> Result<()> {
    let config = EtlConfig::from_args(args)?;
    let db = open(&config)?;
    println!("Database ready at {}", config.db_path.display());
    println!(
        "  {} customers, {} accounts, {} transactions in source tables",
        db.count_rows("tbl_Customers")?,
        db.count_rows("tbl_Accounts")?,
        db.count_rows("tbl_Transactions")?
    );
    Ok(())
}

fn cli_run(args: &[String]) -> Result<()> {
    let config = EtlConfig::from_args(args)?;
    let mut db = open(&config)?;
    let summary = run_etl(&mut db, &config).context("ETL run failed")?;
    print_run_summary(&summary);
    Ok(())
}

fn cli_report(args: &[String]) -> Result<()> {
    let config = EtlConfig::from_args(args)?;
    let db = open(&config)?;
    print_reports(&db, config.top_n)
}
