mod categorize;
mod config;
mod db;
mod error;
mod import;
mod models;
mod run;
mod transform;

use anyhow::Result;
use env_logger::Env;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    match args.len() {
        2.. => run::as_cli(&args),
        _ => {
            run::print_usage();
            Ok(())
        }
    }
}
