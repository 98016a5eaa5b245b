mod cli;
mod pipeline;
mod report;

pub(crate) use cli::{as_cli, print_usage};
