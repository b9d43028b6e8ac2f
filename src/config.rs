use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "balman", version, about = "Bank statement import, export and balances")]
pub struct Cli {
    /// CSV file backing the statement store
    #[arg(long, env = "BALMAN_DATA_FILE", default_value = "statements_store.csv")]
    pub data_file: PathBuf,

    /// Log filter, e.g. `info` or `balman=debug`
    #[arg(long, env = "BALMAN_LOG", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Import statements from a CSV file
    Import {
        /// CSV file with a header line and six columns per row
        file: PathBuf,
    },

    /// Export statements in a date range as CSV
    Export {
        #[command(flatten)]
        range: RangeArgs,

        /// Output file or directory (default: stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Sum an account's amounts per currency
    Calculate {
        account_number: String,

        #[command(flatten)]
        range: RangeArgs,
    },

    /// Print statements as JSON lines
    List {
        /// Restrict to one account
        #[arg(long)]
        account: Option<String>,

        #[command(flatten)]
        range: RangeArgs,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct RangeArgs {
    /// First day of the range, YYYY-MM-DD
    #[arg(long)]
    pub start_date: Option<String>,

    /// Day the range stops before, YYYY-MM-DD
    #[arg(long)]
    pub end_date: Option<String>,
}
