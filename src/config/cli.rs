use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "cmp-build-logs")]
#[command(about = "Compare two build execution logs and report actions whose metadata differs")]
pub struct CliConfig {
    /// First execution log (concatenated JSON records)
    pub left_log: PathBuf,

    /// Second execution log
    pub right_log: PathBuf,

    /// TOML file with a [compare] table
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Field whose string value identifies an action
    #[arg(long)]
    pub identity_field: Option<String>,

    /// Extra field names to ignore, comma separated
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Start from an empty exclusion set instead of walltime, remoteCacheHit and runner
    #[arg(long)]
    pub no_default_excludes: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}
