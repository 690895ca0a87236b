use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "test262-runner",
    about = "Check the kaiju parser against the Test262 suite"
)]
pub struct Cli {
    #[arg(default_value = "test262/test")]
    pub path: PathBuf,

    /// Print every result, not only the totals
    #[arg(long, default_value_t = false)]
    pub verbose: bool,

    /// Break results down by directory and failure cause
    #[arg(long, default_value_t = false)]
    pub analyze: bool,

    /// Number of failures listed after the totals
    #[arg(long, default_value_t = 10)]
    pub sample: usize,
}
