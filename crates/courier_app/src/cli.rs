use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use courier_core::Mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Compress every image through the optimize endpoint, one at a time.
    Optimize,
    /// Rename the whole batch in one request.
    Rename,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Optimize => Mode::Optimize,
            ModeArg::Rename => Mode::Rename,
        }
    }
}

#[derive(Parser)]
#[command(name = "courier")]
#[command(
    about = "Upload images to an optimization service and collect the results",
    long_about = None
)]
pub struct Cli {
    /// Image files to upload
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Processing mode
    #[arg(short, long, value_enum, default_value = "optimize")]
    pub mode: ModeArg,

    /// Base name for the renamed files (rename mode only)
    #[arg(short, long)]
    pub base_name: Option<String>,

    /// Root URL of the service
    #[arg(short, long, default_value = "http://localhost:3655")]
    pub server: String,

    /// Directory downloaded results are saved into
    #[arg(short, long, default_value = "downloads")]
    pub output: PathBuf,

    /// Save every result individually after processing
    #[arg(short, long)]
    pub download: bool,

    /// Save the whole batch as one ZIP archive after processing
    #[arg(short, long)]
    pub zip: bool,

    /// Also write logs to ./courier.log
    #[arg(long)]
    pub log_file: bool,

    /// Verbose log output
    #[arg(short, long)]
    pub verbose: bool,
}
