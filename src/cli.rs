use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::model::DEFAULT_REPO_URL;
use crate::select::exec::RegionArgs;

#[derive(Parser)]
#[command(name = "gloc")]
#[command(about = "Commit history analytics over line-of-code logs")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, help = "Path to the line-of-code CSV log", default_value = "loc.csv")]
    pub log: PathBuf,

    #[arg(long, help = "Drop malformed rows instead of rejecting the log", default_value_t = false)]
    pub skip_invalid: bool,

    #[arg(long, help = "Repository URL used to build commit links", default_value = DEFAULT_REPO_URL)]
    pub repo_url: String,

    #[arg(short, long, action = ArgAction::Count, help = "Increase log verbosity (-v info, -vv debug)")]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    Stats {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    Commits {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long, help = "Show at most this many commits")]
        limit: Option<usize>,
    },
    Select {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long, help = "Brushed rectangle in chart pixels: x0,y0,x1,y1", conflicts_with_all = ["from", "to", "hours"])]
        region: Option<String>,

        #[arg(long, help = "Window start (RFC3339, YYYY-MM-DD, or duration ago)")]
        from: Option<String>,

        #[arg(long, help = "Window end (RFC3339, YYYY-MM-DD, or duration ago)")]
        to: Option<String>,

        #[arg(long, help = "Hour-of-day window, e.g. 9-17")]
        hours: Option<String>,

        #[arg(long, help = "Only brush commits up to this timeline position (0 to 100)", default_value_t = 100.0)]
        progress: f64,
    },
    Timeline {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long, help = "Slider position from 0 to 100", default_value_t = 100.0)]
        progress: f64,

        #[arg(long, help = "Include one narrative step per commit")]
        narrative: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn init_logging(&self) {
        let level = match self.common.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
            .format_timestamp(None)
            .init();
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Stats { json, ndjson } => crate::stats::exec(self.common, json, ndjson),
            Commands::Commits { json, ndjson, limit } => {
                crate::commits::exec(self.common, limit, json, ndjson)
            }
            Commands::Select { json, ndjson, region, from, to, hours, progress } => {
                let args = RegionArgs { region, from, to, hours, progress };
                crate::select::exec(self.common, args, json, ndjson)
            }
            Commands::Timeline { json, ndjson, progress, narrative } => {
                crate::timeline::exec(self.common, progress, narrative, json, ndjson)
            }
        }
    }
}
