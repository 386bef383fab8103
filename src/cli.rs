use std::path::PathBuf;

use clap::Parser;

use crate::config::DEFAULT_CONFIG_PATH;

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the YAML config file
    #[clap(short, long, env = "JIRA_COMMIT_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Ticket number; asked for interactively when omitted
    #[clap(short, long)]
    pub ticket: Option<String>,

    /// Print the git command instead of running it
    #[clap(short, long, value_parser, default_value_t = false)]
    pub dry_run: bool,

    /// Increase log verbosity (-v, -vv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
