use std::process::Command;

use colored::Colorize;

use crate::error::{Error, Result};
use crate::jira::TicketInfo;

const GIT: &str = "git";

/// Runs `git commit` with a message built from a ticket
#[derive(Debug, Clone)]
pub struct GitCommitter {
    program: String,
    dry_run: bool,
}

impl Default for GitCommitter {
    fn default() -> Self {
        Self {
            program: GIT.to_string(),
            dry_run: false,
        }
    }
}

impl GitCommitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use another executable in place of `git`
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Only print the command instead of running it
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Title and description go in as two separate `-m` paragraphs
    pub fn commit_args(info: &TicketInfo) -> Vec<String> {
        vec![
            "commit".to_string(),
            "-m".to_string(),
            info.title.clone(),
            "-m".to_string(),
            info.description.clone(),
        ]
    }

    pub fn command(&self, info: &TicketInfo) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(Self::commit_args(info));
        cmd
    }

    /// Create the commit, with git's output going straight to the terminal
    pub fn commit(&self, info: &TicketInfo) -> Result<()> {
        if self.dry_run {
            println!(
                "{} {} commit -m {:?} -m {:?}",
                ">".bright_green(),
                self.program,
                info.title,
                info.description
            );
            return Ok(());
        }

        let status = self
            .command(info)
            .status()
            .map_err(|e| Error::Command(format!("failed to execute {}: {}", self.program, e)))?;

        if !status.success() {
            return Err(Error::Command(format!("{} commit failed: {}", self.program, status)));
        }

        Ok(())
    }
}
