use std::io;
use std::process::ExitCode;

use colored::Colorize;
use is_terminal::IsTerminal;

use crate::cli::Args;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::git::GitCommitter;
use crate::jira::{JiraClient, TicketKey};
use crate::prompt;

/// Prefix attached to every log line once the ticket is known
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogContext {
    prefix: String,
}

impl LogContext {
    pub fn for_ticket(key: &TicketKey) -> Self {
        Self {
            prefix: format!("[{}] ", key),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn debug(&self, message: &str) {
        tracing::debug!("{}{}", self.prefix, message);
    }

    pub fn error(&self, err: &Error) {
        tracing::error!("{}{}", self.prefix, err);
    }
}

/// Turn off ANSI colors when stdout is not a terminal
pub fn configure_color(stdout_is_terminal: bool) {
    if !stdout_is_terminal {
        colored::control::set_override(false);
    }
}

/// Main application entry point
pub fn run(args: &Args) -> ExitCode {
    configure_color(io::stdout().is_terminal());

    let (config, key) = match prepare(args) {
        Ok(prepared) => prepared,
        Err(err) => return fail(&LogContext::default(), err),
    };

    let log = LogContext::for_ticket(&key);
    match JiraClient::new(&config).and_then(|client| ship(args, &client, &key, &log)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => fail(&log, err),
    }
}

fn fail(log: &LogContext, err: Error) -> ExitCode {
    log.error(&err);
    ExitCode::from(err.exit_code())
}

/// Load the config and work out which ticket to use
fn prepare(args: &Args) -> Result<(Config, TicketKey)> {
    let config = Config::load(&args.config)?;
    let project_key = config.project_key();

    let number = match &args.ticket {
        Some(ticket) => prompt::validate_ticket_number(ticket)?,
        None => {
            let stdin = io::stdin();
            prompt::prompt_ticket_number(&project_key, &mut stdin.lock(), &mut io::stdout())?
        }
    };

    Ok((config, TicketKey::new(project_key, number)))
}

/// Fetch the ticket and commit with its title and description
fn ship(args: &Args, client: &JiraClient, key: &TicketKey, log: &LogContext) -> Result<()> {
    log.debug(&format!("GET {}", client.issue_url(key)));

    let info = client.fetch_ticket(key)?;
    log.debug(&format!("title: {}", info.title));

    log.debug(&format!("running git commit -m {:?}", info.title));
    GitCommitter::new().with_dry_run(args.dry_run).commit(&info)?;

    if !args.dry_run {
        println!("{} Committed {}: {}", "+".bright_green(), key, info.title.bright_cyan());
    }
    Ok(())
}
