use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot read config file {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Parse(String),

    #[error("{0}")]
    Input(String),

    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// Error payload reported by the Jira API, already lower-cased.
    #[error("{0}")]
    Remote(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Command(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Process exit status for this failure. Zero is reserved for success.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::File { .. } => 2,
            Error::Parse(_) => 3,
            Error::Input(_) => 4,
            Error::Timeout(_) => 5,
            Error::Remote(_) => 6,
            Error::Http(_) => 7,
            Error::Command(_) => 8,
            Error::Io(_) => 1,
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Parse(format!("invalid config: {}", err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(format!("invalid response: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
