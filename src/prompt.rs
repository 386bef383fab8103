use std::io::{BufRead, Write};

use colored::Colorize;
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Error, Result};

lazy_static! {
    static ref TICKET_NUMBER: Regex = Regex::new(r"^[0-9]+$").unwrap();
}

/// Ask for the ticket number of `project_key` and read a single line
///
/// There is no retry: anything other than a plain number is an
/// [`Error::Input`].
pub fn prompt_ticket_number<R, W>(project_key: &str, reader: &mut R, writer: &mut W) -> Result<String>
where
    R: BufRead,
    W: Write,
{
    write!(writer, "{} Enter {} number: ", ">".bright_green(), project_key)
        .and_then(|_| writer.flush())
        .map_err(|e| Error::Input(format!("cannot write prompt: {}", e)))?;

    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .map_err(|e| Error::Input(format!("cannot read input: {}", e)))?;
    if read == 0 {
        return Err(Error::Input("no input received".into()));
    }

    validate_ticket_number(&line)
}

/// Trim `input` and accept it only if it is made of ASCII digits
pub fn validate_ticket_number(input: &str) -> Result<String> {
    let sanitized = input.trim();
    if !TICKET_NUMBER.is_match(sanitized) {
        return Err(Error::Input("input must be a number".into()));
    }
    Ok(sanitized.to_string())
}
