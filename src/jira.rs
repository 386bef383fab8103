//! Jira integration for jira-commit
//!
//! Fetches a single issue from the Jira REST API and reduces it to the
//! title and description used for the commit message.
//!
//! The request goes to
//! `https://{organization}.atlassian.net/rest/api/{version}/issue/{KEY}-{number}`
//! with HTTP Basic credentials taken from the config. The whole exchange,
//! from connect to the last byte of the body, must finish within
//! [`REQUEST_TIMEOUT`].

use std::fmt;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tokio::time::timeout;

use crate::config::Config;
use crate::error::{Error, Result};

/// Hard deadline for one issue lookup
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Identifies a ticket, e.g. `PROJ-42`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketKey {
    pub project_key: String,
    pub number: String,
}

impl TicketKey {
    pub fn new(project_key: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            project_key: project_key.into(),
            number: number.into(),
        }
    }
}

impl fmt::Display for TicketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.project_key, self.number)
    }
}

/// The parts of a ticket that end up in the commit message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketInfo {
    pub title: String,
    pub description: String,
}

// Response shape of `GET /rest/api/{version}/issue/{key}`

#[derive(Deserialize, Default)]
struct IssueResponse {
    #[serde(default)]
    fields: Option<Fields>,
    #[serde(default, alias = "errorMessages")]
    error_messages: Option<Vec<String>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize, Default)]
struct Fields {
    #[serde(default)]
    summary: Option<String>,
    /// Plain text in API v2, an Atlassian Document Format tree in v3
    #[serde(default)]
    description: Option<Value>,
}

pub struct JiraClient {
    base_url: String,
    api_version: String,
    user_email: String,
    token: String,
    http: Client,
}

impl JiraClient {
    /// Create a client for the Atlassian Cloud instance named in the config
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = format!("https://{}.atlassian.net", config.organization());
        Self::with_base_url(config, base_url)
    }

    /// Create a client that talks to `base_url` instead of Atlassian Cloud
    pub fn with_base_url(config: &Config, base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder().pool_max_idle_per_host(0).build()?;
        Ok(Self::with_http(config, base_url, http))
    }

    fn with_http(config: &Config, base_url: impl Into<String>, http: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_version: config.api_version(),
            user_email: config.user_email(),
            token: config.token(),
            http,
        }
    }

    /// Client for a server on the loopback interface, bypassing any proxy
    #[cfg(test)]
    pub(crate) fn for_local_server(config: &Config, base_url: impl Into<String>) -> Self {
        let http = Client::builder()
            .pool_max_idle_per_host(0)
            .no_proxy()
            .build()
            .unwrap();
        Self::with_http(config, base_url, http)
    }

    pub fn issue_url(&self, key: &TicketKey) -> String {
        format!("{}/rest/api/{}/issue/{}", self.base_url, self.api_version, key)
    }

    /// Fetch the title and description of `key`
    ///
    /// Runs on a runtime owned by this call, so every connection it opened
    /// is closed by the time it returns. Connections are never pooled, as
    /// they would not survive that runtime.
    ///
    /// # Errors
    ///
    /// * [`Error::Timeout`] if the exchange takes longer than [`REQUEST_TIMEOUT`]
    /// * [`Error::Http`] on any other transport failure
    /// * [`Error::Parse`] if the body is not the expected JSON
    /// * [`Error::Remote`] if Jira answered with an error payload
    pub fn fetch_ticket(&self, key: &TicketKey) -> Result<TicketInfo> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let (status, body) = runtime.block_on(async {
            timeout(REQUEST_TIMEOUT, self.exchange(key))
                .await
                .map_err(|_| Error::Timeout(REQUEST_TIMEOUT.as_secs()))?
        })?;

        match decode_issue(&body) {
            Err(Error::Parse(msg)) if !status.is_success() => {
                Err(Error::Parse(format!("{} (HTTP {})", msg, status.as_u16())))
            }
            other => other,
        }
    }

    /// Send the request and read the whole body
    async fn exchange(&self, key: &TicketKey) -> Result<(StatusCode, String)> {
        let response = self
            .http
            .get(self.issue_url(key))
            .basic_auth(&self.user_email, Some(&self.token))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }
}

/// Decode an issue response body
///
/// Error payloads win over fields: the first of `errorMessages`, then
/// `error`, lower-cased.
pub fn decode_issue(body: &str) -> Result<TicketInfo> {
    let response: IssueResponse = serde_json::from_str(body)?;

    if let Some(first) = response.error_messages.as_ref().and_then(|m| m.first()) {
        return Err(Error::Remote(first.to_lowercase()));
    }
    if let Some(error) = response.error.as_deref().filter(|e| !e.is_empty()) {
        return Err(Error::Remote(error.to_lowercase()));
    }

    let fields = response.fields.unwrap_or_default();
    let description = match fields.description {
        Some(value) => description_text(&value)?,
        None => String::new(),
    };

    Ok(TicketInfo {
        title: fields.summary.unwrap_or_default(),
        description,
    })
}

fn description_text(value: &Value) -> Result<String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s.clone()),
        Value::Object(_) => {
            let mut out = String::new();
            flatten_document(value, &mut out);
            Ok(out.trim_end_matches('\n').to_string())
        }
        other => Err(Error::Parse(format!(
            "invalid response: unexpected description {}",
            other
        ))),
    }
}

/// Append the plain text of an Atlassian Document Format node to `out`
///
/// Block nodes end with a newline; inline nodes are concatenated.
fn flatten_document(node: &Value, out: &mut String) {
    let kind = node.get("type").and_then(Value::as_str).unwrap_or("");

    match kind {
        "text" => {
            if let Some(text) = node.get("text").and_then(Value::as_str) {
                out.push_str(text);
            }
            return;
        }
        "hardBreak" => {
            out.push('\n');
            return;
        }
        "mention" | "emoji" => {
            if let Some(text) = node.pointer("/attrs/text").and_then(Value::as_str) {
                out.push_str(text);
            }
            return;
        }
        _ => {}
    }

    if let Some(children) = node.get("content").and_then(Value::as_array) {
        for child in children {
            flatten_document(child, out);
        }
    }

    if kind != "doc" && !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}
