use super::nodes::RemoteNode;
use crate::error::Error;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

const API_URL: &str = "https://g.api.mega.co.nz/cs";

/// Transient "try again" code; the API expects the same request re-issued.
const EAGAIN: i64 = -3;
const MAX_RETRIES: u32 = 4;

/// Blocking client for the Mega JSON command API.
///
/// Commands are POSTed one at a time as a single-element array to
/// `cs?id=<seqno>`, with the sequence number incremented per request and the
/// session id appended once logged in. Failures come back as bare negative
/// integers in place of the command result.
pub struct MegaClient {
    http: reqwest::blocking::Client,
    api_url: String,
    sequence: u64,
    session_id: Option<String>,
}

impl MegaClient {
    pub fn new() -> Self {
        Self::with_api_url(API_URL)
    }

    pub fn with_api_url(api_url: &str) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            api_url: api_url.to_string(),
            sequence: 0,
            session_id: None,
        }
    }

    /// Open a session for the account. A refused login surfaces as
    /// `Error::Remote`; callers degrade the account to an empty inventory.
    pub fn login(&mut self, login: &str, password: &str) -> Result<(), Error> {
        let response = self.request(json!({
            "a": "us",
            "user": login,
            "uh": password,
        }))?;

        match response.get("csid").and_then(Value::as_str) {
            Some(sid) => {
                self.session_id = Some(sid.to_string());
                debug!("Opened Mega session for {}", login);
                Ok(())
            }
            None => Err(Error::Remote(format!(
                "login response for {} carried no session id",
                login
            ))),
        }
    }

    /// Fetch the full node listing for the session, keyed by node handle.
    pub fn fetch_nodes(&mut self) -> Result<HashMap<String, RemoteNode>, Error> {
        let response = self.request(json!({ "a": "f", "c": 1, "r": 1 }))?;

        let raw_nodes = response
            .get("f")
            .and_then(Value::as_array)
            .ok_or_else(|| Error::Remote("file listing carried no node array".to_string()))?;

        let mut nodes = HashMap::with_capacity(raw_nodes.len());
        for raw in raw_nodes {
            match serde_json::from_value::<RemoteNode>(raw.clone()) {
                Ok(node) => {
                    nodes.insert(node.handle.clone(), node);
                }
                Err(err) => warn!("Skipping malformed node in listing: {}", err),
            }
        }
        Ok(nodes)
    }

    /// Issue one command, unwrapping the single-element response array and
    /// mapping numeric API errors. EAGAIN is retried with linear backoff.
    fn request(&mut self, command: Value) -> Result<Value, Error> {
        let body = json!([command]);
        let mut attempt = 0;

        loop {
            let mut url = format!("{}?id={}", self.api_url, self.sequence);
            self.sequence += 1;
            if let Some(sid) = &self.session_id {
                url.push_str("&sid=");
                url.push_str(sid);
            }

            let response: Value = self
                .http
                .post(&url)
                .json(&body)
                .send()?
                .error_for_status()?
                .json()?;

            let result = match response {
                Value::Array(mut items) if !items.is_empty() => items.remove(0),
                other => other,
            };

            if let Some(code) = result.as_i64() {
                if code == EAGAIN && attempt < MAX_RETRIES {
                    attempt += 1;
                    thread::sleep(Duration::from_millis(250 * u64::from(attempt)));
                    continue;
                }
                return Err(Error::Remote(describe_api_error(code)));
            }

            return Ok(result);
        }
    }
}

impl Default for MegaClient {
    fn default() -> Self {
        Self::new()
    }
}

fn describe_api_error(code: i64) -> String {
    let reason = match code {
        -1 => "internal error",
        -2 => "invalid arguments",
        -3 => "request failed, retry limit reached",
        -9 => "object not found",
        -15 => "session expired or invalid",
        -16 => "account blocked",
        -18 => "too many concurrent connections",
        _ => "unrecognized error code",
    };
    format!("code {} ({})", code, reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_known_and_unknown_codes() {
        assert_eq!(
            describe_api_error(-9),
            "code -9 (object not found)"
        );
        assert_eq!(
            describe_api_error(-99),
            "code -99 (unrecognized error code)"
        );
    }
}
