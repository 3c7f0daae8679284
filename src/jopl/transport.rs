//! Blocking HTTP transport bound to a resolved port and access token.
//!
//! Every authenticated call carries the token as a query parameter. Responses
//! are classified into success, not-found, API error (other 4xx/5xx), and
//! unexpected (anything outside both), matching the error taxonomy in
//! `error.rs`.

use std::time::Duration;

use reqwest::blocking::{Client as HttpClient, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{JoplError, Result};

/// Per-request ceiling, distinct from the pairing poll ceiling.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

const USER_AGENT: &str = concat!("jopl/", env!("CARGO_PKG_VERSION"));

/// Builds the blocking client shared by discovery and the session.
pub(crate) fn http_client() -> Result<HttpClient> {
    Ok(HttpClient::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()?)
}

pub struct Transport {
    http: HttpClient,
    port: u16,
    token: String,
}

impl Transport {
    pub fn new(http: HttpClient, port: u16, token: String) -> Self {
        Self { http, port, token }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    fn url(&self, path: &str) -> String {
        format!("http://localhost:{}/{}", self.port, path)
    }

    pub fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        tracing::debug!(path, "GET");
        let resp = self
            .http
            .get(self.url(path))
            .query(&[("token", self.token.as_str())])
            .query(query)
            .send()?;
        decode(resp)
    }

    pub fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        tracing::debug!(path, "POST");
        let resp = self
            .http
            .post(self.url(path))
            .query(&[("token", self.token.as_str())])
            .json(body)
            .send()?;
        decode(resp)
    }

    /// POST where the caller only cares that the call succeeded.
    pub fn post_ok<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        tracing::debug!(path, "POST");
        let resp = self
            .http
            .post(self.url(path))
            .query(&[("token", self.token.as_str())])
            .json(body)
            .send()?;
        expect_ok(resp)
    }

    pub fn put_ok<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        tracing::debug!(path, "PUT");
        let resp = self
            .http
            .put(self.url(path))
            .query(&[("token", self.token.as_str())])
            .json(body)
            .send()?;
        expect_ok(resp)
    }

    pub fn delete(&self, path: &str) -> Result<()> {
        tracing::debug!(path, "DELETE");
        let resp = self
            .http
            .delete(self.url(path))
            .query(&[("token", self.token.as_str())])
            .send()?;
        expect_ok(resp)
    }
}

/// Decodes a JSON body on success, classifies everything else.
pub(crate) fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let status = resp.status();
    tracing::debug!(status = %status, url = %resp.url(), "response");
    if status.is_success() {
        return Ok(resp.json()?);
    }
    Err(classify(status, resp))
}

fn expect_ok(resp: Response) -> Result<()> {
    let status = resp.status();
    tracing::debug!(status = %status, url = %resp.url(), "response");
    if status.is_success() {
        return Ok(());
    }
    Err(classify(status, resp))
}

fn classify(status: StatusCode, resp: Response) -> JoplError {
    let body = resp.text().unwrap_or_default();
    if status == StatusCode::NOT_FOUND {
        // Callers rename this with the resource kind and ID they asked for.
        JoplError::NotFound("resource".to_string())
    } else if status.is_client_error() || status.is_server_error() {
        JoplError::Api {
            status: status.as_u16(),
            body,
        }
    } else {
        JoplError::Unexpected {
            status: status.as_u16(),
            body,
        }
    }
}
