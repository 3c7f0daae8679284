//! Port discovery and the pairing handshake.
//!
//! Joplin's Web Clipper service listens on the first free port in a fixed
//! range. Discovery probes that range in ascending order and selects the
//! first port that answers the liveness endpoint. When no access token is
//! configured, pairing requests a short-lived auth token and polls the
//! approval endpoint until the user accepts or rejects the request inside
//! Joplin.

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client as HttpClient;
use serde::Deserialize;

use crate::error::{JoplError, Result};
use crate::transport;

pub const PORT_MIN: u16 = 41184;
pub const PORT_MAX: u16 = 41194;

const APPROVAL_MAX_ATTEMPTS: u32 = 20;
const APPROVAL_POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Deserialize)]
struct AuthTokenReply {
    auth_token: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AuthCheckReply {
    status: String,
    token: String,
}

/// Probes the fixed port range and returns the first live port.
pub fn find_port(http: &HttpClient) -> Result<u16> {
    probe_ports(http, PORT_MIN..=PORT_MAX)
}

fn probe_ports(http: &HttpClient, ports: impl IntoIterator<Item = u16>) -> Result<u16> {
    let mut last_err: Option<JoplError> = None;

    for port in ports {
        match http.get(format!("http://localhost:{port}/ping")).send() {
            Ok(resp) if resp.status().is_success() => {
                tracing::debug!(port, "instance answered ping");
                return Ok(port);
            }
            Ok(resp) => {
                tracing::debug!(port, status = %resp.status(), "ping refused");
                last_err = Some(JoplError::Api {
                    status: resp.status().as_u16(),
                    body: resp.text().unwrap_or_default(),
                });
            }
            Err(err) => {
                last_err = Some(err.into());
            }
        }
    }

    Err(last_err.unwrap_or(JoplError::AppNotFound))
}

/// Runs the pairing handshake against a discovered port and returns the
/// approved access token.
pub fn pair(http: &HttpClient, port: u16) -> Result<String> {
    let auth_token = request_auth_token(http, port)?;
    tracing::info!("pairing requested; approve this client inside Joplin");
    poll_approval(http, port, &auth_token, APPROVAL_POLL_INTERVAL)
}

fn request_auth_token(http: &HttpClient, port: u16) -> Result<String> {
    let resp = http.post(format!("http://localhost:{port}/auth")).send()?;
    let reply: AuthTokenReply = transport::decode(resp)?;
    Ok(reply.auth_token)
}

fn poll_approval(
    http: &HttpClient,
    port: u16,
    auth_token: &str,
    interval: Duration,
) -> Result<String> {
    let mut waits = 0u32;

    loop {
        let resp = http
            .get(format!("http://localhost:{port}/auth/check"))
            .query(&[("auth_token", auth_token)])
            .send()?;
        let reply: AuthCheckReply = transport::decode(resp)?;

        match reply.status.as_str() {
            "accepted" => return Ok(reply.token),
            "rejected" => return Err(JoplError::PairingRejected),
            "waiting" => {
                waits += 1;
                if waits >= APPROVAL_MAX_ATTEMPTS {
                    return Err(JoplError::PairingTimeout(APPROVAL_MAX_ATTEMPTS));
                }
                tracing::debug!(attempt = waits, "approval still pending");
                thread::sleep(interval);
            }
            other => return Err(JoplError::PairingStatus(other.to_owned())),
        }
    }
}
