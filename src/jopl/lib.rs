//! # Jopl Architecture
//!
//! Jopl is a **client library for the Joplin Data API** that happens to ship
//! a CLI binary — not a CLI application with some library code attached.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args/print, wired by main.rs)                   │
//! │  - Parses arguments, renders tables, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session Layer (client.rs)                                  │
//! │  - One Client per process, passed by reference              │
//! │  - Typed operations per resource kind                       │
//! │  - Name-to-ID resolution for note creation                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Protocol Layer (discover.rs, fetch.rs, transport.rs)       │
//! │  - Port probing and the pairing handshake                   │
//! │  - The generic page walker behind every listing             │
//! │  - HTTP, JSON decoding, response classification             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key principle: no I/O assumptions in the library
//!
//! From `client.rs` inward, code takes regular arguments, returns
//! `Result` types, and never writes to stdout/stderr or exits the
//! process. Token persistence is the binary's concern: [`client::Client`]
//! exposes the token it resolved, [`config::JoplConfig`] stores it.
//!
//! ## Module overview
//!
//! - [`client`]: the session object and every resource operation
//! - [`discover`]: port probing and the pairing handshake
//! - [`fetch`]: the paginated fetch loop shared by all listings
//! - [`transport`]: blocking HTTP plus response classification
//! - [`model`]: data-transfer types mirroring the API's JSON schema
//! - [`columns`]: per-entity column tables for table output
//! - [`config`]: the persisted access token
//! - [`error`]: error types

pub mod client;
pub mod columns;
pub mod config;
pub mod discover;
pub mod error;
pub mod fetch;
pub mod model;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;
