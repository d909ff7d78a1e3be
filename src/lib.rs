//! # chromenet
//!
//! A Chromium-inspired HTTP networking library for Rust.
//!
//! `chromenet` provides a high-fidelity implementation of browser networking
//! behavior, including connection pooling, cookie management, TLS security,
//! and browser fingerprint emulation.
//!
//! ## Features
//!
//! - **Connection Pooling**: 6 connections per host limit (Chromium-compatible)
//! - **HTTP/1.1 & HTTP/2**: Full protocol support with multiplexing
//! - **Cookie Management**: RFC 6265 compliant with PSL validation
//! - **Browser Emulation**: impersonation targets, ordered headers, H2 fingerprinting
//! - **Proxy Support**: HTTP, HTTPS, and SOCKS5 proxies
//! - **Option Compiler**: deterministic, ordered compilation of every
//!   per-request override into one transport program
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use chromenet::session::Session;
//!
//! fn main() {
//!     let session = Session::builder().impersonate("chrome").build();
//!     let response = session.get("https://example.com").send().unwrap();
//!     println!("Status: {}", response.status());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Core types and error definitions
//! - [`error`] - The user-facing `RequestError` hierarchy
//! - [`cookie`] - Cookie jar, RFC 6265 matching, and PSL checks
//! - [`fingerprint`] - Impersonation target catalog and JA3/Akamai parsing
//! - [`option`] - The Option Compiler and per-request override types
//! - [`http`] - HTTP transactions, headers, and body handling
//! - [`engine`] - Transfer scheduling and lifecycle tracking
//! - [`response`] - The response type and streaming body access
//! - [`session`] - `Session`/`AsyncSession`, the user-facing request surface
//! - [`socket`] - Connection pooling, proxy, and TLS sockets
//! - [`ws`] - WebSocket upgrade and framing
//!
//! ## Security
//!
//! This library implements several security features from Chromium:
//! - Public Suffix List validation to prevent supercookie attacks
//! - Certificate verification via the platform/WebPKI trust store
//! - Redirect cycle detection and credential stripping

pub mod base;
pub mod cookie;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod http;
pub mod option;
pub mod response;
pub mod session;
pub mod socket;
pub mod ws;

mod emulation;
