//! helloserv - a minimal greeting and health-check HTTP server
//!
//! Exposes a fixed root greeting, a `/health` liveness probe for
//! orchestration tooling, and an optional static-file document root,
//! built on tokio and hyper.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
