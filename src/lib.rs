//! Shortlink - a minimalist URL shortener service
//!
//! This library provides the core functionality for the Shortlink service:
//! collision-free short-code allocation, mapping lifecycle management, and
//! the HTTP handlers that expose them.
//!
//! # Architecture
//! - `services`: the short-link registry (core) and HTTP handler services
//! - `storages`: mapping store trait and backends (memory, file)
//! - `config`: environment-driven configuration
//! - `errors`: crate-wide error types
//! - `utils`: code generation and URL validation helpers

pub mod config;
pub mod errors;
pub mod services;
pub mod storages;
pub mod structs;
pub mod utils;
