//! Conference Central - client for the conference organisation API
//!
//! This crate wraps every call to the remote Conference Central API in one
//! lifecycle: busy flags, a shared status line with debounced auto-clear,
//! stale-response guarding and a login challenge when the API answers 401.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
