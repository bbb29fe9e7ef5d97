//! CLI command implementations.
//!
//! # Command Modules
//!
//! - [`api`] - One-shot backend requests (health, run, state, ...)
//! - [`config`] - Configuration management (get, set, list, path)
//! - [`demo`] - Local guidance demo, as a dashboard or a text log
//! - [`plan`] - Mission planner (list, add, remove, move, reorder, ...)
//! - [`view`] - Dashboard fed by REST polling (also `run --dashboard`)
//! - [`watch`] - Live dashboard over the backend WebSocket stream
//! - [`common`] - Text formatters shared by the commands above

pub mod api;
pub mod common;
pub mod config;
pub mod demo;
pub mod plan;
pub mod view;
pub mod watch;
