//! Org chart engine.
//!
//! This crate stores employee records that reference their direct reports by
//! ID, resolves those references into nested reporting hierarchies, counts
//! distinct reports, merges partial updates, and keeps at most one
//! compensation record per employee. An axum router exposes the operations
//! over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod ids;
pub mod models;
pub mod services;
pub mod store;
pub mod telemetry;
