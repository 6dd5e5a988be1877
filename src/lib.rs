//! devstack - declarative local development services on Docker Compose
//!
//! devstack lets a developer declare a small set of named backing
//! services (databases, caches, message brokers) for a local
//! development environment, regenerates a Docker Compose file and an
//! `.env` file from that declaration, and forwards lifecycle commands
//! to Docker Compose. It provides:
//!
//! - A compile-time catalog of supported services and stack profiles
//! - A persisted configuration with atomic save semantics
//! - Idempotent compose/env artifact generation
//! - A thin gateway to `docker compose` lifecycle verbs
//! - Optional systemd autostart for the configured stack

pub mod artifact;
pub mod autostart;
pub mod catalog;
pub mod config;
pub mod detect;
pub mod docker;
pub mod error;
pub mod reconcile;

pub use error::{DevstackError, Result};
