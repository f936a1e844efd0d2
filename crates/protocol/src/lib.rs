//! # ag-protocol
//!
//! Shared data models for agent-gallery.
//!
//! This crate defines every serializable structure that crosses the
//! boundary between an entrypoint and its caller:
//! - Entrypoint requests (named and positional arguments, chat messages)
//! - Blocking responses and streaming chunks
//! - Configuration files (`config.toml`, `entrypoints/*.md` front matter)
//!
//! ## Modules
//!
//! - [`request_models`]: Entrypoint requests and chat messages
//! - [`response_models`]: Blocking responses and streaming chunks
//! - [`entrypoint_models`]: Entrypoint definitions from `entrypoints/*.md`
//! - [`config_models`]: Global configuration from config.toml
//!
//! ## Design Principles
//!
//! - Minimal dependencies: serde, ts-rs, uuid and chrono
//! - TypeScript generation: all types derive `TS` for client compatibility
//! - Independent compilation: no dependencies on other agent-gallery crates

pub mod config_models;
pub mod entrypoint_models;
pub mod request_models;
pub mod response_models;

pub use config_models::*;
pub use entrypoint_models::*;
pub use request_models::*;
pub use response_models::*;
