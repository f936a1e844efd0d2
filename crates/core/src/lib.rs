//! # ag-core
//!
//! Entrypoint convention and delegate adapters for agent-gallery.
//!
//! This crate provides:
//! - Input resolution from loosely-typed caller arguments
//! - Agent abstraction layer and adapter implementations
//! - Response normalization into plain strings and uniform chunks
//! - Entrypoints and the registry that serves them
//! - Configuration loading from the `.agent-gallery/` directory
//!
//! ## Modules
//!
//! - [`resolver`]: Candidate-field input resolution
//! - [`response`]: Delegate output shapes and normalization
//! - [`agents`]: Agent trait and adapter implementations
//! - [`workflow`]: State graph with fixed and conditional edges
//! - [`storage`]: Document stores with scoped acquisition and release
//! - [`entrypoint`]: Entrypoints and the entrypoint registry
//! - [`config`]: Configuration loading and env layering

pub mod agents;
pub mod config;
pub mod entrypoint;
pub mod resolver;
pub mod response;
pub mod storage;
pub mod workflow;
