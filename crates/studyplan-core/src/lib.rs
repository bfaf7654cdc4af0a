#![forbid(unsafe_code)]
//! studyplan-core library.
//!
//! Chapter records, their JSON ingestion, and project configuration. The
//! graph analysis and optimizer live in `studyplan-solver`.
//!
//! # Conventions
//!
//! - **Errors**: `thiserror` enums for library failures (see [`ingest::IngestError`]),
//!   `anyhow::Result` where a caller only needs context (see [`config`]).
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod ingest;
pub mod model;

pub use model::Chapter;
