//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the cache core:
//! - Logging and tracing infrastructure
//! - Runtime error types
//!
//! ## Overview
//!
//! This crate contains the runtime utilities the other crates depend on at
//! wiring time. It establishes the logging conventions used throughout the
//! system; the domain crates themselves only emit through `tracing` macros.

pub mod error;
pub mod logging;

pub use error::{Error, Result};
