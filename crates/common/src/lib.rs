//! Shared configuration and error handling for the Lustre storefront client
//!
//! This crate provides common functionality used across the workspace:
//! - Configuration management following 12-factor principles
//! - Error types, including the user-facing message fallback for failed actions

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{Error, Result, FALLBACK_ACTION_MESSAGE};
