//! Configuration management for the beiramar application.
//!
//! This crate handles loading, validating, and persisting configuration
//! and knows where runtime data lives.
//!
//! # Overview
//!
//! - [`config`]: Core configuration struct and loading logic
//! - [`delays`]: Simulated latency of sign-in and payment
//! - [`persistence`]: Config file reading and writing, data paths
//! - [`error`]: Error types for configuration operations
//!
//! # Configuration Sources (Priority)
//!
//! 1. Local config (`./beiramar.json5` or `./beiramar.json`)
//! 2. User config (`~/.config/beiramar/config.json5` or `~/.config/beiramar/config.json`)
//! 3. Built-in defaults
//!
//! # Example File
//!
//! ```json5
//! {
//!   // "pt" or "en"
//!   language: "en",
//!   storage_dir: "/home/ana/.beiramar",
//!   delays: { login_ms: 600, payment_ms: 2000 },
//! }
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use beiramar_config::Config;
//!
//! # fn example() -> beiramar_config::Result<()> {
//! let config = Config::load()?;
//! println!("Storage in {}", config.storage_dir()?.display());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod delays;
pub mod error;
pub mod persistence;

// Re-export primary types at crate root for convenience
pub use config::Config;
pub use delays::DelayConfig;
pub use error::{ConfigError, Result};
