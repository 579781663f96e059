//! # Strata Config
//!
//! Configuration types for Strata, loaded from environment variables.
//!
//! - [`security`]: Permission schema and role property naming
//!
//! # Example
//!
//! ```ignore
//! use strata_config::SecurityConfig;
//!
//! let config = SecurityConfig::from_env()?;
//! let schema = config.schema()?;
//! ```

pub mod security;

// Re-export commonly used types at crate root
pub use security::{ConfigError, SecurityConfig};
