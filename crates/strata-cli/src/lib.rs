//! # Strata CLI
//!
//! Administrative commands over a JSON repository snapshot.
//!
//! This library crate provides the command implementations used by the CLI
//! binary, so they can be exercised without touching the filesystem.
//!
//! ## Usage
//!
//! ```ignore
//! use strata_cli::commands;
//!
//! let mut snapshot = RepositorySnapshot::from_json(&json)?;
//! commands::persist(&mut snapshot, &codec, "/pages/home", permissions, true)?;
//! ```

pub mod commands;
