//! # Strata Core
//!
//! Core types and errors shared by every Strata crate.
//!
//! - [`errors`]: Repository and schema error types
//! - [`permissions`]: The permission bitmask schema and role permission maps
//!
//! # Example
//!
//! ```
//! use strata_core::permissions::{PermissionFlags, PermissionSchema};
//!
//! let schema = PermissionSchema::new([("view", 64), ("add", 32), ("edit", 16), ("delete", 8)])
//!     .unwrap();
//!
//! let mut flags = PermissionFlags::new();
//! flags.insert("view".to_string(), true);
//! flags.insert("edit".to_string(), true);
//!
//! assert_eq!(schema.mask(&flags), 80);
//! ```

pub mod errors;
pub mod permissions;

// Re-export commonly used types at crate root
pub use errors::{RepositoryError, RepositoryResult, SchemaError};
pub use permissions::{PermissionFlags, PermissionSchema, RoleId, RolePermissions};
