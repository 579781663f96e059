//! # Strata Repository
//!
//! Abstractions over a hierarchical content repository as seen by the
//! document pipeline, plus an in-memory implementation.
//!
//! - [`node`]: The [`Node`] and [`Session`] traits and property values
//! - [`pattern`]: Property name pattern matching (`sec:role-*`, `a|b`)
//! - [`memory`]: In-memory nodes, sessions, and draft/live snapshots
//!
//! # Example
//!
//! ```
//! use strata_repository::{MemorySession, Node, PropertyValue, Session};
//!
//! let mut session = MemorySession::new("default");
//! session.add_node("/pages/home").unwrap();
//!
//! let node = session.node_mut("/pages/home").unwrap();
//! node.set_property("sec:role-1", PropertyValue::from(vec!["view"])).unwrap();
//!
//! assert!(node.has_property("sec:role-1"));
//! assert_eq!(node.properties("sec:role-*").unwrap().len(), 1);
//! ```

pub mod memory;
pub mod node;
pub mod pattern;

pub use memory::{MemoryNode, MemorySession, RepositorySnapshot};
pub use node::{Node, Property, PropertyValue, Session};
pub use pattern::NamePattern;
pub use strata_core::{RepositoryError, RepositoryResult};
