//! # Strata
//!
//! Security metadata for content documents, kept in sync between the draft
//! and live workspaces of a hierarchical content repository.
//!
//! ## Overview
//!
//! Documents carry a role permission map: for every role id, a flag per
//! permission of the configured [`PermissionSchema`]. In the repository the
//! map is stored as one multi-valued property per role:
//!
//! ```text
//! sec:role-1 = ["view", "add", "edit"]
//! sec:role-2 = ["view", "edit"]
//! ```
//!
//! The [`SecuritySubscriber`] hooks into the document pipeline:
//!
//! - **hydrate**: decodes the role properties of a loaded node into the
//!   document's permission map
//! - **persist**: encodes the document's map onto the draft node and the
//!   node at the same path in the live workspace, removing properties of
//!   roles that are no longer part of the map
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── document.rs       # Document and security capability traits
//! ├── events.rs         # Hydrate/persist events and the subscriber trait
//! └── security/
//!     ├── codec.rs      # Role property naming and permission encoding
//!     ├── reconciler.rs # Write/remove planning for a single node
//!     └── subscriber.rs # Draft + live coordination
//! ```
//!
//! ## Example
//!
//! ```
//! use strata::{ContentDocument, PermissionCodec, PersistEvent, SecuritySubscriber};
//! use strata_core::PermissionSchema;
//! use strata_repository::{MemorySession, Node, Session};
//!
//! let schema = PermissionSchema::new([("view", 64), ("edit", 16)]).unwrap();
//! let codec = PermissionCodec::new(schema, "sec:role-");
//!
//! let mut draft = MemorySession::new("default");
//! let mut live = MemorySession::new("default_live");
//! draft.add_node("/pages/home").unwrap();
//! live.add_node("/pages/home").unwrap();
//!
//! let mut document = ContentDocument::new("Home").with_path("/pages/home");
//! document.grant(1, "view");
//!
//! let mut subscriber = SecuritySubscriber::new(codec, &mut live);
//! let node = draft.node_mut("/pages/home").unwrap();
//! subscriber
//!     .handle_persist(&mut PersistEvent::new(&mut document, node))
//!     .unwrap();
//!
//! assert!(live.node("/pages/home").unwrap().has_property("sec:role-1"));
//! ```

pub mod document;
pub mod events;
pub mod security;

pub use document::{ContentDocument, Document, SecurityBehavior, UnsecuredDocument};
pub use events::{HydrateEvent, LifecycleSubscriber, PersistEvent};
pub use security::{PermissionCodec, ReconcileOutcome, ReconcilePlan, SecuritySubscriber};

// Re-export workspace crates for convenience
pub use strata_config;
pub use strata_core;
pub use strata_repository;

pub use strata_core::{PermissionFlags, PermissionSchema, RoleId, RolePermissions};
