//! Document security synchronization.
//!
//! - [`codec`]: Role property names and permission name lists
//! - [`reconciler`]: Writes and removals for the role properties of one node
//! - [`subscriber`]: Hydrate/persist handling across draft and live sessions

pub mod codec;
pub mod reconciler;
pub mod subscriber;

pub use codec::PermissionCodec;
pub use reconciler::{ReconcileOutcome, ReconcilePlan, reconcile};
pub use subscriber::SecuritySubscriber;
