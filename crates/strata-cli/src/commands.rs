//! Command implementations for the Strata CLI.

use anyhow::{Context, Result};
use clap::ValueEnum;
use strata::{ContentDocument, HydrateEvent, PermissionCodec, PersistEvent, SecuritySubscriber};
use strata_core::{PermissionSchema, RolePermissions};
use strata_repository::memory::LIVE_WORKSPACE;
use strata_repository::{MemorySession, RepositorySnapshot, Session};
use tracing::info;

/// Workspace of a snapshot to read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Workspace {
    Draft,
    Live,
}

/// Renders the schema as one `name<TAB>bit` line per permission.
pub fn schema_report(schema: &PermissionSchema) -> String {
    schema
        .entries()
        .iter()
        .map(|entry| format!("{}\t{}", entry.name, entry.bit))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reads the permission map stored on the node at `path`.
pub fn hydrate(
    snapshot: &RepositorySnapshot,
    codec: &PermissionCodec,
    path: &str,
    workspace: Workspace,
) -> Result<RolePermissions> {
    let session = match workspace {
        Workspace::Draft => &snapshot.draft,
        Workspace::Live => &snapshot.live,
    };
    let node = session
        .node(path)
        .with_context(|| format!("No node at {} in workspace {}", path, session.workspace()))?;

    // Hydration never consults the live session.
    let subscriber = SecuritySubscriber::new(codec.clone(), MemorySession::new(LIVE_WORKSPACE));
    let mut document = ContentDocument::new(path).with_path(path);
    subscriber
        .handle_hydrate(&mut HydrateEvent::new(&mut document, node))
        .with_context(|| format!("Failed to hydrate permissions of {}", path))?;

    Ok(document.permissions)
}

/// Applies `permissions` to the draft node at `path` and, when `publish` is
/// set, to the live node at the same path.
pub fn persist(
    snapshot: &mut RepositorySnapshot,
    codec: &PermissionCodec,
    path: &str,
    permissions: RolePermissions,
    publish: bool,
) -> Result<()> {
    let RepositorySnapshot { draft, live } = snapshot;

    let mut document = ContentDocument::new(path).with_permissions(permissions);
    if publish {
        document = document.with_path(path);
    }

    let node = draft
        .node_mut(path)
        .with_context(|| format!("No node at {} in the draft workspace", path))?;

    let mut subscriber = SecuritySubscriber::new(codec.clone(), live);
    subscriber
        .handle_persist(&mut PersistEvent::new(&mut document, node))
        .with_context(|| format!("Failed to persist permissions of {}", path))?;

    info!(path = %path, publish, roles = document.permissions.len(), "Persisted permissions");
    Ok(())
}
