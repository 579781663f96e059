//! Security subscriber keeping draft and live role properties in sync.

use crate::events::{HydrateEvent, LifecycleSubscriber, PersistEvent};
use crate::security::codec::PermissionCodec;
use crate::security::reconciler::{ReconcileOutcome, reconcile};
use strata_core::{RepositoryResult, RolePermissions};
use strata_observability::{
    track_document_hydrated, track_properties_removed, track_properties_written,
};
use strata_repository::Session;
use tracing::{debug, info, instrument, warn};

/// Workspace label of the event node in logs and metrics.
const DRAFT_LABEL: &str = "draft";

/// Maps role permission properties to and from documents.
///
/// The subscriber keeps no state between events. The live session is
/// borrowed or shared from the caller; the subscriber only resolves nodes
/// through it.
pub struct SecuritySubscriber<S> {
    codec: PermissionCodec,
    live_session: S,
}

impl<S: Session> SecuritySubscriber<S> {
    pub fn new(codec: PermissionCodec, live_session: S) -> Self {
        Self {
            codec,
            live_session,
        }
    }

    pub fn codec(&self) -> &PermissionCodec {
        &self.codec
    }

    /// Rebuilds the document's permission map from the event node.
    #[instrument(skip_all, fields(node.path = %event.node().path()))]
    pub fn handle_hydrate(&self, event: &mut HydrateEvent<'_>) -> RepositoryResult<()> {
        let node = event.node();
        let Some(security) = event.document_mut().security_mut() else {
            debug!("Document has no security behavior, skipping hydrate");
            return Ok(());
        };

        let mut permissions = RolePermissions::new();
        for property in self.codec.role_properties(node)? {
            let granted = PermissionCodec::decode_value(&property.value);
            match self.codec.decode(&property.name, granted.as_slice()) {
                Some((role, flags)) => {
                    permissions.insert(role, flags);
                }
                None => {
                    warn!(property = %property.name, "Ignoring role property without a role id");
                }
            }
        }

        debug!(roles = permissions.len(), "Hydrated document permissions");
        track_document_hydrated(permissions.len());
        security.set_permissions(permissions);

        Ok(())
    }

    /// Writes the document's permission map to the draft node and, for
    /// documents with a path, to the node at that path in the live session.
    ///
    /// Each node is planned against its own role properties, so the two
    /// trees may start out different.
    ///
    /// # Errors
    ///
    /// Propagates repository failures, including a live node that cannot be
    /// resolved for the document's path.
    #[instrument(skip_all, fields(node.path = %event.node().path()))]
    pub fn handle_persist(&mut self, event: &mut PersistEvent<'_>) -> RepositoryResult<()> {
        let document = event.document();
        let Some(security) = document.security() else {
            debug!("Document has no security behavior, skipping persist");
            return Ok(());
        };
        let permissions = security.permissions().clone();
        let path = document.path().map(str::to_owned);

        let draft = reconcile(&self.codec, event.node_mut(), &permissions)?;
        record(DRAFT_LABEL, draft);

        let Some(path) = path else {
            debug!("Document has no path, live workspace left untouched");
            return Ok(());
        };

        let live_node = self.live_session.node_mut(&path)?;
        let live = reconcile(&self.codec, live_node, &permissions)?;
        record(self.live_session.workspace(), live);

        info!(
            live.path = %path,
            roles = permissions.len(),
            draft.removed = draft.removed,
            live.removed = live.removed,
            "Synchronized document permissions"
        );

        Ok(())
    }
}

impl<S: Session> LifecycleSubscriber for SecuritySubscriber<S> {
    fn on_hydrate(&mut self, event: &mut HydrateEvent<'_>) -> RepositoryResult<()> {
        self.handle_hydrate(event)
    }

    fn on_persist(&mut self, event: &mut PersistEvent<'_>) -> RepositoryResult<()> {
        self.handle_persist(event)
    }
}

fn record(workspace: &str, outcome: ReconcileOutcome) {
    debug!(
        workspace,
        written = outcome.written,
        removed = outcome.removed,
        "Reconciled role properties"
    );
    track_properties_written(workspace, outcome.written);
    track_properties_removed(workspace, outcome.removed);
}
