//! Lifecycle events of the document persistence pipeline.
//!
//! The pipeline calls [`LifecycleSubscriber::on_hydrate`] after a document is
//! loaded from a node and [`LifecycleSubscriber::on_persist`] while a document
//! is written to its node. Both run synchronously inside the pipeline call.

use crate::document::Document;
use strata_core::RepositoryResult;
use strata_repository::Node;

/// A document was loaded from `node`.
pub struct HydrateEvent<'a> {
    document: &'a mut dyn Document,
    node: &'a dyn Node,
}

impl<'a> HydrateEvent<'a> {
    pub fn new(document: &'a mut dyn Document, node: &'a dyn Node) -> Self {
        Self { document, node }
    }

    pub fn document(&self) -> &dyn Document {
        &*self.document
    }

    pub fn document_mut(&mut self) -> &mut dyn Document {
        &mut *self.document
    }

    pub fn node(&self) -> &'a dyn Node {
        self.node
    }
}

/// A document is being written to `node` in the draft workspace.
pub struct PersistEvent<'a> {
    document: &'a mut dyn Document,
    node: &'a mut dyn Node,
}

impl<'a> PersistEvent<'a> {
    pub fn new(document: &'a mut dyn Document, node: &'a mut dyn Node) -> Self {
        Self { document, node }
    }

    pub fn document(&self) -> &dyn Document {
        &*self.document
    }

    pub fn node(&self) -> &dyn Node {
        &*self.node
    }

    pub fn node_mut(&mut self) -> &mut dyn Node {
        &mut *self.node
    }
}

/// Receiver of document lifecycle events.
///
/// Errors are returned to the pipeline unchanged.
pub trait LifecycleSubscriber {
    fn on_hydrate(&mut self, event: &mut HydrateEvent<'_>) -> RepositoryResult<()>;

    fn on_persist(&mut self, event: &mut PersistEvent<'_>) -> RepositoryResult<()>;
}
