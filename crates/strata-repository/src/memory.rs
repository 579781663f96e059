//! In-memory repository backend.
//!
//! Used by the CLI to operate on JSON snapshots and by tests as a stand-in
//! for a real content repository. A [`RepositorySnapshot`] pairs the draft
//! and live workspaces the security subscriber keeps in sync.

use crate::node::{Node, Property, PropertyValue, Session};
use crate::pattern::NamePattern;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strata_core::{RepositoryError, RepositoryResult};
use tracing::debug;
use uuid::Uuid;

pub const DRAFT_WORKSPACE: &str = "default";
pub const LIVE_WORKSPACE: &str = "default_live";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryNode {
    #[serde(default = "Uuid::new_v4")]
    identifier: Uuid,
    #[serde(skip)]
    path: String,
    #[serde(default)]
    properties: BTreeMap<String, PropertyValue>,
}

impl MemoryNode {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            identifier: Uuid::new_v4(),
            path: path.into(),
            properties: BTreeMap::new(),
        }
    }

    pub fn identifier(&self) -> Uuid {
        self.identifier
    }
}

impl Node for MemoryNode {
    fn path(&self) -> &str {
        &self.path
    }

    fn properties(&self, pattern: &str) -> RepositoryResult<Vec<Property>> {
        let pattern = NamePattern::new(pattern)?;
        Ok(self
            .properties
            .iter()
            .filter(|(name, _)| pattern.is_match(name))
            .map(|(name, value)| Property::new(name.clone(), value.clone()))
            .collect())
    }

    fn property(&self, name: &str) -> RepositoryResult<Property> {
        self.properties
            .get(name)
            .map(|value| Property::new(name, value.clone()))
            .ok_or_else(|| RepositoryError::property_not_found(&self.path, name))
    }

    fn has_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    fn set_property(&mut self, name: &str, value: PropertyValue) -> RepositoryResult<()> {
        debug!(node.path = %self.path, property = %name, "Setting property");
        self.properties.insert(name.to_string(), value);
        Ok(())
    }

    fn remove_property(&mut self, name: &str) -> RepositoryResult<()> {
        match self.properties.remove(name) {
            Some(_) => {
                debug!(node.path = %self.path, property = %name, "Removed property");
                Ok(())
            }
            None => Err(RepositoryError::property_not_found(&self.path, name)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SessionRecord", into = "SessionRecord")]
pub struct MemorySession {
    workspace: String,
    nodes: BTreeMap<String, MemoryNode>,
}

#[derive(Serialize, Deserialize)]
struct SessionRecord {
    #[serde(default = "default_workspace")]
    workspace: String,
    #[serde(default)]
    nodes: BTreeMap<String, MemoryNode>,
}

fn default_workspace() -> String {
    DRAFT_WORKSPACE.to_string()
}

impl From<SessionRecord> for MemorySession {
    fn from(record: SessionRecord) -> Self {
        let nodes = record
            .nodes
            .into_iter()
            .map(|(path, mut node)| {
                node.path = path.clone();
                (path, node)
            })
            .collect();

        Self {
            workspace: record.workspace,
            nodes,
        }
    }
}

impl From<MemorySession> for SessionRecord {
    fn from(session: MemorySession) -> Self {
        Self {
            workspace: session.workspace,
            nodes: session.nodes,
        }
    }
}

impl MemorySession {
    pub fn new(workspace: impl Into<String>) -> Self {
        Self {
            workspace: workspace.into(),
            nodes: BTreeMap::new(),
        }
    }

    /// Creates a node at `path`, or returns the one already there.
    ///
    /// # Errors
    ///
    /// `RepositoryError::InvalidPath` unless `path` is absolute.
    pub fn add_node(&mut self, path: &str) -> RepositoryResult<&mut MemoryNode> {
        if !path.starts_with('/') {
            return Err(RepositoryError::InvalidPath(path.to_string()));
        }

        Ok(self
            .nodes
            .entry(path.to_string())
            .or_insert_with(|| MemoryNode::new(path)))
    }

    pub fn get(&self, path: &str) -> Option<&MemoryNode> {
        self.nodes.get(path)
    }
}

impl Session for MemorySession {
    fn workspace(&self) -> &str {
        &self.workspace
    }

    fn node(&self, path: &str) -> RepositoryResult<&dyn Node> {
        self.nodes
            .get(path)
            .map(|node| node as &dyn Node)
            .ok_or_else(|| RepositoryError::NodeNotFound(path.to_string()))
    }

    fn node_mut(&mut self, path: &str) -> RepositoryResult<&mut dyn Node> {
        self.nodes
            .get_mut(path)
            .map(|node| node as &mut dyn Node)
            .ok_or_else(|| RepositoryError::NodeNotFound(path.to_string()))
    }
}

/// The draft and live workspaces of one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySnapshot {
    pub draft: MemorySession,
    pub live: MemorySession,
}

impl RepositorySnapshot {
    pub fn new() -> Self {
        Self {
            draft: MemorySession::new(DRAFT_WORKSPACE),
            live: MemorySession::new(LIVE_WORKSPACE),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for RepositorySnapshot {
    fn default() -> Self {
        Self::new()
    }
}
