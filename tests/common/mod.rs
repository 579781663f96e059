use std::cell::Cell;
use strata::{PermissionCodec, PermissionFlags, PermissionSchema, RolePermissions};
use strata_core::RepositoryResult;
use strata_repository::{MemoryNode, MemorySession, Node, Property, PropertyValue, Session};

/// Schema used throughout the security tests
#[allow(dead_code)]
pub fn crud_schema() -> PermissionSchema {
    PermissionSchema::new([("view", 64), ("add", 32), ("edit", 16), ("delete", 8)]).unwrap()
}

pub fn crud_codec() -> PermissionCodec {
    PermissionCodec::new(crud_schema(), "sec:role-")
}

#[allow(dead_code)]
pub fn flags(pairs: &[(&str, bool)]) -> PermissionFlags {
    pairs.iter().map(|(n, v)| (n.to_string(), *v)).collect()
}

/// `{1: {view, add, edit granted; delete denied}}`
#[allow(dead_code)]
pub fn editor_permissions() -> RolePermissions {
    let mut permissions = RolePermissions::new();
    permissions.insert(
        1,
        flags(&[
            ("view", true),
            ("add", true),
            ("edit", true),
            ("delete", false),
        ]),
    );
    permissions
}

#[allow(dead_code)]
pub fn strings(values: &[&str]) -> PropertyValue {
    PropertyValue::Strings(values.iter().map(|v| v.to_string()).collect())
}

/// Memory node that records every mutation made through the `Node` trait
#[allow(dead_code)]
pub struct RecordingNode {
    pub inner: MemoryNode,
    pub sets: Vec<(String, PropertyValue)>,
    pub removals: Vec<String>,
}

#[allow(dead_code)]
impl RecordingNode {
    pub fn new(path: &str) -> Self {
        Self {
            inner: MemoryNode::new(path),
            sets: Vec::new(),
            removals: Vec::new(),
        }
    }

    /// Seeds a property without recording it
    pub fn with_property(mut self, name: &str, value: PropertyValue) -> Self {
        self.inner.set_property(name, value).unwrap();
        self
    }
}

impl Node for RecordingNode {
    fn path(&self) -> &str {
        self.inner.path()
    }

    fn properties(&self, pattern: &str) -> RepositoryResult<Vec<Property>> {
        self.inner.properties(pattern)
    }

    fn property(&self, name: &str) -> RepositoryResult<Property> {
        self.inner.property(name)
    }

    fn has_property(&self, name: &str) -> bool {
        self.inner.has_property(name)
    }

    fn set_property(&mut self, name: &str, value: PropertyValue) -> RepositoryResult<()> {
        self.sets.push((name.to_string(), value.clone()));
        self.inner.set_property(name, value)
    }

    fn remove_property(&mut self, name: &str) -> RepositoryResult<()> {
        self.removals.push(name.to_string());
        self.inner.remove_property(name)
    }
}

/// Live session that counts node lookups
#[allow(dead_code)]
pub struct RecordingSession {
    pub inner: MemorySession,
    lookups: Cell<usize>,
}

#[allow(dead_code)]
impl RecordingSession {
    pub fn new(inner: MemorySession) -> Self {
        Self {
            inner,
            lookups: Cell::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.get()
    }
}

impl Session for RecordingSession {
    fn workspace(&self) -> &str {
        self.inner.workspace()
    }

    fn node(&self, path: &str) -> RepositoryResult<&dyn Node> {
        self.lookups.set(self.lookups.get() + 1);
        self.inner.node(path)
    }

    fn node_mut(&mut self, path: &str) -> RepositoryResult<&mut dyn Node> {
        self.lookups.set(self.lookups.get() + 1);
        self.inner.node_mut(path)
    }
}
