//! Node and session traits.
//!
//! Both traits are object safe so the pipeline can hand out `&mut dyn Node`
//! regardless of which repository backend produced it.

use serde::{Deserialize, Serialize};
use strata_core::RepositoryResult;

/// A value stored in a node property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Strings(Vec<String>),
    String(String),
    Long(i64),
    Boolean(bool),
}

impl From<Vec<String>> for PropertyValue {
    fn from(values: Vec<String>) -> Self {
        Self::Strings(values)
    }
}

impl From<Vec<&str>> for PropertyValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Strings(values.into_iter().map(String::from).collect())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// Snapshot of a single property read from a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub value: PropertyValue,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A property container at an absolute path in a repository tree.
pub trait Node {
    /// Absolute path of the node.
    fn path(&self) -> &str;

    /// Properties whose name matches `pattern`, in name order.
    ///
    /// See [`crate::pattern`] for the pattern syntax.
    fn properties(&self, pattern: &str) -> RepositoryResult<Vec<Property>>;

    /// Reads a property.
    ///
    /// # Errors
    ///
    /// `RepositoryError::PropertyNotFound` when the property does not exist.
    fn property(&self, name: &str) -> RepositoryResult<Property>;

    fn has_property(&self, name: &str) -> bool;

    /// Creates or overwrites a property.
    fn set_property(&mut self, name: &str, value: PropertyValue) -> RepositoryResult<()>;

    /// Removes a property.
    ///
    /// # Errors
    ///
    /// `RepositoryError::PropertyNotFound` when the property does not exist.
    fn remove_property(&mut self, name: &str) -> RepositoryResult<()>;
}

/// One workspace of a content repository, resolving nodes by path.
pub trait Session {
    /// Name of the workspace this session is bound to (e.g. `live`).
    fn workspace(&self) -> &str;

    /// # Errors
    ///
    /// `RepositoryError::NodeNotFound` when nothing exists at `path`.
    fn node(&self, path: &str) -> RepositoryResult<&dyn Node>;

    /// # Errors
    ///
    /// `RepositoryError::NodeNotFound` when nothing exists at `path`.
    fn node_mut(&mut self, path: &str) -> RepositoryResult<&mut dyn Node>;
}

impl<S: Session + ?Sized> Session for &mut S {
    fn workspace(&self) -> &str {
        (**self).workspace()
    }

    fn node(&self, path: &str) -> RepositoryResult<&dyn Node> {
        (**self).node(path)
    }

    fn node_mut(&mut self, path: &str) -> RepositoryResult<&mut dyn Node> {
        (**self).node_mut(path)
    }
}

impl<S: Session + ?Sized> Session for Box<S> {
    fn workspace(&self) -> &str {
        (**self).workspace()
    }

    fn node(&self, path: &str) -> RepositoryResult<&dyn Node> {
        (**self).node(path)
    }

    fn node_mut(&mut self, path: &str) -> RepositoryResult<&mut dyn Node> {
        (**self).node_mut(path)
    }
}
