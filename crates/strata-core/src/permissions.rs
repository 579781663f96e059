//! Permission bitmask schema for document security.
//!
//! A schema is the ordered list of permission names a role can be granted on a
//! document, each paired with a unique power-of-two bit. The order matters: it
//! is the order in which granted names are written back to the repository.
//!
//! # Example
//!
//! ```
//! use strata_core::permissions::{self, PermissionSchema};
//!
//! let schema = PermissionSchema::default();
//! assert_eq!(schema.bit(permissions::VIEW), Some(64));
//!
//! let flags = schema.flags_from_mask(64 | 16);
//! assert_eq!(flags.get(permissions::EDIT), Some(&true));
//! assert_eq!(flags.get(permissions::ADD), Some(&false));
//! ```

use crate::errors::SchemaError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

// =============================================================================
// Default permission names
// =============================================================================

/// Permission to view a document
pub const VIEW: &str = "view";
/// Permission to add children below a document
pub const ADD: &str = "add";
/// Permission to edit a document
pub const EDIT: &str = "edit";
/// Permission to delete a document
pub const DELETE: &str = "delete";
/// Permission to archive a document
pub const ARCHIVE: &str = "archive";
/// Permission to publish a document
pub const LIVE: &str = "live";
/// Permission to change the permissions of a document
pub const SECURITY: &str = "security";

/// Integer identifier of a role.
pub type RoleId = i64;

/// Permission name to granted flag.
pub type PermissionFlags = BTreeMap<String, bool>;

/// Role id to the flags granted to that role.
pub type RolePermissions = BTreeMap<RoleId, PermissionFlags>;

/// One named permission and its bit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionBit {
    pub name: String,
    pub bit: u64,
}

/// Ordered, immutable mapping from permission name to a unique bit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PermissionBit>", into = "Vec<PermissionBit>")]
pub struct PermissionSchema {
    entries: Vec<PermissionBit>,
}

impl PermissionSchema {
    /// Builds a schema from `(name, bit)` pairs in the given order.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] when the schema is empty, a name is empty or
    /// repeated, or a bit is zero, not a power of two, or already taken.
    pub fn new<I, N>(entries: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = (N, u64)>,
        N: Into<String>,
    {
        let entries: Vec<PermissionBit> = entries
            .into_iter()
            .map(|(name, bit)| PermissionBit {
                name: name.into(),
                bit,
            })
            .collect();

        Self::try_from(entries)
    }

    /// Permission names in schema order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    pub fn entries(&self) -> &[PermissionBit] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bit(name).is_some()
    }

    /// Bit assigned to `name`, if the schema knows it.
    pub fn bit(&self, name: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.bit)
    }

    /// Combined bitmask of every granted permission in `flags`.
    ///
    /// Names outside the schema contribute nothing.
    pub fn mask(&self, flags: &PermissionFlags) -> u64 {
        self.entries
            .iter()
            .filter(|entry| flags.get(&entry.name).copied().unwrap_or(false))
            .fold(0, |mask, entry| mask | entry.bit)
    }

    /// Expands a bitmask into a flag for every permission in the schema.
    pub fn flags_from_mask(&self, mask: u64) -> PermissionFlags {
        self.entries
            .iter()
            .map(|entry| (entry.name.clone(), mask & entry.bit != 0))
            .collect()
    }

    /// Flags for every permission in the schema, all set to `granted`.
    pub fn uniform_flags(&self, granted: bool) -> PermissionFlags {
        self.entries
            .iter()
            .map(|entry| (entry.name.clone(), granted))
            .collect()
    }
}

impl TryFrom<Vec<PermissionBit>> for PermissionSchema {
    type Error = SchemaError;

    fn try_from(entries: Vec<PermissionBit>) -> Result<Self, Self::Error> {
        if entries.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut names = HashSet::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            if entry.name.is_empty() {
                return Err(SchemaError::EmptyName);
            }
            if !names.insert(entry.name.as_str()) {
                return Err(SchemaError::DuplicateName(entry.name.clone()));
            }
            if !entry.bit.is_power_of_two() {
                return Err(SchemaError::NotPowerOfTwo {
                    name: entry.name.clone(),
                    bit: entry.bit,
                });
            }
            if let Some(first) = entries[..index].iter().find(|e| e.bit == entry.bit) {
                return Err(SchemaError::DuplicateBit {
                    first: first.name.clone(),
                    second: entry.name.clone(),
                    bit: entry.bit,
                });
            }
        }

        Ok(Self { entries })
    }
}

impl From<PermissionSchema> for Vec<PermissionBit> {
    fn from(schema: PermissionSchema) -> Self {
        schema.entries
    }
}

impl Default for PermissionSchema {
    fn default() -> Self {
        let entries = [
            (VIEW, 64),
            (ADD, 32),
            (EDIT, 16),
            (DELETE, 8),
            (ARCHIVE, 4),
            (LIVE, 2),
            (SECURITY, 1),
        ]
        .into_iter()
        .map(|(name, bit)| PermissionBit {
            name: name.to_string(),
            bit,
        })
        .collect();

        Self { entries }
    }
}
