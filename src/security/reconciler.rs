//! Per-node reconciliation of role properties.
//!
//! Every role present in the desired map is written, even when it grants
//! nothing. A role property is only removed when its role is missing from the
//! desired map altogether.

use crate::security::codec::PermissionCodec;
use strata_core::{RepositoryResult, RolePermissions};
use strata_repository::{Node, PropertyValue};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcilePlan {
    /// Property name and encoded permission names, in role order.
    pub writes: Vec<(String, Vec<String>)>,
    /// Existing role properties whose role is no longer in the map.
    pub removals: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub written: usize,
    pub removed: usize,
}

impl ReconcilePlan {
    /// Plans the writes for `desired` and the removals among `existing`
    /// role property names.
    pub fn new<'a, I>(codec: &PermissionCodec, existing: I, desired: &RolePermissions) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let writes = desired
            .iter()
            .map(|(role, flags)| (codec.property_name(*role), codec.encode(flags)))
            .collect();

        // A suffix that is not a role id can never be in the map either.
        let removals = existing
            .into_iter()
            .filter(|name| {
                codec
                    .role_id(name)
                    .is_none_or(|role| !desired.contains_key(&role))
            })
            .map(String::from)
            .collect();

        Self { writes, removals }
    }

    /// Plans against the role properties currently stored on `node`.
    pub fn for_node(
        codec: &PermissionCodec,
        node: &dyn Node,
        desired: &RolePermissions,
    ) -> RepositoryResult<Self> {
        let existing = codec.role_properties(node)?;
        Ok(Self::new(
            codec,
            existing.iter().map(|property| property.name.as_str()),
            desired,
        ))
    }

    /// Writes every planned property, then removes each planned removal that
    /// is still present on `node`.
    pub fn apply(&self, node: &mut dyn Node) -> RepositoryResult<ReconcileOutcome> {
        let mut outcome = ReconcileOutcome::default();

        for (name, granted) in &self.writes {
            node.set_property(name, PropertyValue::Strings(granted.clone()))?;
            outcome.written += 1;
        }

        for name in &self.removals {
            if !node.has_property(name) {
                debug!(node.path = %node.path(), property = %name, "Role property already absent");
                continue;
            }
            node.remove_property(name)?;
            outcome.removed += 1;
        }

        Ok(outcome)
    }
}

/// Plans against `node`'s own role properties and applies the plan.
pub fn reconcile(
    codec: &PermissionCodec,
    node: &mut dyn Node,
    desired: &RolePermissions,
) -> RepositoryResult<ReconcileOutcome> {
    ReconcilePlan::for_node(codec, node, desired)?.apply(node)
}
