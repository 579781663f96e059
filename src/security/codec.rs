//! Role property naming and permission encoding.
//!
//! Each role is stored as one property `<prefix><role id>` holding the names
//! of its granted permissions in schema order. Decoding is permissive: names
//! the schema does not know are ignored, and a value that is not a string
//! list is read as a single name or as nothing.

use strata_config::SecurityConfig;
use strata_core::{PermissionFlags, PermissionSchema, RepositoryResult, RoleId, SchemaError};
use strata_repository::{Node, Property, PropertyValue};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionCodec {
    schema: PermissionSchema,
    prefix: String,
}

impl PermissionCodec {
    pub fn new(schema: PermissionSchema, prefix: impl Into<String>) -> Self {
        Self {
            schema,
            prefix: prefix.into(),
        }
    }

    pub fn from_config(config: &SecurityConfig) -> Result<Self, SchemaError> {
        Ok(Self::new(config.schema()?, config.role_property_prefix.clone()))
    }

    pub fn schema(&self) -> &PermissionSchema {
        &self.schema
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Name of the property storing the permissions of `role`.
    pub fn property_name(&self, role: RoleId) -> String {
        format!("{}{}", self.prefix, role)
    }

    /// Pattern matching every role property.
    pub fn property_pattern(&self) -> String {
        format!("{}*", self.prefix)
    }

    /// Role id embedded in a role property name.
    ///
    /// Only the name [`property_name`](Self::property_name) renders for a
    /// role carries its id; `sec:role-01` and `sec:role-+1` carry none.
    pub fn role_id(&self, property_name: &str) -> Option<RoleId> {
        let role = property_name.strip_prefix(&self.prefix)?.parse().ok()?;
        (self.property_name(role) == property_name).then_some(role)
    }

    /// Role properties stored on `node`.
    pub fn role_properties(&self, node: &dyn Node) -> RepositoryResult<Vec<Property>> {
        let mut properties = node.properties(&self.property_pattern())?;
        properties.retain(|property| property.name.starts_with(&self.prefix));
        Ok(properties)
    }

    /// Decodes one role property into its role id and a flag for every
    /// permission of the schema.
    ///
    /// Returns `None` when `property_name` does not carry a role id.
    pub fn decode<S: AsRef<str>>(
        &self,
        property_name: &str,
        granted: &[S],
    ) -> Option<(RoleId, PermissionFlags)> {
        let role = self.role_id(property_name)?;
        let flags = self
            .schema
            .names()
            .map(|name| {
                let allowed = granted.iter().any(|g| g.as_ref() == name);
                (name.to_string(), allowed)
            })
            .collect();

        Some((role, flags))
    }

    /// Granted permission names as stored in a property value.
    pub fn decode_value(value: &PropertyValue) -> Vec<&str> {
        match value {
            PropertyValue::Strings(names) => names.iter().map(String::as_str).collect(),
            PropertyValue::String(name) => vec![name.as_str()],
            PropertyValue::Long(_) | PropertyValue::Boolean(_) => Vec::new(),
        }
    }

    /// Names of the granted permissions in schema order.
    ///
    /// Permissions missing from `flags` count as denied; an all-denied role
    /// encodes to an empty list.
    pub fn encode(&self, flags: &PermissionFlags) -> Vec<String> {
        self.schema
            .names()
            .filter(|name| flags.get(*name).copied().unwrap_or(false))
            .map(String::from)
            .collect()
    }
}
