//! Permission model - profiles, permission sets, and grants
//!
//! Permissions are opt-in and additive. A profile owns zero or more
//! permission sets; a grant exists only where a row says it does.
//! Absence of a row is "no access", never "full access".

use crate::ids::{FieldName, ObjectName};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Object-level actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectAction {
    Create,
    Read,
    Update,
    Delete,
}

/// Field-level actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldAction {
    Read,
    Edit,
}

/// CRUD grants for one object type within a permission set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ObjectPermissions {
    pub create: bool,
    pub read: bool,
    pub update: bool,
    pub delete: bool,
}

impl ObjectPermissions {
    pub fn allows(&self, action: ObjectAction) -> bool {
        match action {
            ObjectAction::Create => self.create,
            ObjectAction::Read => self.read,
            ObjectAction::Update => self.update,
            ObjectAction::Delete => self.delete,
        }
    }

    pub fn read_only() -> Self {
        Self {
            read: true,
            ..Self::default()
        }
    }

    pub fn full() -> Self {
        Self {
            create: true,
            read: true,
            update: true,
            delete: true,
        }
    }
}

/// Read/edit grants for one field within a permission set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldPermissions {
    pub read: bool,
    pub edit: bool,
}

impl FieldPermissions {
    pub fn allows(&self, action: FieldAction) -> bool {
        match action {
            FieldAction::Read => self.read,
            FieldAction::Edit => self.edit,
        }
    }

    pub fn read_only() -> Self {
        Self {
            read: true,
            edit: false,
        }
    }

    pub fn read_write() -> Self {
        Self {
            read: true,
            edit: true,
        }
    }
}

/// A reusable bundle of object- and field-level grants
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PermissionSet {
    pub name: String,

    /// Object-level grants keyed by object type
    pub objects: HashMap<ObjectName, ObjectPermissions>,

    /// Field-level grants keyed by (object type, field)
    pub fields: HashMap<(ObjectName, FieldName), FieldPermissions>,
}

impl PermissionSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn grant_object(mut self, object: ObjectName, perms: ObjectPermissions) -> Self {
        self.objects.insert(object, perms);
        self
    }

    pub fn grant_field(
        mut self,
        object: ObjectName,
        field: FieldName,
        perms: FieldPermissions,
    ) -> Self {
        self.fields.insert((object, field), perms);
        self
    }

    pub fn object_allows(&self, object: &ObjectName, action: ObjectAction) -> bool {
        self.objects.get(object).is_some_and(|p| p.allows(action))
    }

    pub fn field_allows(
        &self,
        object: &ObjectName,
        field: &FieldName,
        action: FieldAction,
    ) -> bool {
        self.fields
            .get(&(object.clone(), field.clone()))
            .is_some_and(|p| p.allows(action))
    }
}

/// A named collection of permission sets assigned to users/roles
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub permission_sets: Vec<PermissionSet>,
}

impl Profile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            permission_sets: vec![],
        }
    }

    pub fn with_set(mut self, set: PermissionSet) -> Self {
        self.permission_sets.push(set);
        self
    }
}
