//! Field descriptor types for persisted records.
//!
//! This module defines the metadata a type supplies to describe its persisted
//! shape: one [`FieldDescriptor`] per attribute, each carrying a scalar
//! [`FieldType`] and zero or more [`FieldExtra`] annotations. The SQLite
//! backend turns an ordered descriptor list into column DDL and positional
//! statement parameters, so declaration order is significant.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::{Record, short_type_name};

/// Scalar kind of a persisted field.
///
/// Determines both the derived SQL column type and how the binder extracts
/// the field's value from a live record. `Array` fields hold nested records
/// (via [`FieldExtra::item_class`]) and emit no column of their own.
///
/// # Examples
///
/// ```
/// use rowmap_core::FieldType;
///
/// let ty = FieldType::Integer;
/// assert_eq!(ty, FieldType::Integer);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    /// Boolean, stored as a 0/1 integer.
    Boolean,
    /// 64-bit signed integer.
    Integer,
    /// 64-bit float, stored as REAL.
    Float,
    /// UTF-8 text.
    String,
    /// Timestamp, stored as RFC 3339 text.
    DateTime,
    /// Sequence of nested records of a referenced type.
    Array,
}

/// Payload-free discriminant of a [`FieldExtra`], used for membership checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldExtraKind {
    /// The field is the table's primary key.
    PrimaryKey,
    /// The field holds nested records of a referenced type.
    ItemClass,
}

/// A `Copy` handle to a persisted type's static metadata.
///
/// Captures the type's identifier, table-name override, and field-list
/// accessor from its [`Record`] impl, so schema derivation can run without a
/// live instance (and recursively, for item classes, without naming the type
/// at compile time).
///
/// # Examples
///
/// ```
/// use rowmap_core::{FieldDescriptor, FieldType, FieldValue, Record, TypeRef};
///
/// struct Sensor {
///     id: i64,
/// }
///
/// impl Record for Sensor {
///     fn fields() -> Vec<FieldDescriptor> {
///         vec![FieldDescriptor::new("id", FieldType::Integer)]
///     }
///
///     fn value(&self, field: &str) -> FieldValue {
///         match field {
///             "id" => FieldValue::present(self.id),
///             _ => FieldValue::Unknown,
///         }
///     }
/// }
///
/// let ty = TypeRef::of::<Sensor>();
/// assert_eq!(ty.type_name(), "Sensor");
/// assert_eq!(ty.table_name(), "sensor");
/// ```
#[derive(Clone, Copy)]
pub struct TypeRef {
    name: &'static str,
    table_override: fn() -> Option<&'static str>,
    fields: fn() -> Vec<FieldDescriptor>,
}

impl TypeRef {
    /// Captures the static metadata of `T`.
    pub fn of<T: Record>() -> Self {
        Self {
            name: short_type_name::<T>(),
            table_override: T::table_override,
            fields: T::fields,
        }
    }

    /// The type's own identifier (last path segment, without generics).
    pub fn type_name(&self) -> &'static str {
        self.name
    }

    /// Derives the table name: the override if the type supplies one,
    /// otherwise the lower-cased type identifier.
    ///
    /// Pure and deterministic: two calls for the same type always agree, and
    /// the result equals the name embedded in generated DDL.
    pub fn table_name(&self) -> String {
        match (self.table_override)() {
            Some(table) => table.to_string(),
            None => self.name.to_ascii_lowercase(),
        }
    }

    /// The type's ordered field descriptors.
    pub fn fields(&self) -> Vec<FieldDescriptor> {
        (self.fields)()
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRef").field("name", &self.name).finish()
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for TypeRef {}

/// Annotation refining a [`FieldDescriptor`]'s role.
///
/// Constructed through the factory methods so each kind's parameter shape is
/// enforced at the call site: [`primary_key`](FieldExtra::primary_key) takes
/// nothing, [`item_class`](FieldExtra::item_class) takes the element type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldExtra {
    /// Marks the field as the table's primary key.
    PrimaryKey,
    /// Names the element type of an `Array` field holding nested records.
    ItemClass(TypeRef),
}

impl FieldExtra {
    /// Primary key annotation.
    pub fn primary_key() -> Self {
        Self::PrimaryKey
    }

    /// Item class annotation for an `Array` field whose elements are `T`.
    pub fn item_class<T: Record>() -> Self {
        Self::ItemClass(TypeRef::of::<T>())
    }

    /// The payload-free discriminant of this extra.
    pub fn kind(&self) -> FieldExtraKind {
        match self {
            Self::PrimaryKey => FieldExtraKind::PrimaryKey,
            Self::ItemClass(_) => FieldExtraKind::ItemClass,
        }
    }
}

/// Describes one persisted attribute of a record type.
///
/// Descriptors are plain value objects constructed once per type (logically
/// static schema metadata) and never mutated afterwards. Names must be
/// non-empty and unique within a type; [`crate::validate_fields`] reports
/// violations.
///
/// # Examples
///
/// ```
/// use rowmap_core::{FieldDescriptor, FieldExtra, FieldExtraKind, FieldType};
///
/// let id = FieldDescriptor::new("id", FieldType::Integer)
///     .with_extra(FieldExtra::primary_key());
/// assert!(id.contains_extra(FieldExtraKind::PrimaryKey));
/// assert!(!id.contains_extra(FieldExtraKind::ItemClass));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Column name, unique within the type.
    pub name: String,
    /// Scalar kind driving column DDL and binding.
    pub field_type: FieldType,
    /// Extra annotations (primary key, item class).
    pub extras: Vec<FieldExtra>,
}

impl FieldDescriptor {
    /// Creates a descriptor with no extras.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            extras: Vec::new(),
        }
    }

    /// Appends an extra annotation.
    pub fn with_extra(mut self, extra: FieldExtra) -> Self {
        self.extras.push(extra);
        self
    }

    /// Whether any attached extra has the given kind. O(extras).
    pub fn contains_extra(&self, kind: FieldExtraKind) -> bool {
        self.extras.iter().any(|e| e.kind() == kind)
    }

    /// The referenced element type of the first `ItemClass` extra, if any.
    pub fn item_class(&self) -> Option<TypeRef> {
        self.extras.iter().find_map(|e| match e {
            FieldExtra::ItemClass(ty) => Some(*ty),
            _ => None,
        })
    }
}

/// Returns the first declared field carrying the primary key annotation.
///
/// When several fields are annotated, the first in declaration order wins;
/// the rest are ignored by schema derivation.
pub fn primary_key_of(fields: &[FieldDescriptor]) -> Option<&FieldDescriptor> {
    fields
        .iter()
        .find(|f| f.contains_extra(FieldExtraKind::PrimaryKey))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldValue;

    struct Tag;

    impl Record for Tag {
        fn fields() -> Vec<FieldDescriptor> {
            vec![FieldDescriptor::new("label", FieldType::String)]
        }

        fn value(&self, _field: &str) -> FieldValue {
            FieldValue::Unknown
        }
    }

    struct Renamed;

    impl Record for Renamed {
        fn table_override() -> Option<&'static str> {
            Some("custom_table")
        }

        fn fields() -> Vec<FieldDescriptor> {
            vec![FieldDescriptor::new("x", FieldType::Integer)]
        }

        fn value(&self, _field: &str) -> FieldValue {
            FieldValue::Unknown
        }
    }

    #[test]
    fn test_table_name_derived_from_type_name() {
        let ty = TypeRef::of::<Tag>();
        assert_eq!(ty.type_name(), "Tag");
        assert_eq!(ty.table_name(), "tag");
        // Deterministic across calls
        assert_eq!(ty.table_name(), TypeRef::of::<Tag>().table_name());
    }

    #[test]
    fn test_table_name_override_wins() {
        assert_eq!(TypeRef::of::<Renamed>().table_name(), "custom_table");
    }

    #[test]
    fn test_contains_extra() {
        let field = FieldDescriptor::new("id", FieldType::Integer)
            .with_extra(FieldExtra::primary_key());
        assert!(field.contains_extra(FieldExtraKind::PrimaryKey));
        assert!(!field.contains_extra(FieldExtraKind::ItemClass));
    }

    #[test]
    fn test_item_class_lookup() {
        let field = FieldDescriptor::new("tags", FieldType::Array)
            .with_extra(FieldExtra::item_class::<Tag>());
        let item = field.item_class().unwrap();
        assert_eq!(item.type_name(), "Tag");
        assert_eq!(item.table_name(), "tag");

        let plain = FieldDescriptor::new("blob", FieldType::Array);
        assert!(plain.item_class().is_none());
    }

    #[test]
    fn test_primary_key_first_wins() {
        let fields = vec![
            FieldDescriptor::new("a", FieldType::Integer),
            FieldDescriptor::new("b", FieldType::Integer)
                .with_extra(FieldExtra::primary_key()),
            FieldDescriptor::new("c", FieldType::Integer)
                .with_extra(FieldExtra::primary_key()),
        ];
        assert_eq!(primary_key_of(&fields).unwrap().name, "b");
    }

    #[test]
    fn test_primary_key_absent() {
        let fields = vec![FieldDescriptor::new("a", FieldType::Integer)];
        assert!(primary_key_of(&fields).is_none());
    }
}
