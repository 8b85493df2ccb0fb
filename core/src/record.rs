//! The persistence capability implemented by storable types.
//!
//! [`Record`] is the only coupling between the mapper and caller-defined
//! types: an ordered field-descriptor list, an optional table-name override,
//! and by-name value access. There is no runtime reflection: each type spells
//! out its own accessor table in [`Record::value`].
//!
//! [`ErasedRecord`] is the object-safe mirror used when the insert path
//! recurses into nested records of a type it cannot name statically; it is
//! blanket-implemented for every `Record`, so implementors never touch it.

use crate::types::{FieldDescriptor, TypeRef};
use crate::value::FieldValue;

/// Capability of a type whose instances can be persisted.
///
/// # Examples
///
/// ```
/// use rowmap_core::{FieldDescriptor, FieldExtra, FieldType, FieldValue, Record};
///
/// struct User {
///     id: i64,
///     name: Option<String>,
/// }
///
/// impl Record for User {
///     fn fields() -> Vec<FieldDescriptor> {
///         vec![
///             FieldDescriptor::new("id", FieldType::Integer)
///                 .with_extra(FieldExtra::primary_key()),
///             FieldDescriptor::new("name", FieldType::String),
///         ]
///     }
///
///     fn value(&self, field: &str) -> FieldValue {
///         match field {
///             "id" => FieldValue::present(self.id),
///             "name" => FieldValue::opt(self.name.clone()),
///             _ => FieldValue::Unknown,
///         }
///     }
/// }
/// ```
pub trait Record: 'static {
    /// Optional table-name override. Defaults to `None`, in which case the
    /// table name is the lower-cased type identifier.
    fn table_override() -> Option<&'static str> {
        None
    }

    /// The type's field descriptors, in declaration order. Column DDL and
    /// statement-parameter positions both follow this order.
    fn fields() -> Vec<FieldDescriptor>;

    /// Reads the named field from this instance.
    ///
    /// Must distinguish a null value ([`FieldValue::Null`]) from a field name
    /// the type does not recognize ([`FieldValue::Unknown`]); the former binds
    /// SQL NULL, the latter is a caller-visible error.
    fn value(&self, field: &str) -> FieldValue;

    /// The nested records held by the named `Array` field.
    ///
    /// Only consulted for fields of type [`crate::FieldType::Array`]; the
    /// default is an empty list.
    fn nested(&self, field: &str) -> Vec<&dyn ErasedRecord> {
        let _ = field;
        Vec::new()
    }
}

/// Object-safe mirror of [`Record`], used for nested-record recursion.
///
/// Blanket-implemented for every `Record`; do not implement directly.
pub trait ErasedRecord {
    /// Static metadata of the record's type.
    fn type_ref(&self) -> TypeRef;

    /// Reads the named field, as [`Record::value`] does.
    fn field_value(&self, field: &str) -> FieldValue;

    /// Nested records of the named field, as [`Record::nested`] does.
    fn nested_records(&self, field: &str) -> Vec<&dyn ErasedRecord>;
}

impl<T: Record> ErasedRecord for T {
    fn type_ref(&self) -> TypeRef {
        TypeRef::of::<T>()
    }

    fn field_value(&self, field: &str) -> FieldValue {
        self.value(field)
    }

    fn nested_records(&self, field: &str) -> Vec<&dyn ErasedRecord> {
        self.nested(field)
    }
}

/// Last path segment of `T`'s type name, without generic parameters.
pub(crate) fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
