//! Core descriptor model and persistence capability for rowmap.
//!
//! This crate defines the engine-independent half of the mapper:
//!
//! - [`FieldDescriptor`] — one persisted attribute: name, scalar
//!   [`FieldType`], and extra annotations.
//! - [`FieldExtra`] — annotation refining a field's role (primary key,
//!   nested item type), built via factory methods.
//! - [`Value`] / [`FieldValue`] — typed values read from live records,
//!   with null and unknown kept distinct.
//! - [`Record`] — the capability persisted types implement: ordered field
//!   descriptors, optional table-name override, by-name value access, and
//!   nested-record enumeration for `Array` fields.
//! - [`TypeRef`] — a `Copy` handle to a type's static metadata, enabling
//!   schema derivation and nested recursion without a live instance.
//!
//! Validation ([`validate_fields`]) catches structural mistakes such as
//! duplicate field names or an `Array` field lacking an item class.
//!
//! # Example
//!
//! ```
//! use rowmap_core::*;
//!
//! struct User {
//!     id: i64,
//!     name: Option<String>,
//! }
//!
//! impl Record for User {
//!     fn fields() -> Vec<FieldDescriptor> {
//!         vec![
//!             FieldDescriptor::new("id", FieldType::Integer)
//!                 .with_extra(FieldExtra::primary_key()),
//!             FieldDescriptor::new("name", FieldType::String),
//!         ]
//!     }
//!
//!     fn value(&self, field: &str) -> FieldValue {
//!         match field {
//!             "id" => FieldValue::present(self.id),
//!             "name" => FieldValue::opt(self.name.clone()),
//!             _ => FieldValue::Unknown,
//!         }
//!     }
//! }
//!
//! assert_eq!(TypeRef::of::<User>().table_name(), "user");
//! assert!(validate_fields(&User::fields()).is_empty());
//! ```

mod record;
mod types;
mod validate;
mod value;

pub use record::{ErasedRecord, Record};
pub use types::{
    FieldDescriptor, FieldExtra, FieldExtraKind, FieldType, TypeRef, primary_key_of,
};
pub use validate::{SchemaIssue, validate_fields};
pub use value::{FieldValue, Value};
