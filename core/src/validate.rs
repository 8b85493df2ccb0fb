//! Descriptor validation.
//!
//! Validates the structural invariants of a type's field descriptors before
//! they reach schema derivation: non-empty unique names, at most one primary
//! key annotation, and an item class on every `Array` field meant to hold
//! nested records.
//!
//! # Examples
//!
//! ```
//! use rowmap_core::*;
//!
//! let fields = vec![
//!     FieldDescriptor::new("id", FieldType::Integer).with_extra(FieldExtra::primary_key()),
//!     FieldDescriptor::new("name", FieldType::String),
//! ];
//! assert!(validate_fields(&fields).is_empty());
//!
//! // Duplicate name → issue
//! let dup = vec![
//!     FieldDescriptor::new("id", FieldType::Integer),
//!     FieldDescriptor::new("id", FieldType::String),
//! ];
//! assert!(!validate_fields(&dup).is_empty());
//! ```

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::types::{FieldDescriptor, FieldExtraKind, FieldType};

/// Structural problems in a field descriptor list.
///
/// Each variant describes one issue; the `Display` impl provides a
/// human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum SchemaIssue {
    /// A descriptor's name is empty or whitespace-only.
    #[error("field name cannot be empty")]
    EmptyFieldName,
    /// Two descriptors share a name.
    #[error("duplicate field name: {0}")]
    DuplicateField(String),
    /// More than one descriptor carries a primary key annotation; only the
    /// first in declaration order is used.
    #[error("field '{0}' repeats the primary key annotation")]
    ExtraPrimaryKey(String),
    /// An `Array` field has no item class, so it cannot hold nested records.
    #[error("array field '{0}' has no item class")]
    ArrayWithoutItemClass(String),
}

/// Validates a type's field descriptors, returning every issue found.
///
/// An empty result means the descriptors satisfy all structural invariants.
/// The schema mapper stays total even for flawed input (e.g. later primary
/// keys are simply ignored), so validation is advisory; wiring it into a
/// debug assertion or a registration-time check catches mistakes early.
pub fn validate_fields(fields: &[FieldDescriptor]) -> Vec<SchemaIssue> {
    let mut issues = Vec::new();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut primary_seen = false;

    for field in fields {
        let name = field.name.trim();
        if name.is_empty() {
            issues.push(SchemaIssue::EmptyFieldName);
            continue;
        }
        if !seen.insert(name) {
            issues.push(SchemaIssue::DuplicateField(name.to_string()));
        }

        if field.contains_extra(FieldExtraKind::PrimaryKey) {
            if primary_seen {
                issues.push(SchemaIssue::ExtraPrimaryKey(name.to_string()));
            }
            primary_seen = true;
        }

        if field.field_type == FieldType::Array && field.item_class().is_none() {
            issues.push(SchemaIssue::ArrayWithoutItemClass(name.to_string()));
        }
    }

    issues
}
