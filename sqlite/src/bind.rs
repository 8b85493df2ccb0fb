//! Value binding: record fields to statement parameters.
//!
//! Walks a type's field descriptors in declaration order and converts each
//! extracted [`FieldValue`] into an owned [`rusqlite::types::Value`], so that
//! positional parameter N always corresponds to the Nth declared scalar
//! field. Booleans bind as 0/1 integers, timestamps as RFC 3339 text, and a
//! null field binds SQL NULL, never an empty string.

use rowmap_core::{ErasedRecord, FieldDescriptor, FieldType, FieldValue, Value};
use rusqlite::types::Value as SqlValue;

use crate::error::{Result, StoreError};

/// Converts one field's extracted value into the SQLite value bound for it.
///
/// `FieldValue::Null` binds SQL NULL for any field type. `Unknown` and
/// kind mismatches surface as structured errors rather than panics.
pub(crate) fn bind_value(
    type_name: &str,
    field: &FieldDescriptor,
    value: FieldValue,
) -> Result<SqlValue> {
    let value = match value {
        FieldValue::Null => return Ok(SqlValue::Null),
        FieldValue::Unknown => {
            return Err(StoreError::UnknownField {
                type_name: type_name.to_string(),
                field: field.name.clone(),
            });
        }
        FieldValue::Present(value) => value,
    };

    match (field.field_type, value) {
        (FieldType::Boolean, Value::Bool(b)) => Ok(SqlValue::Integer(i64::from(b))),
        // Integer-convertible: any nonzero integer reads as true
        (FieldType::Boolean, Value::Int(i)) => Ok(SqlValue::Integer(i64::from(i != 0))),
        (FieldType::Integer, Value::Int(i)) => Ok(SqlValue::Integer(i)),
        (FieldType::Float, Value::Float(f)) => Ok(SqlValue::Real(f)),
        (FieldType::Float, Value::Int(i)) => Ok(SqlValue::Real(i as f64)),
        (FieldType::String, Value::Text(s)) => Ok(SqlValue::Text(s)),
        (FieldType::DateTime, Value::DateTime(dt)) => Ok(SqlValue::Text(dt.to_rfc3339())),
        (_, other) => Err(StoreError::TypeMismatch {
            field: field.name.clone(),
            expected: field.field_type,
            found: other.kind_name(),
        }),
    }
}

/// Extracts and converts every scalar field of `record`, in declaration
/// order. `Array` fields are skipped; the insert path recurses into them
/// separately.
pub(crate) fn bind_values(
    record: &dyn ErasedRecord,
    fields: &[FieldDescriptor],
) -> Result<Vec<SqlValue>> {
    let type_name = record.type_ref().type_name();
    fields
        .iter()
        .filter(|f| f.field_type != FieldType::Array)
        .map(|f| bind_value(type_name, f, record.field_value(&f.name)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rowmap_core::{FieldExtra, Record};

    fn field(name: &str, ty: FieldType) -> FieldDescriptor {
        FieldDescriptor::new(name, ty)
    }

    #[test]
    fn test_boolean_binds_as_integer() {
        let f = field("done", FieldType::Boolean);
        assert_eq!(
            bind_value("T", &f, FieldValue::present(true)).unwrap(),
            SqlValue::Integer(1)
        );
        assert_eq!(
            bind_value("T", &f, FieldValue::present(false)).unwrap(),
            SqlValue::Integer(0)
        );
        // Integer-convertible input normalizes to 0/1
        assert_eq!(
            bind_value("T", &f, FieldValue::present(7i64)).unwrap(),
            SqlValue::Integer(1)
        );
    }

    #[test]
    fn test_null_binds_null_not_empty_string() {
        let f = field("name", FieldType::String);
        assert_eq!(bind_value("T", &f, FieldValue::Null).unwrap(), SqlValue::Null);
    }

    #[test]
    fn test_datetime_binds_rfc3339_text() {
        let f = field("at", FieldType::DateTime);
        let dt = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let bound = bind_value("T", &f, FieldValue::present(dt)).unwrap();
        match bound {
            SqlValue::Text(s) => assert!(s.starts_with("2024-03-01T12:30:00")),
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_integer_widens_to_float() {
        let f = field("ratio", FieldType::Float);
        assert_eq!(
            bind_value("T", &f, FieldValue::present(2i64)).unwrap(),
            SqlValue::Real(2.0)
        );
    }

    #[test]
    fn test_kind_mismatch_is_structured_error() {
        let f = field("count", FieldType::Integer);
        let err = bind_value("T", &f, FieldValue::present("nope")).unwrap_err();
        match err {
            StoreError::TypeMismatch {
                field,
                expected,
                found,
            } => {
                assert_eq!(field, "count");
                assert_eq!(expected, FieldType::Integer);
                assert_eq!(found, "text");
            }
            other => panic!("expected TypeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_field_is_structured_error() {
        let f = field("ghost", FieldType::String);
        let err = bind_value("T", &f, FieldValue::Unknown).unwrap_err();
        assert!(matches!(err, StoreError::UnknownField { .. }));
        assert_eq!(err.code(), -1);
    }

    #[test]
    fn test_bind_values_follows_declaration_order() {
        struct Row {
            id: i64,
            label: String,
            active: bool,
        }

        impl Record for Row {
            fn fields() -> Vec<FieldDescriptor> {
                vec![
                    FieldDescriptor::new("id", FieldType::Integer)
                        .with_extra(FieldExtra::primary_key()),
                    FieldDescriptor::new("label", FieldType::String),
                    FieldDescriptor::new("active", FieldType::Boolean),
                ]
            }

            fn value(&self, field: &str) -> FieldValue {
                match field {
                    "id" => FieldValue::present(self.id),
                    "label" => FieldValue::present(self.label.clone()),
                    "active" => FieldValue::present(self.active),
                    _ => FieldValue::Unknown,
                }
            }
        }

        let row = Row {
            id: 9,
            label: "x".to_string(),
            active: true,
        };
        let values = bind_values(&row, &Row::fields()).unwrap();
        assert_eq!(
            values,
            vec![
                SqlValue::Integer(9),
                SqlValue::Text("x".to_string()),
                SqlValue::Integer(1),
            ]
        );
    }
}
