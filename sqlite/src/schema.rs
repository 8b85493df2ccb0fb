//! DDL derivation from field descriptors.
//!
//! Turns a persisted type's [`TypeRef`] into `CREATE TABLE` / `DROP TABLE`
//! statements. Columns follow descriptor declaration order, the first field
//! carrying a primary key annotation contributes the `PRIMARY KEY` clause,
//! and `Array` fields emit no column of their own; their element type gets
//! its own table, with a `<parent_table>_id` linking column appended.
//!
//! All DDL uses `IF NOT EXISTS` / `IF EXISTS`, so creating or dropping twice
//! is harmless.

use rowmap_core::{FieldType, TypeRef, primary_key_of};

use crate::error::{Result, StoreError};

/// SQL column type for a scalar field kind. `Array` fields have no column.
pub(crate) fn column_type(field_type: FieldType) -> Option<&'static str> {
    match field_type {
        FieldType::Boolean | FieldType::Integer => Some("INTEGER"),
        FieldType::Float => Some("REAL"),
        FieldType::String | FieldType::DateTime => Some("TEXT"),
        FieldType::Array => None,
    }
}

/// Name of the linking column a child table carries back to its parent.
pub(crate) fn link_column(parent_table: &str) -> String {
    format!("{parent_table}_id")
}

/// Double-quotes an identifier so keywords and unusual names stay valid SQL.
pub(crate) fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Generates `CREATE TABLE` statements for a type and, recursively, for the
/// element types of its `Array` fields.
///
/// Child tables get an extra `<parent_table>_id INTEGER` column as their last
/// column; the insert path binds it to the parent row's rowid.
///
/// # Errors
///
/// Returns [`StoreError::ItemClassCycle`] if item-class references form a
/// cycle, or [`StoreError::NoColumns`] for a type with no scalar fields.
pub fn create_table_sql(ty: TypeRef) -> Result<String> {
    let mut out = String::new();
    emit_create(ty, None, &mut Vec::new(), &mut out)?;
    Ok(out)
}

fn emit_create(
    ty: TypeRef,
    parent_table: Option<&str>,
    stack: &mut Vec<&'static str>,
    out: &mut String,
) -> Result<()> {
    if stack.contains(&ty.type_name()) {
        return Err(StoreError::ItemClassCycle {
            type_name: ty.type_name().to_string(),
        });
    }
    stack.push(ty.type_name());

    let table = ty.table_name();
    let fields = ty.fields();
    let primary = primary_key_of(&fields).map(|f| f.name.clone());

    let mut clauses = Vec::new();
    for field in &fields {
        let Some(column) = column_type(field.field_type) else {
            continue;
        };
        let mut clause = format!("    {} {}", quote_ident(&field.name), column);
        if primary.as_deref() == Some(field.name.as_str()) {
            clause.push_str(" PRIMARY KEY");
        }
        clauses.push(clause);
    }
    if let Some(parent) = parent_table {
        clauses.push(format!("    {} INTEGER", quote_ident(&link_column(parent))));
    }
    if clauses.is_empty() {
        return Err(StoreError::NoColumns {
            type_name: ty.type_name().to_string(),
        });
    }

    out.push_str(&format!(
        "CREATE TABLE IF NOT EXISTS {} (\n{}\n);\n",
        quote_ident(&table),
        clauses.join(",\n")
    ));

    for field in &fields {
        if field.field_type == FieldType::Array {
            if let Some(item) = field.item_class() {
                emit_create(item, Some(&table), stack, out)?;
            }
        }
    }

    stack.pop();
    Ok(())
}

/// Generates `DROP TABLE` statements for a type and its nested element
/// types, children first.
///
/// # Errors
///
/// Returns [`StoreError::ItemClassCycle`] if item-class references form a
/// cycle.
pub fn drop_table_sql(ty: TypeRef) -> Result<String> {
    let mut tables = Vec::new();
    collect_tables(ty, &mut Vec::new(), &mut tables)?;

    let mut out = String::new();
    for table in tables.iter().rev() {
        out.push_str(&format!("DROP TABLE IF EXISTS {};\n", quote_ident(table)));
    }
    Ok(out)
}

fn collect_tables(
    ty: TypeRef,
    stack: &mut Vec<&'static str>,
    out: &mut Vec<String>,
) -> Result<()> {
    if stack.contains(&ty.type_name()) {
        return Err(StoreError::ItemClassCycle {
            type_name: ty.type_name().to_string(),
        });
    }
    stack.push(ty.type_name());

    out.push(ty.table_name());
    for field in ty.fields() {
        if field.field_type == FieldType::Array {
            if let Some(item) = field.item_class() {
                collect_tables(item, stack, out)?;
            }
        }
    }

    stack.pop();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowmap_core::{FieldDescriptor, FieldExtra, FieldValue, Record};

    struct Note {
        body: Option<String>,
    }

    impl Record for Note {
        fn fields() -> Vec<FieldDescriptor> {
            vec![FieldDescriptor::new("body", FieldType::String)]
        }

        fn value(&self, field: &str) -> FieldValue {
            match field {
                "body" => FieldValue::opt(self.body.clone()),
                _ => FieldValue::Unknown,
            }
        }
    }

    struct Task {
        id: i64,
        done: bool,
        notes: Vec<Note>,
    }

    impl Record for Task {
        fn fields() -> Vec<FieldDescriptor> {
            vec![
                FieldDescriptor::new("id", FieldType::Integer)
                    .with_extra(FieldExtra::primary_key()),
                FieldDescriptor::new("done", FieldType::Boolean),
                FieldDescriptor::new("notes", FieldType::Array)
                    .with_extra(FieldExtra::item_class::<Note>()),
            ]
        }

        fn value(&self, field: &str) -> FieldValue {
            match field {
                "id" => FieldValue::present(self.id),
                "done" => FieldValue::present(self.done),
                _ => FieldValue::Unknown,
            }
        }

        fn nested(&self, field: &str) -> Vec<&dyn rowmap_core::ErasedRecord> {
            match field {
                "notes" => self
                    .notes
                    .iter()
                    .map(|n| n as &dyn rowmap_core::ErasedRecord)
                    .collect(),
                _ => Vec::new(),
            }
        }
    }

    #[test]
    fn test_column_types() {
        assert_eq!(column_type(FieldType::Boolean), Some("INTEGER"));
        assert_eq!(column_type(FieldType::Integer), Some("INTEGER"));
        assert_eq!(column_type(FieldType::Float), Some("REAL"));
        assert_eq!(column_type(FieldType::String), Some("TEXT"));
        assert_eq!(column_type(FieldType::DateTime), Some("TEXT"));
        assert_eq!(column_type(FieldType::Array), None);
    }

    #[test]
    fn test_create_sql_column_order_and_primary_key() {
        let sql = create_table_sql(TypeRef::of::<Task>()).unwrap();
        assert!(sql.contains("CREATE TABLE IF NOT EXISTS \"task\""));
        assert!(sql.contains("\"id\" INTEGER PRIMARY KEY"));
        // Declaration order: id before done
        let id_pos = sql.find("\"id\" INTEGER").unwrap();
        let done_pos = sql.find("\"done\" INTEGER").unwrap();
        assert!(id_pos < done_pos);
        // Array field emits no column on the parent
        assert!(!sql.contains("\"notes\""));
    }

    #[test]
    fn test_create_sql_emits_child_table_with_link_column() {
        let sql = create_table_sql(TypeRef::of::<Task>()).unwrap();
        assert!(sql.contains("CREATE TABLE IF NOT EXISTS \"note\""));
        assert!(sql.contains("\"task_id\" INTEGER"));
    }

    #[test]
    fn test_drop_sql_children_first() {
        let sql = drop_table_sql(TypeRef::of::<Task>()).unwrap();
        let note_pos = sql.find("DROP TABLE IF EXISTS \"note\"").unwrap();
        let task_pos = sql.find("DROP TABLE IF EXISTS \"task\"").unwrap();
        assert!(note_pos < task_pos);
    }

    #[test]
    fn test_multiple_primary_keys_first_wins_in_ddl() {
        struct TwoKeys;

        impl Record for TwoKeys {
            fn fields() -> Vec<FieldDescriptor> {
                vec![
                    FieldDescriptor::new("a", FieldType::Integer)
                        .with_extra(FieldExtra::primary_key()),
                    FieldDescriptor::new("b", FieldType::Integer)
                        .with_extra(FieldExtra::primary_key()),
                ]
            }

            fn value(&self, _field: &str) -> FieldValue {
                FieldValue::Unknown
            }
        }

        let sql = create_table_sql(TypeRef::of::<TwoKeys>()).unwrap();
        assert!(sql.contains("\"a\" INTEGER PRIMARY KEY"));
        assert_eq!(sql.matches("PRIMARY KEY").count(), 1);
    }

    #[test]
    fn test_keyword_table_name_is_quoted() {
        let sql = quote_ident("order");
        assert_eq!(sql, "\"order\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_no_columns_rejected() {
        struct Bare {
            items: Vec<Note>,
        }

        impl Record for Bare {
            fn fields() -> Vec<FieldDescriptor> {
                vec![
                    FieldDescriptor::new("items", FieldType::Array)
                        .with_extra(FieldExtra::item_class::<Note>()),
                ]
            }

            fn value(&self, _field: &str) -> FieldValue {
                FieldValue::Unknown
            }

            fn nested(&self, field: &str) -> Vec<&dyn rowmap_core::ErasedRecord> {
                match field {
                    "items" => self
                        .items
                        .iter()
                        .map(|n| n as &dyn rowmap_core::ErasedRecord)
                        .collect(),
                    _ => Vec::new(),
                }
            }
        }

        let err = create_table_sql(TypeRef::of::<Bare>()).unwrap_err();
        assert!(matches!(err, StoreError::NoColumns { .. }));
    }

    #[test]
    fn test_item_class_cycle_detected() {
        struct Ouro;

        impl Record for Ouro {
            fn fields() -> Vec<FieldDescriptor> {
                vec![
                    FieldDescriptor::new("id", FieldType::Integer),
                    FieldDescriptor::new("tail", FieldType::Array)
                        .with_extra(FieldExtra::item_class::<Ouro>()),
                ]
            }

            fn value(&self, _field: &str) -> FieldValue {
                FieldValue::Unknown
            }
        }

        let err = create_table_sql(TypeRef::of::<Ouro>()).unwrap_err();
        assert!(matches!(err, StoreError::ItemClassCycle { .. }));
        let err = drop_table_sql(TypeRef::of::<Ouro>()).unwrap_err();
        assert!(matches!(err, StoreError::ItemClassCycle { .. }));
    }
}
