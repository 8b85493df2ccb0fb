//! SQLite backend for rowmap.
//!
//! Maps declaratively described record types onto an embedded SQLite
//! database: derives `CREATE TABLE` / `DROP TABLE` DDL from field
//! descriptors, binds record values into prepared statements, and performs
//! single and batch inserts, without the caller writing SQL.
//!
//! # Architecture
//!
//! - **`schema`** — DDL derivation (column order, primary key, nested child
//!   tables with linking columns)
//! - **`bind`** — field-value extraction and positional parameter binding
//! - **`database`** — the [`Database`] connection wrapper sequencing both
//!   against the native handle
//! - **`error`** — the uniform `{code, message}` error surface
//!
//! # Quick start
//!
//! ```
//! use rowmap_core::{FieldDescriptor, FieldExtra, FieldType, FieldValue, Record};
//! use rowmap_sqlite::{Config, Database};
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
//! let mut db = Database::open(Config::in_memory()).unwrap();
//! db.create_table::<User>().unwrap();
//! db.insert(&User { id: 1, name: Some("ada".to_string()) }).unwrap();
//! db.insert_all(&[
//!     User { id: 2, name: None },
//!     User { id: 3, name: Some("lin".to_string()) },
//! ]).unwrap();
//! db.close().unwrap();
//! ```
//!
//! # Nested records
//!
//! An `Array` field annotated with `FieldExtra::item_class::<Child>()` holds
//! nested records. The parent's `create_table` also creates the child table
//! with a `<parent_table>_id INTEGER` linking column, and `insert` recurses
//! into the children after the parent row, binding that column to the parent
//! row's rowid.

mod bind;
mod database;
mod error;
mod schema;

pub use database::{Config, Database};
pub use error::{Result, StoreError};
pub use schema::{create_table_sql, drop_table_sql};
