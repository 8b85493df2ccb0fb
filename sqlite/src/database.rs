//! The connection wrapper sequencing mapper operations against SQLite.
//!
//! [`Database`] owns the one native handle for its lifetime and is the only
//! component issuing statements against it. Operations are synchronous and
//! blocking; prepared statements are compiled, bound, executed, and finalized
//! within a single public call on both success and failure paths.

use std::path::{Path, PathBuf};

use rowmap_core::{ErasedRecord, FieldType, Record, TypeRef};
use rusqlite::params_from_iter;
use rusqlite::types::Value as SqlValue;
use tracing::{debug, trace};

use crate::bind;
use crate::error::{Result, StoreError};
use crate::schema;

/// Identifies the database to open. Immutable once a [`Database`] exists.
///
/// # Examples
///
/// ```
/// use rowmap_sqlite::Config;
///
/// let file = Config::new("app.db");
/// assert!(file.path().is_some());
///
/// let mem = Config::in_memory();
/// assert!(mem.path().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    path: Option<PathBuf>,
}

impl Config {
    /// A file-backed database at the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// A private in-memory database, handy for tests and demos.
    pub fn in_memory() -> Self {
        Self { path: None }
    }

    /// The database file path, or `None` for an in-memory database.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// A connection to one SQLite database.
///
/// Owns the native handle exclusively (non-copyable, movable) and closes it
/// exactly once. After [`close`](Self::close), every other operation fails
/// fast with [`StoreError::Closed`]; closing again is a no-op.
///
/// # Examples
///
/// ```
/// use rowmap_core::{FieldDescriptor, FieldExtra, FieldType, FieldValue, Record};
/// use rowmap_sqlite::{Config, Database};
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
///
/// let mut db = Database::open(Config::in_memory()).unwrap();
/// db.create_table::<User>().unwrap();
/// db.insert(&User { id: 1, name: Some("ada".to_string()) }).unwrap();
/// db.drop_table::<User>().unwrap();
/// db.close().unwrap();
/// ```
#[derive(Debug)]
pub struct Database {
    conn: Option<rusqlite::Connection>,
    config: Config,
}

impl Database {
    /// Opens the database identified by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the native open fails (bad path,
    /// inaccessible file, corrupt database).
    pub fn open(config: Config) -> Result<Self> {
        let conn = match config.path() {
            Some(path) => rusqlite::Connection::open(path)?,
            None => rusqlite::Connection::open_in_memory()?,
        };
        debug!(path = ?config.path(), "Opened database");
        Ok(Self {
            conn: Some(conn),
            config,
        })
    }

    /// The configuration this database was opened with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Derives the table name for `T`: its override if supplied, otherwise
    /// the lower-cased type identifier. Pure and deterministic, and always
    /// equal to the name embedded in [`create_table`](Self::create_table) DDL.
    pub fn table_name<T: Record>() -> String {
        TypeRef::of::<T>().table_name()
    }

    /// Compiles and runs one or more SQL statements with no bound parameters.
    ///
    /// # Errors
    ///
    /// Any non-success native result code is wrapped into
    /// [`StoreError::Database`] carrying the extended code and message.
    pub fn execute_sql(&self, sql: &str) -> Result<()> {
        debug!(sql = %sql.trim(), "Executing SQL");
        self.conn()?.execute_batch(sql)?;
        Ok(())
    }

    /// Creates the table for `T`, plus tables for the element types of its
    /// `Array` fields (each with a `<parent_table>_id` linking column).
    /// Safe to call repeatedly.
    pub fn create_table<T: Record>(&self) -> Result<()> {
        let sql = schema::create_table_sql(TypeRef::of::<T>())?;
        self.execute_sql(&sql)
    }

    /// Drops the table for `T` and its nested element tables, children
    /// first. Safe to call even when the tables are absent.
    pub fn drop_table<T: Record>(&self) -> Result<()> {
        let sql = schema::drop_table_sql(TypeRef::of::<T>())?;
        self.execute_sql(&sql)
    }

    /// Inserts one record.
    ///
    /// Binds one positional parameter per scalar field, in declaration
    /// order, then recursively inserts the elements of each `Array` field
    /// with the parent row's rowid in their linking column.
    ///
    /// # Errors
    ///
    /// Native failures (constraint violations, I/O) surface as
    /// [`StoreError::Database`]; a record whose values do not match its own
    /// descriptors surfaces as [`StoreError::UnknownField`] or
    /// [`StoreError::TypeMismatch`].
    pub fn insert<T: Record>(&self, record: &T) -> Result<()> {
        self.insert_record(record, None)
    }

    /// Inserts records in sequence, stopping at the first failure.
    ///
    /// Rows inserted before the failure stay persisted; no transaction is
    /// opened on the caller's behalf. Callers wanting atomicity can wrap the
    /// call in `execute_sql("BEGIN")` / `execute_sql("COMMIT")`.
    pub fn insert_all<T: Record>(&self, records: &[T]) -> Result<()> {
        for record in records {
            self.insert(record)?;
        }
        Ok(())
    }

    /// Releases the native handle. Idempotent: closing an already-closed
    /// database is a no-op.
    pub fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            debug!("Closing database");
            conn.close().map_err(|(_, e)| StoreError::from(e))?;
        }
        Ok(())
    }

    fn conn(&self) -> Result<&rusqlite::Connection> {
        self.conn.as_ref().ok_or(StoreError::Closed)
    }

    fn insert_record(
        &self,
        record: &dyn ErasedRecord,
        parent: Option<(&str, i64)>,
    ) -> Result<()> {
        let conn = self.conn()?;
        let ty = record.type_ref();
        let table = ty.table_name();
        let fields = ty.fields();

        let mut columns: Vec<&str> = fields
            .iter()
            .filter(|f| f.field_type != FieldType::Array)
            .map(|f| f.name.as_str())
            .collect();
        let mut values = bind::bind_values(record, &fields)?;
        if let Some((link, rowid)) = parent {
            columns.push(link);
            values.push(SqlValue::Integer(rowid));
        }
        if columns.is_empty() {
            return Err(StoreError::NoColumns {
                type_name: ty.type_name().to_string(),
            });
        }

        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();
        let quoted: Vec<String> = columns.iter().map(|c| schema::quote_ident(c)).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            schema::quote_ident(&table),
            quoted.join(", "),
            placeholders.join(", ")
        );
        debug!(sql = %sql, "Inserting record");
        trace!(values = ?values, "Bound parameters");

        let mut stmt = conn.prepare(&sql)?;
        stmt.execute(params_from_iter(values))?;
        let rowid = conn.last_insert_rowid();

        for field in &fields {
            if field.field_type != FieldType::Array {
                continue;
            }
            let children = record.nested_records(&field.name);
            if children.is_empty() {
                continue;
            }
            if field.item_class().is_none() {
                return Err(StoreError::MissingItemClass {
                    field: field.name.clone(),
                });
            }
            let link = schema::link_column(&table);
            for child in children {
                self.insert_record(child, Some((&link, rowid)))?;
            }
        }
        Ok(())
    }
}
