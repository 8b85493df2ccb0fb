//! Nested record example.
//!
//! An `Array` field annotated with an item class holds child records. The
//! parent's `create_table` also creates the child table with a linking
//! column, and `insert` recurses into the children after the parent row.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p rowmap-demos --example nested_records
//! ```

use chrono::Utc;
use rowmap_core::{
    ErasedRecord, FieldDescriptor, FieldExtra, FieldType, FieldValue, Record,
};
use rowmap_sqlite::{Config, Database};

struct LineItem {
    sku: String,
    qty: i64,
}

impl Record for LineItem {
    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("sku", FieldType::String),
            FieldDescriptor::new("qty", FieldType::Integer),
        ]
    }

    fn value(&self, field: &str) -> FieldValue {
        match field {
            "sku" => FieldValue::present(self.sku.clone()),
            "qty" => FieldValue::present(self.qty),
            _ => FieldValue::Unknown,
        }
    }
}

struct Invoice {
    id: i64,
    issued_at: chrono::DateTime<Utc>,
    items: Vec<LineItem>,
}

impl Record for Invoice {
    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("id", FieldType::Integer).with_extra(FieldExtra::primary_key()),
            FieldDescriptor::new("issued_at", FieldType::DateTime),
            FieldDescriptor::new("items", FieldType::Array)
                .with_extra(FieldExtra::item_class::<LineItem>()),
        ]
    }

    fn value(&self, field: &str) -> FieldValue {
        match field {
            "id" => FieldValue::present(self.id),
            "issued_at" => FieldValue::present(self.issued_at),
            _ => FieldValue::Unknown,
        }
    }

    fn nested(&self, field: &str) -> Vec<&dyn ErasedRecord> {
        match field {
            "items" => self.items.iter().map(|i| i as &dyn ErasedRecord).collect(),
            _ => Vec::new(),
        }
    }
}

fn main() {
    let path = std::env::temp_dir().join("rowmap_nested.db");
    let mut db = Database::open(Config::new(&path)).unwrap();

    // Creates both `invoice` and `lineitem` (with an `invoice_id` column).
    db.create_table::<Invoice>().unwrap();

    db.insert(&Invoice {
        id: 100,
        issued_at: Utc::now(),
        items: vec![
            LineItem {
                sku: "A-1".to_string(),
                qty: 2,
            },
            LineItem {
                sku: "B-9".to_string(),
                qty: 1,
            },
        ],
    })
    .unwrap();
    println!("Inserted invoice 100 with 2 line items");

    // Peek at the child rows with a raw connection.
    let raw = rusqlite::Connection::open(&path).unwrap();
    let mut stmt = raw
        .prepare("SELECT sku, qty, invoice_id FROM lineitem ORDER BY sku")
        .unwrap();
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })
        .unwrap();
    for row in rows {
        let (sku, qty, invoice_id) = row.unwrap();
        println!("  {sku} x{qty} (invoice rowid {invoice_id})");
    }

    db.drop_table::<Invoice>().unwrap();
    db.close().unwrap();
    std::fs::remove_file(&path).ok();
    println!("Done");
}
