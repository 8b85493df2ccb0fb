//! Basic mapping workflow example.
//!
//! Demonstrates the core lifecycle: describe a type's persisted shape,
//! validate the descriptors, create its table, insert single rows and a
//! batch, and clean up.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p rowmap-demos --example quickstart
//! ```

use rowmap_core::{
    FieldDescriptor, FieldExtra, FieldType, FieldValue, Record, validate_fields,
};
use rowmap_sqlite::{Config, Database};

struct User {
    id: i64,
    name: Option<String>,
    active: bool,
}

impl Record for User {
    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("id", FieldType::Integer).with_extra(FieldExtra::primary_key()),
            FieldDescriptor::new("name", FieldType::String),
            FieldDescriptor::new("active", FieldType::Boolean),
        ]
    }

    fn value(&self, field: &str) -> FieldValue {
        match field {
            "id" => FieldValue::present(self.id),
            "name" => FieldValue::opt(self.name.clone()),
            "active" => FieldValue::present(self.active),
            _ => FieldValue::Unknown,
        }
    }
}

fn main() {
    // === Step 1: Validate the descriptors ===
    let issues = validate_fields(&User::fields());
    println!("=== Validation ===");
    println!("{}", serde_json::to_string_pretty(&issues).unwrap());

    // === Step 2: Open a database and create the table ===
    let path = std::env::temp_dir().join("rowmap_quickstart.db");
    let mut db = Database::open(Config::new(&path)).unwrap();
    db.create_table::<User>().unwrap();
    println!("\nTable name: {}", Database::table_name::<User>());

    // === Step 3: Insert rows ===
    db.insert(&User {
        id: 1,
        name: Some("ada".to_string()),
        active: true,
    })
    .unwrap();

    db.insert_all(&[
        User {
            id: 2,
            name: None,
            active: false,
        },
        User {
            id: 3,
            name: Some("lin".to_string()),
            active: true,
        },
    ])
    .unwrap();
    println!("Inserted 3 users");

    // A duplicate primary key surfaces as a structured error, not a panic.
    let err = db
        .insert(&User {
            id: 1,
            name: Some("dup".to_string()),
            active: false,
        })
        .unwrap_err();
    println!("Duplicate insert failed with code {}: {err}", err.code());

    // === Step 4: Clean up ===
    db.drop_table::<User>().unwrap();
    db.close().unwrap();
    std::fs::remove_file(&path).ok();
    println!("Done");
}
