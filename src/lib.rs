//! Customer records over SQLite, and a scoped text-file resource.
//!
//! # Intention
//!
//! - Wrap a single `customer` table behind `create_table`, `insert` and `update`.
//! - Let SQLite's own constraint errors reach the caller untouched.
//! - Show resource setup and teardown through ownership (`close` or `Drop`).
//!
//! # Architectural Boundaries
//!
//! - Only SQLite/database and file-handle code belongs here.
//! - No pooling, migrations, query building or business rules.

pub mod customer;
pub mod error;
pub mod sqlite;
pub mod text_file;

pub use customer::{Customer, CustomerRecord};
pub use error::{Error, Result};
pub use sqlite::SqliteConfig;
pub use text_file::TextFile;
