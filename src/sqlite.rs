use std::fmt;

use log::{debug, info};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Path SQLite interprets as a private, in-memory database.
pub const IN_MEMORY: &str = ":memory:";

/// Schema definition for the SQLite database
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub tables: Vec<TableDefinition>,
}

impl Schema {
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }
    pub fn add_table(mut self, table: TableDefinition) -> Self {
        self.tables.push(table);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDefinition {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
    #[serde(default)]
    pub without_rowid: bool,
}

impl TableDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            without_rowid: false,
        }
    }
    pub fn add_column(mut self, column: ColumnDefinition) -> Self {
        self.columns.push(column);
        self
    }
    /// Store the table as a clustered index on its primary key.
    ///
    /// An `INTEGER PRIMARY KEY` column of an ordinary table aliases the rowid,
    /// and SQLite then fills in a NULL key instead of rejecting it.
    pub fn without_rowid(mut self) -> Self {
        self.without_rowid = true;
        self
    }

    /// Render the `CREATE TABLE` statement for this table.
    pub fn to_sql(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(ColumnDefinition::to_sql)
            .collect::<Vec<_>>()
            .join(", ");
        let suffix = if self.without_rowid { " WITHOUT ROWID" } else { "" };
        format!(
            "CREATE TABLE {} ({}){};",
            quote_identifier(&self.name),
            columns,
            suffix
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: DataType,
    #[serde(default)]
    pub constraints: Vec<ColumnConstraint>,
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            constraints: Vec::new(),
        }
    }
    pub fn with_constraint(mut self, constraint: ColumnConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    fn to_sql(&self) -> String {
        let mut sql = format!("{} {}", quote_identifier(&self.name), self.data_type);
        for constraint in &self.constraints {
            sql.push(' ');
            sql.push_str(&constraint.to_string());
        }
        sql
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    Integer,
    Text,
    Real,
    Blob,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DataType::Integer => "INTEGER",
            DataType::Text => "TEXT",
            DataType::Real => "REAL",
            DataType::Blob => "BLOB",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnConstraint {
    PrimaryKey,
    NotNull,
    Unique,
}

impl fmt::Display for ColumnConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColumnConstraint::PrimaryKey => "PRIMARY KEY",
            ColumnConstraint::NotNull => "NOT NULL",
            ColumnConstraint::Unique => "UNIQUE",
        })
    }
}

/// Wrap a table or column name in double quotes, doubling any embedded quote.
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// The `customer` table: an integer key and a unique email, both required.
pub fn customer_schema() -> Schema {
    Schema::new().add_table(
        TableDefinition::new("customer")
            .add_column(
                ColumnDefinition::new("id", DataType::Integer)
                    .with_constraint(ColumnConstraint::NotNull)
                    .with_constraint(ColumnConstraint::PrimaryKey),
            )
            .add_column(
                ColumnDefinition::new("email", DataType::Text)
                    .with_constraint(ColumnConstraint::NotNull)
                    .with_constraint(ColumnConstraint::Unique),
            )
            .without_rowid(),
    )
}

/// SQLite configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SqliteConfig {
    /// Path to the SQLite database file, or `:memory:`
    pub db_path: String,
    /// Schema definition for the database
    pub schema: Schema,
}

impl SqliteConfig {
    /// Create a new SQLite config with path and schema
    pub fn new(db_path: impl Into<String>, schema: Schema) -> Self {
        Self {
            db_path: db_path.into(),
            schema,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.db_path == IN_MEMORY
    }
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self::new(IN_MEMORY, customer_schema())
    }
}

/// Open the connection described by `config`. The schema is not applied.
pub fn open_connection(config: &SqliteConfig) -> Result<Connection> {
    let connection = if config.is_in_memory() {
        Connection::open_in_memory()?
    } else {
        Connection::open(&config.db_path)?
    };
    info!("opened sqlite database at {}", config.db_path);
    Ok(connection)
}

/// Create every table of `schema`. Fails if any table already exists.
pub fn initialize_schema(conn: &Connection, schema: &Schema) -> Result<()> {
    for table in &schema.tables {
        let sql = table.to_sql();
        debug!("{}", sql);
        conn.execute_batch(&sql)?;
    }
    Ok(())
}
