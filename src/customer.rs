use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sqlite::{self, SqliteConfig};

/// One row of the `customer` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: i64,
    pub email: String,
}

/// Thin wrapper around a connection holding the `customer` table.
///
/// Every operation is a single parameterized statement. Constraint failures
/// come back as [`Error::Sqlite`]; nothing is retried or translated.
pub struct Customer {
    con: Connection,
}

impl Customer {
    /// Open a fresh in-memory database. The table is not created yet.
    pub fn new() -> Result<Self> {
        Self::open(&SqliteConfig::default())
    }

    /// Open the database at `config.db_path`. The config's schema is not
    /// used: the table is always the one from [`sqlite::customer_schema`].
    pub fn open(config: &SqliteConfig) -> Result<Self> {
        Ok(Self {
            con: sqlite::open_connection(config)?,
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.con
    }

    /// Create the table. Not idempotent: a second call fails.
    pub fn create_table(&self) -> Result<()> {
        sqlite::initialize_schema(&self.con, &sqlite::customer_schema())
    }

    /// Insert one customer, returning the number of rows written.
    ///
    /// `None` is bound as SQL NULL, so a missing id or email is rejected by
    /// the table's NOT NULL constraints.
    pub fn insert(&self, id: Option<i64>, email: Option<&str>) -> Result<usize> {
        debug!("insert customer id={:?} email={:?}", id, email);
        let rows = self.con.execute(
            "INSERT INTO customer (id, email) VALUES (?1, ?2)",
            params![id, email],
        )?;
        Ok(rows)
    }

    /// Change the email of customer `id`, returning the number of rows changed.
    ///
    /// An unknown or NULL id matches nothing and yields `Ok(0)`.
    pub fn update(&self, id: Option<i64>, email: Option<&str>) -> Result<usize> {
        debug!("update customer id={:?} email={:?}", id, email);
        let rows = self.con.execute(
            "UPDATE customer SET email = ?2 WHERE id = ?1",
            params![id, email],
        )?;
        Ok(rows)
    }

    pub fn find(&self, id: i64) -> Result<Option<CustomerRecord>> {
        let record = self
            .con
            .query_row(
                "SELECT id, email FROM customer WHERE id = ?1",
                [id],
                |row| {
                    Ok(CustomerRecord {
                        id: row.get(0)?,
                        email: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(record)
    }

    /// Rows changed by INSERT, UPDATE or DELETE since the connection opened.
    pub fn total_changes(&self) -> Result<u64> {
        let total: i64 = self
            .con
            .query_row("SELECT total_changes()", [], |row| row.get(0))?;
        change_count(total)
    }

    /// Close the connection, reporting any failure. Dropping also closes it.
    pub fn close(self) -> Result<()> {
        debug!("closing customer connection");
        self.con.close().map_err(|(_, err)| Error::Sqlite(err))
    }
}

/// SQLite reports change counters as signed integers; a negative one is corrupt.
fn change_count(total: i64) -> Result<u64> {
    u64::try_from(total)
        .map_err(|_| Error::Sqlite(rusqlite::Error::IntegralValueOutOfRange(0, total)))
}
