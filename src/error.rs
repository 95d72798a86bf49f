use std::path::PathBuf;

use rusqlite::ErrorCode;
use thiserror::Error;

/// Errors surfaced by this crate.
///
/// Database failures are carried as the unmodified `rusqlite::Error`, so a
/// caller can still match on SQLite's extended result codes.
#[derive(Debug, Error)]
pub enum Error {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("i/o error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file {} is already closed", .0.display())]
    Closed(PathBuf),
}

impl Error {
    /// True when SQLite rejected the statement on a NOT NULL, UNIQUE or
    /// PRIMARY KEY constraint.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Error::Sqlite(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn not_null_failure_is_a_constraint_violation() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (v TEXT NOT NULL);").unwrap();
        let err: Error = conn
            .execute("INSERT INTO t (v) VALUES (NULL)", [])
            .unwrap_err()
            .into();
        assert!(err.is_constraint_violation());
    }

    #[test]
    fn syntax_error_is_not_a_constraint_violation() {
        let conn = Connection::open_in_memory().unwrap();
        let err: Error = conn.execute("NOT SQL", []).unwrap_err().into();
        assert!(!err.is_constraint_violation());
    }

    #[test]
    fn closed_error_names_the_path() {
        let err = Error::Closed(PathBuf::from("file.txt"));
        assert_eq!(err.to_string(), "file file.txt is already closed");
        assert!(!err.is_constraint_violation());
    }
}
