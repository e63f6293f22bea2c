//! Layout versions of the form store file.
//!
//! Each step is a SQL script that moves the `kv_entries` layout forward by
//! one version. The reached version is written to `PRAGMA user_version`, so
//! reopening a file only runs the steps it has not seen.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

/// `(layout version, script)` pairs in ascending order.
const LAYOUT_STEPS: &[(u32, &str)] = &[(1, include_str!("0001_kv_entries.sql"))];

/// Newest store layout this build can read and write.
pub fn latest_version() -> u32 {
    LAYOUT_STEPS.last().map_or(0, |&(version, _)| version)
}

/// Brings the store file up to `latest_version` in one transaction.
///
/// # Errors
/// - `DbError::NewerStoreLayout` when the file is ahead of this build.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = stored_layout_version(conn)?;
    let supported = latest_version();
    if found > supported {
        return Err(DbError::NewerStoreLayout { found, supported });
    }

    let pending: Vec<_> = LAYOUT_STEPS
        .iter()
        .filter(|&&(version, _)| version > found)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for &&(version, script) in &pending {
        tx.execute_batch(script)?;
        tx.pragma_update(None, "user_version", version)?;
    }
    tx.commit()?;
    Ok(())
}

fn stored_layout_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

#[cfg(test)]
mod tests {
    use super::{apply_migrations, latest_version, stored_layout_version};
    use crate::db::DbError;
    use rusqlite::Connection;

    #[test]
    fn fresh_file_reaches_latest_layout_and_reapply_is_noop() {
        let mut conn = Connection::open_in_memory().expect("open");
        apply_migrations(&mut conn).expect("first apply");
        apply_migrations(&mut conn).expect("second apply");
        assert_eq!(stored_layout_version(&conn).expect("version"), latest_version());
    }

    #[test]
    fn newer_layout_is_refused() {
        let mut conn = Connection::open_in_memory().expect("open");
        conn.pragma_update(None, "user_version", latest_version() + 1)
            .expect("bump version");
        let err = apply_migrations(&mut conn).expect_err("newer layout");
        assert!(matches!(err, DbError::NewerStoreLayout { found, .. } if found == latest_version() + 1));
    }
}
