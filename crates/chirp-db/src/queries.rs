use crate::models::{AccountRow, MessageRow};
use crate::Database;
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, Row, params};

impl Database {
    // -- Accounts --

    /// Insert a new account and return its generated id.
    pub fn insert_account(&self, username: &str, password: &str) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO account (username, password) VALUES (?1, ?2)",
                params![username, password],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn find_account_by_username(&self, username: &str) -> Result<Option<AccountRow>> {
        self.with_conn(|conn| query_account_by_username(conn, username))
    }

    pub fn find_account_by_id(&self, id: i64) -> Result<Option<AccountRow>> {
        self.with_conn(|conn| query_account_by_id(conn, id))
    }

    /// Exact, case-sensitive match on both username and password.
    pub fn find_account_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AccountRow>> {
        self.with_conn(|conn| {
            let row = conn
                .prepare(
                    "SELECT id, username, password FROM account
                     WHERE username = ?1 AND password = ?2",
                )?
                .query_row(params![username, password], account_from_row)
                .optional()?;
            Ok(row)
        })
    }

    // -- Messages --

    /// Insert a new message and return its generated id.
    pub fn insert_message(&self, posted_by: i64, text: &str, posted_at: i64) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO message (posted_by, text, posted_at) VALUES (?1, ?2, ?3)",
                params![posted_by, text, posted_at],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn find_message_by_id(&self, id: i64) -> Result<Option<MessageRow>> {
        self.with_conn(|conn| {
            let row = conn
                .prepare("SELECT id, posted_by, text, posted_at FROM message WHERE id = ?1")?
                .query_row([id], message_from_row)
                .optional()?;
            Ok(row)
        })
    }

    /// Returns the number of rows changed — 0 when no message has this id.
    pub fn update_message_text(&self, id: i64, text: &str) -> Result<usize> {
        self.with_conn(|conn| {
            let affected = conn.execute(
                "UPDATE message SET text = ?2 WHERE id = ?1",
                params![id, text],
            )?;
            Ok(affected)
        })
    }

    /// Returns the number of rows deleted — 0 when no message has this id.
    pub fn delete_message_by_id(&self, id: i64) -> Result<usize> {
        self.with_conn(|conn| {
            let affected = conn.execute("DELETE FROM message WHERE id = ?1", [id])?;
            Ok(affected)
        })
    }

    pub fn list_messages(&self) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, posted_by, text, posted_at FROM message ORDER BY id")?;
            let rows = stmt
                .query_map([], message_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn list_messages_by_account(&self, account_id: i64) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, posted_by, text, posted_at FROM message
                 WHERE posted_by = ?1
                 ORDER BY id",
            )?;
            let rows = stmt
                .query_map([account_id], message_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }
}

fn query_account_by_username(conn: &Connection, username: &str) -> Result<Option<AccountRow>> {
    let row = conn
        .prepare("SELECT id, username, password FROM account WHERE username = ?1")?
        .query_row([username], account_from_row)
        .optional()?;
    Ok(row)
}

fn query_account_by_id(conn: &Connection, id: i64) -> Result<Option<AccountRow>> {
    let row = conn
        .prepare("SELECT id, username, password FROM account WHERE id = ?1")?
        .query_row([id], account_from_row)
        .optional()?;
    Ok(row)
}

fn account_from_row(row: &Row) -> rusqlite::Result<AccountRow> {
    Ok(AccountRow {
        id: row.get(0)?,
        username: row.get(1)?,
        password: row.get(2)?,
    })
}

fn message_from_row(row: &Row) -> rusqlite::Result<MessageRow> {
    Ok(MessageRow {
        id: row.get(0)?,
        posted_by: row.get(1)?,
        text: row.get(2)?,
        posted_at: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use crate::Database;

    #[test]
    fn insert_and_find_account() {
        let db = Database::open_in_memory().unwrap();

        let id = db.insert_account("alice", "pass1").unwrap();
        let row = db.find_account_by_username("alice").unwrap().unwrap();
        assert_eq!(row.id, id);
        assert_eq!(row.username, "alice");
        assert_eq!(row.password, "pass1");

        let by_id = db.find_account_by_id(id).unwrap().unwrap();
        assert_eq!(by_id.username, "alice");
    }

    #[test]
    fn duplicate_username_violates_unique_constraint() {
        let db = Database::open_in_memory().unwrap();

        db.insert_account("alice", "pass1").unwrap();
        // Surfaces as a store fault at this layer; the service rejects
        // duplicates before ever reaching this insert.
        assert!(db.insert_account("alice", "other").is_err());
    }

    #[test]
    fn credentials_match_is_exact_and_case_sensitive() {
        let db = Database::open_in_memory().unwrap();
        db.insert_account("alice", "pass1").unwrap();

        assert!(db.find_account_by_credentials("alice", "pass1").unwrap().is_some());
        assert!(db.find_account_by_credentials("alice", "PASS1").unwrap().is_none());
        assert!(db.find_account_by_credentials("Alice", "pass1").unwrap().is_none());
        assert!(db.find_account_by_credentials("alice", "pass").unwrap().is_none());
    }

    #[test]
    fn update_and_delete_report_affected_rows() {
        let db = Database::open_in_memory().unwrap();
        let account = db.insert_account("alice", "pass1").unwrap();
        let id = db.insert_message(account, "hi", 1_700_000_000).unwrap();

        assert_eq!(db.update_message_text(id, "hi there").unwrap(), 1);
        assert_eq!(db.update_message_text(999, "nope").unwrap(), 0);

        assert_eq!(db.delete_message_by_id(id).unwrap(), 1);
        assert_eq!(db.delete_message_by_id(id).unwrap(), 0);
    }

    #[test]
    fn list_messages_by_account_filters_on_posted_by() {
        let db = Database::open_in_memory().unwrap();
        let alice = db.insert_account("alice", "pass1").unwrap();
        let bob = db.insert_account("bob", "pass2").unwrap();

        db.insert_message(alice, "one", 1).unwrap();
        db.insert_message(bob, "two", 2).unwrap();
        db.insert_message(alice, "three", 3).unwrap();

        let all = db.list_messages().unwrap();
        assert_eq!(all.len(), 3);

        let mine = db.list_messages_by_account(alice).unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|m| m.posted_by == alice));

        assert!(db.list_messages_by_account(999).unwrap().is_empty());
    }
}
