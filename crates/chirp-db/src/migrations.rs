use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS account (
            id          INTEGER PRIMARY KEY,
            username    TEXT NOT NULL UNIQUE,
            password    TEXT NOT NULL
        );

        -- posted_by carries no FOREIGN KEY clause; the service layer checks
        -- the account exists before any insert.
        CREATE TABLE IF NOT EXISTS message (
            id          INTEGER PRIMARY KEY,
            posted_by   INTEGER NOT NULL,
            text        TEXT NOT NULL,
            posted_at   INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_message_posted_by
            ON message(posted_by);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
