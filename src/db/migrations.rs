use rusqlite::Connection;

use crate::error::MillcalError;

pub fn run_migrations(conn: &Connection) -> Result<(), MillcalError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS board (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            version INTEGER NOT NULL DEFAULT 0,
            window_days INTEGER NOT NULL DEFAULT 7,
            generated_on TEXT,
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        INSERT OR IGNORE INTO board (id) VALUES (1);

        CREATE TABLE IF NOT EXISTS items (
            id TEXT PRIMARY KEY,
            day_key TEXT NOT NULL,
            position INTEGER NOT NULL,
            title TEXT NOT NULL CHECK (length(title) > 0),
            category TEXT NOT NULL
                CHECK (category IN ('delivery', 'production', 'payment', 'meeting',
                                    'cutting', 'quality', 'task', 'event')),
            scheduled_time TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending'
                CHECK (status IN ('pending', 'confirmed', 'completed', 'overdue', 'cancelled')),
            priority TEXT NOT NULL DEFAULT 'medium'
                CHECK (priority IN ('low', 'medium', 'high')),
            details TEXT NOT NULL DEFAULT '',
            department TEXT,
            assigned_to TEXT,
            assigned_by TEXT,
            deadline TEXT,
            created_at TEXT,
            UNIQUE (day_key, position)
        );

        CREATE INDEX IF NOT EXISTS idx_items_day ON items(day_key, position);
        CREATE INDEX IF NOT EXISTS idx_items_status ON items(status);
        ",
    )?;
    Ok(())
}
