use rusqlite::types::Type;
use rusqlite::{params, Connection};
use tracing::{debug, warn};

use crate::error::MillcalError;
use crate::models::{Category, DayKey, ItemStatus, Priority, ScheduledItem, ScheduledTime};
use crate::schedule::EventStore;

/// The persisted store together with the version it was read at.
#[derive(Debug, Clone)]
pub struct Board {
    pub store: EventStore,
    pub version: i64,
    pub window_days: u32,
    pub generated_on: Option<DayKey>,
}

/// Set when a save replaces the board with a freshly generated one.
#[derive(Debug, Clone, Copy)]
pub struct Generation {
    pub today: DayKey,
    pub window_days: u32,
}

pub fn load_board(conn: &Connection) -> Result<Board, MillcalError> {
    let (version, window_days, generated_on): (i64, u32, Option<String>) = conn.query_row(
        "SELECT version, window_days, generated_on FROM board WHERE id = 1",
        [],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )?;

    let mut stmt = conn.prepare(
        "SELECT day_key, id, title, category, scheduled_time, status, priority, details,
                department, assigned_to, assigned_by, deadline, created_at
         FROM items ORDER BY day_key ASC, position ASC",
    )?;
    let rows = stmt
        .query_map([], row_to_item)?
        .collect::<Result<Vec<_>, _>>()?;

    let mut store = EventStore::new();
    for (day, item) in rows {
        let day = DayKey::parse(&day)
            .map_err(|_| MillcalError::persistence(format!("Corrupt day key '{day}' on item {}", item.id)))?;
        store.push(day, item);
    }

    let generated_on = generated_on.as_deref().map(DayKey::parse).transpose()?;
    debug!(version, items = store.len(), "board loaded");
    Ok(Board {
        store,
        version,
        window_days,
        generated_on,
    })
}

/// Writes the whole store if the board is still at `expected_version`.
/// Returns the new version. A stale version writes nothing.
pub fn save_board(
    conn: &Connection,
    store: &EventStore,
    expected_version: i64,
    generation: Option<Generation>,
) -> Result<i64, MillcalError> {
    conn.execute_batch("BEGIN IMMEDIATE")?;
    let result = (|| -> Result<i64, MillcalError> {
        let changed = match generation {
            Some(g) => conn.execute(
                "UPDATE board SET version = version + 1, window_days = ?2, generated_on = ?3,
                        updated_at = datetime('now')
                 WHERE id = 1 AND version = ?1",
                params![expected_version, g.window_days, g.today.to_string()],
            )?,
            None => conn.execute(
                "UPDATE board SET version = version + 1, updated_at = datetime('now')
                 WHERE id = 1 AND version = ?1",
                params![expected_version],
            )?,
        };
        if changed == 0 {
            return Err(MillcalError::version_conflict(expected_version));
        }

        conn.execute("DELETE FROM items", [])?;
        let mut insert = conn.prepare(
            "INSERT INTO items (id, day_key, position, title, category, scheduled_time, status,
                                priority, details, department, assigned_to, assigned_by, deadline, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        )?;
        for (day, items) in store.buckets() {
            for (position, item) in items.iter().enumerate() {
                insert.execute(params![
                    item.id,
                    day.to_string(),
                    position as i64,
                    item.title,
                    item.category.as_str(),
                    item.scheduled_time.as_str(),
                    item.status.as_str(),
                    item.priority.as_str(),
                    item.details,
                    item.department,
                    item.assigned_to,
                    item.assigned_by,
                    item.deadline,
                    item.created_at,
                ])?;
            }
        }
        Ok(expected_version + 1)
    })();

    match result {
        Ok(version) => {
            conn.execute_batch("COMMIT")?;
            debug!(version, items = store.len(), "board saved");
            Ok(version)
        }
        Err(e) => {
            let _ = conn.execute_batch("ROLLBACK");
            if e.is_retryable() {
                warn!(expected_version, "board changed underneath this session");
            }
            Err(e)
        }
    }
}

/// Load, apply one mutation, save with compare-and-swap.
pub fn update_board<T>(
    conn: &Connection,
    mutate: impl FnOnce(&mut Board) -> Result<(T, Option<Generation>), MillcalError>,
) -> Result<T, MillcalError> {
    let mut board = load_board(conn)?;
    let (value, generation) = mutate(&mut board)?;
    save_board(conn, &board.store, board.version, generation)?;
    Ok(value)
}

/// Reads a text column into one of the item enums; unknown text is corruption.
fn enum_column<T>(
    row: &rusqlite::Row,
    idx: usize,
    parse: impl Fn(&str) -> Option<T>,
) -> rusqlite::Result<T> {
    let text: String = row.get(idx)?;
    parse(&text).ok_or_else(|| {
        let id: String = row.get(1).unwrap_or_default();
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            Box::new(MillcalError::persistence(format!(
                "Corrupt value '{text}' on item {id}"
            ))),
        )
    })
}

fn row_to_item(row: &rusqlite::Row) -> rusqlite::Result<(String, ScheduledItem)> {
    let day: String = row.get(0)?;
    let item = ScheduledItem {
        id: row.get(1)?,
        title: row.get(2)?,
        category: enum_column(row, 3, Category::from_str)?,
        scheduled_time: ScheduledTime::parse(&row.get::<_, String>(4)?),
        status: enum_column(row, 5, ItemStatus::from_str)?,
        priority: enum_column(row, 6, Priority::from_str)?,
        details: row.get(7)?,
        department: row.get(8)?,
        assigned_to: row.get(9)?,
        assigned_by: row.get(10)?,
        deadline: row.get(11)?,
        created_at: row.get(12)?,
    };
    Ok((day, item))
}
