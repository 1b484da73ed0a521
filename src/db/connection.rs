use std::env;
use std::fs;
use std::path::PathBuf;

use rusqlite::Connection;
use tracing::debug;

use crate::error::MillcalError;

use super::migrations;

pub const DATA_DIR: &str = ".millcal";

/// Find the directory holding `.millcal` by walking up from the current directory.
pub fn find_project_root() -> Result<PathBuf, MillcalError> {
    let mut dir = env::current_dir()?;
    loop {
        if dir.join(DATA_DIR).is_dir() {
            return Ok(dir);
        }
        if !dir.pop() {
            return Err(MillcalError::not_initialized());
        }
    }
}

/// Root for `init`: an enclosing project if there is one, else the current directory.
fn init_root() -> Result<PathBuf, MillcalError> {
    match find_project_root() {
        Ok(root) => Ok(root),
        Err(_) => Ok(env::current_dir()?),
    }
}

/// Get the path to the millcal database.
pub fn db_path() -> Result<PathBuf, MillcalError> {
    let root = find_project_root()?;
    Ok(root.join(DATA_DIR).join("millcal.db"))
}

/// Get the config file path.
pub fn config_path() -> Result<PathBuf, MillcalError> {
    let root = find_project_root()?;
    Ok(root.join(DATA_DIR).join("config.json"))
}

/// Open a connection to the database. Returns error if not initialized.
pub fn open_db() -> Result<Connection, MillcalError> {
    let path = db_path()?;
    if !path.exists() {
        return Err(MillcalError::not_initialized());
    }
    debug!(path = %path.display(), "opening board database");
    let conn = Connection::open(&path)?;
    configure_connection(&conn)?;
    Ok(conn)
}

/// Initialize the database: create directories, database, and run migrations.
pub fn init_db() -> Result<PathBuf, MillcalError> {
    let dir = init_root()?.join(DATA_DIR);
    fs::create_dir_all(&dir)?;
    let path = dir.join("millcal.db");
    let conn = Connection::open(&path)?;
    configure_connection(&conn)?;
    migrations::run_migrations(&conn)?;
    Ok(path)
}

fn configure_connection(conn: &Connection) -> Result<(), MillcalError> {
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA busy_timeout=5000;
         PRAGMA foreign_keys=ON;",
    )?;
    Ok(())
}
