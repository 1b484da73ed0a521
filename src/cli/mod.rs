pub mod commands;
pub mod init;
pub mod board;
pub mod item;
pub mod staff;

pub use commands::*;

use chrono::Local;
use serde_json::Value;

use crate::config::Config;
use crate::db::connection;
use crate::error::MillcalError;
use crate::models::DayKey;
use crate::output;

/// Flags shared by every subcommand.
#[derive(Debug, Clone)]
pub struct Context {
    pub json: bool,
    pub today: Option<String>,
}

impl Context {
    /// `--today` if given, otherwise the local calendar day.
    pub fn today(&self) -> Result<DayKey, MillcalError> {
        match self.today.as_deref() {
            Some(s) => DayKey::parse(s),
            None => Ok(DayKey::new(Local::now().date_naive())),
        }
    }
}

pub(crate) fn load_config() -> Result<Config, MillcalError> {
    Config::load(&connection::config_path()?)
}

pub(crate) fn print_json(value: &Value) {
    println!("{value:#}");
}

/// Turns a command result into an exit code, reporting errors in the
/// requested format.
pub(crate) fn finish(result: Result<i32, MillcalError>, ctx: &Context) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            if ctx.json {
                print_json(&output::json::error(&e));
            } else {
                eprintln!("Error: {}", e.message);
            }
            1
        }
    }
}
