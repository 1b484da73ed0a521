use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use tracing::info;

use crate::config::{check_window_days, Config, MovePolicy};
use crate::db::board_repo::{self, Generation};
use crate::db::connection;
use crate::error::MillcalError;
use crate::schedule::generator;

use super::{finish, print_json, Context};

pub fn run(
    ctx: &Context,
    seed: Option<u64>,
    days: Option<u32>,
    empty: bool,
    move_policy: Option<&str>,
) -> i32 {
    finish(run_inner(ctx, seed, days, empty, move_policy), ctx)
}

pub(crate) fn parse_move_policy(s: &str) -> Result<MovePolicy, MillcalError> {
    match s {
        "preserve" => Ok(MovePolicy::Preserve),
        "remint" => Ok(MovePolicy::Remint),
        _ => Err(MillcalError::validation(format!(
            "Unknown move policy '{s}'. Use preserve or remint."
        ))),
    }
}

fn run_inner(
    ctx: &Context,
    seed: Option<u64>,
    days: Option<u32>,
    empty: bool,
    move_policy: Option<&str>,
) -> Result<i32, MillcalError> {
    let today = ctx.today()?;
    let policy = move_policy.map(parse_move_policy).transpose()?;
    let days = days.map(check_window_days).transpose()?;

    let path = connection::init_db()?;
    let config_path = connection::config_path()?;
    let mut config = Config::load(&config_path)?;
    if let Some(policy) = policy {
        config.move_policy = policy;
    }
    if let Some(days) = days {
        config.window_days = days;
    }
    config.save(&config_path)?;

    let conn = connection::open_db()?;
    let board = board_repo::load_board(&conn)?;
    // Re-running init keeps an existing board.
    let generated = if board.version == 0 && !empty {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let store = generator::generate(&mut rng, today, config.window_days)?;
        board_repo::save_board(
            &conn,
            &store,
            board.version,
            Some(Generation {
                today,
                window_days: config.window_days,
            }),
        )?;
        info!(items = store.len(), %today, "seeded board");
        store.len()
    } else {
        0
    };

    if ctx.json {
        print_json(&json!({
            "success": true,
            "data": {
                "path": path.to_string_lossy(),
                "generated": generated,
                "window_days": config.window_days,
                "move_policy": config.move_policy.as_str()
            }
        }));
    } else {
        println!("Initialized millcal at {}", path.display());
        if generated > 0 {
            println!("Generated {generated} demo items starting {today}");
        }
    }
    Ok(0)
}
