use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use tracing::info;

use crate::config::check_window_days;
use crate::db::board_repo::{self, Generation};
use crate::db::connection;
use crate::error::MillcalError;
use crate::models::DayKey;
use crate::output;
use crate::schedule::projector::{self, Tab};
use crate::schedule::{ItemDefaults, Session};

use super::{finish, load_config, print_json, Context};

pub fn run_generate(ctx: &Context, seed: Option<u64>, days: Option<u32>) -> i32 {
    finish(generate_inner(ctx, seed, days), ctx)
}

pub fn run_board(ctx: &Context, expand: Option<&str>) -> i32 {
    finish(board_inner(ctx, expand), ctx)
}

pub fn run_list(ctx: &Context, tab: &str) -> i32 {
    finish(list_inner(ctx, tab), ctx)
}

pub fn run_status(ctx: &Context) -> i32 {
    finish(status_inner(ctx), ctx)
}

fn generate_inner(ctx: &Context, seed: Option<u64>, days: Option<u32>) -> Result<i32, MillcalError> {
    let today = ctx.today()?;
    let mut config = load_config()?;
    let window_days = check_window_days(days.unwrap_or(config.window_days))?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let conn = connection::open_db()?;
    let (outcome, count) = board_repo::update_board(&conn, |board| {
        let mut session = Session::new(
            &mut board.store,
            ItemDefaults::from(&config),
            config.move_policy,
        );
        let outcome = session.regenerate(&mut rng, today, window_days)?;
        let count = session.store().len();
        Ok(((outcome, count), Some(Generation { today, window_days })))
    })?;

    // The board shows as many days as were last generated.
    if config.window_days != window_days {
        config.window_days = window_days;
        config.save(&connection::config_path()?)?;
        info!(window_days, "board width updated");
    }

    if ctx.json {
        print_json(&output::json::success(json!({
            "generated": count,
            "start": today.to_string(),
            "window_days": window_days,
            "feedback": output::json::feedback_json(&outcome.feedback)
        })));
    } else {
        output::text::print_outcome(&outcome);
    }
    Ok(0)
}

fn board_inner(ctx: &Context, expand: Option<&str>) -> Result<i32, MillcalError> {
    let today = ctx.today()?;
    let expand = expand.map(DayKey::parse).transpose()?;
    let config = load_config()?;
    let conn = connection::open_db()?;
    let mut board = board_repo::load_board(&conn)?;

    let mut session = Session::new(&mut board.store, ItemDefaults::from(&config), config.move_policy);
    if let Some(day) = expand {
        session.toggle_day(day);
    }
    let expanded = session.expanded();
    let snapshot = projector::project(session.store());
    let columns = projector::week(&snapshot, today, config.window_days)?;

    if ctx.json {
        let days: Vec<_> = columns
            .iter()
            .map(|c| output::json::column_json(c, c.is_today || Some(c.day) == expanded))
            .collect();
        print_json(&output::json::success(json!({
            "today": today.to_string(),
            "days": days,
            "summary": output::json::summary_json(&snapshot.summary)
        })));
    } else {
        let expanded = expanded.map(|d| d.to_string());
        output::text::print_summary(&snapshot.summary);
        println!();
        output::text::print_board(&columns, expanded.as_deref());
    }
    Ok(0)
}

fn list_inner(ctx: &Context, tab: &str) -> Result<i32, MillcalError> {
    let tab = Tab::from_str(tab).ok_or_else(|| {
        MillcalError::validation(format!("Unknown tab '{tab}'. Use active, completed or cancelled."))
    })?;
    let config = load_config()?;
    let conn = connection::open_db()?;
    let mut board = board_repo::load_board(&conn)?;

    let mut session = Session::new(&mut board.store, ItemDefaults::from(&config), config.move_policy);
    session.select_tab(tab);
    let snapshot = projector::project(session.store());
    let items = snapshot.partition(session.tab());

    if ctx.json {
        let items_json: Vec<_> = if session.tab() == Tab::Active {
            snapshot
                .active_by_date
                .iter()
                .flat_map(|(day, items)| {
                    items.iter().map(move |i| {
                        let mut v = output::json::item_summary(i);
                        v["date"] = json!(day.to_string());
                        v
                    })
                })
                .collect()
        } else {
            items.iter().map(output::json::item_summary).collect()
        };
        print_json(&output::json::success(json!({
            "tab": session.tab().as_str(),
            "count": items.len(),
            "items": items_json
        })));
    } else if session.tab() == Tab::Active {
        if snapshot.active_by_date.is_empty() {
            println!("No items found.");
        }
        for (day, items) in &snapshot.active_by_date {
            println!("{day}");
            output::text::print_items(items);
        }
    } else {
        output::text::print_items(items);
    }
    Ok(0)
}

fn status_inner(ctx: &Context) -> Result<i32, MillcalError> {
    let conn = connection::open_db()?;
    let board = board_repo::load_board(&conn)?;
    let snapshot = projector::project(&board.store);

    if ctx.json {
        print_json(&output::json::success(json!({
            "summary": output::json::summary_json(&snapshot.summary),
            "version": board.version,
            "window_days": board.window_days,
            "generated_on": board.generated_on.map(|d| d.to_string()),
            "days": snapshot.active_by_date.keys().map(|d| d.to_string()).collect::<Vec<_>>()
        })));
    } else {
        output::text::print_summary(&snapshot.summary);
        if let Some(day) = board.generated_on {
            println!("Board generated for {} days from {day}", board.window_days);
        }
    }
    Ok(0)
}
