use serde_json::json;

use crate::db::board_repo;
use crate::db::connection;
use crate::error::MillcalError;
use crate::models::{Category, DayKey, Priority};
use crate::output;
use crate::schedule::{Action, ItemDefaults, NewItem, Session};

use super::{finish, load_config, print_json, Context};

/// Raw `add` arguments as typed on the command line.
pub struct AddArgs {
    pub title: String,
    pub date: Option<String>,
    pub category: Option<String>,
    pub time: Option<String>,
    pub details: Option<String>,
    pub priority: Option<String>,
    pub department: Option<String>,
    pub assign: Option<String>,
    pub deadline: Option<String>,
}

pub fn run_add(ctx: &Context, args: AddArgs) -> i32 {
    finish(add_inner(ctx, args), ctx)
}

pub fn run_show(ctx: &Context, id: &str) -> i32 {
    finish(show_inner(ctx, id), ctx)
}

pub fn run_transition(ctx: &Context, id: &str, action: Action) -> i32 {
    finish(transition_inner(ctx, id, action), ctx)
}

pub fn run_move(ctx: &Context, id: &str, to: &str, from: Option<&str>) -> i32 {
    finish(move_inner(ctx, id, to, from), ctx)
}

fn parse_form(args: AddArgs) -> Result<NewItem, MillcalError> {
    let category = args
        .category
        .as_deref()
        .map(|s| {
            Category::from_str(s)
                .ok_or_else(|| MillcalError::validation(format!("Unknown type '{s}'")))
        })
        .transpose()?;
    let priority = args
        .priority
        .as_deref()
        .map(|s| {
            Priority::from_str(s)
                .ok_or_else(|| MillcalError::validation(format!("Unknown priority '{s}'")))
        })
        .transpose()?;

    Ok(NewItem {
        title: args.title,
        date: args.date.unwrap_or_default(),
        category,
        time: args.time,
        details: args.details,
        priority,
        department: args.department,
        assigned_to: args.assign,
        deadline: args.deadline,
    })
}

fn add_inner(ctx: &Context, args: AddArgs) -> Result<i32, MillcalError> {
    let form = parse_form(args)?;
    let config = load_config()?;
    let conn = connection::open_db()?;

    let outcome = board_repo::update_board(&conn, |board| {
        let mut session = Session::new(&mut board.store, ItemDefaults::from(&config), config.move_policy);
        Ok((session.submit(form)?, None))
    })?;

    if ctx.json {
        print_json(&output::json::success(output::json::outcome_json(&outcome)));
    } else {
        output::text::print_outcome(&outcome);
        if let Some(ref item) = outcome.item {
            println!("  id: {}", item.id);
        }
    }
    Ok(0)
}

fn show_inner(ctx: &Context, id: &str) -> Result<i32, MillcalError> {
    let config = load_config()?;
    let conn = connection::open_db()?;
    let mut board = board_repo::load_board(&conn)?;

    let mut session = Session::new(&mut board.store, ItemDefaults::from(&config), config.move_policy);
    let view = session.open_detail(id)?;

    if ctx.json {
        print_json(&output::json::success(output::json::detail_json(&view)));
    } else {
        output::text::print_detail(&view);
    }
    Ok(0)
}

fn transition_inner(ctx: &Context, id: &str, action: Action) -> Result<i32, MillcalError> {
    let config = load_config()?;
    let conn = connection::open_db()?;

    let outcome = board_repo::update_board(&conn, |board| {
        let mut session = Session::new(&mut board.store, ItemDefaults::from(&config), config.move_policy);
        session.open_detail(id)?;
        Ok((session.apply(action)?, None))
    })?;

    if ctx.json {
        print_json(&output::json::success(output::json::outcome_json(&outcome)));
    } else {
        output::text::print_outcome(&outcome);
    }
    Ok(0)
}

fn move_inner(ctx: &Context, id: &str, to: &str, from: Option<&str>) -> Result<i32, MillcalError> {
    let target = DayKey::parse(to)?;
    let source = from.map(DayKey::parse).transpose()?;
    let config = load_config()?;
    let conn = connection::open_db()?;

    let (outcome, previous_id) = board_repo::update_board(&conn, |board| {
        let mut session = Session::new(&mut board.store, ItemDefaults::from(&config), config.move_policy);
        let previous_id = session.store().resolve(id)?.1.id.clone();
        let outcome = session.drop_item(id, source, target)?;
        Ok(((outcome, previous_id), None))
    })?;

    if ctx.json {
        let mut data = output::json::outcome_json(&outcome);
        data["previous_id"] = json!(previous_id);
        print_json(&output::json::success(data));
    } else {
        output::text::print_outcome(&outcome);
        if let Some(ref item) = outcome.item {
            if item.id != previous_id {
                println!("  new id: {}", item.id);
            }
        }
    }
    Ok(0)
}
