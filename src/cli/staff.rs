use serde_json::json;

use crate::error::MillcalError;
use crate::models::directory::{self, DEPARTMENTS};
use crate::output;

use super::{finish, print_json, Context};

pub fn run(ctx: &Context, department: Option<&str>) -> i32 {
    finish(run_inner(ctx, department), ctx)
}

fn run_inner(ctx: &Context, department: Option<&str>) -> Result<i32, MillcalError> {
    if let Some(d) = department {
        if !DEPARTMENTS.iter().any(|known| known.eq_ignore_ascii_case(d)) {
            return Err(MillcalError::validation(format!(
                "Unknown department '{d}'. Known: {}",
                DEPARTMENTS.join(", ")
            )));
        }
    }
    let staff = directory::employees_in(department);

    if ctx.json {
        print_json(&output::json::success(json!({
            "departments": DEPARTMENTS,
            "staff": staff
        })));
    } else {
        output::text::print_staff(&staff);
    }
    Ok(0)
}
