//! Demo schedule for a mill floor: a few deliveries, floor tasks and
//! meetings on every day of the window.

use rand::Rng;

use crate::config::check_window_days;
use crate::error::MillcalError;
use crate::models::directory::DEPARTMENTS;
use crate::models::{Category, DayKey, ItemStatus, Priority, ScheduledItem, ScheduledTime};

use super::store::EventStore;

pub const DEFAULT_WINDOW_DAYS: u32 = 7;

struct CatalogEntry {
    category: Category,
    titles: &'static [&'static str],
    details: &'static [&'static str],
}

const CATALOG: [CatalogEntry; 3] = [
    CatalogEntry {
        category: Category::Task,
        titles: &[
            "Quality Check",
            "Sewing Line 1",
            "Cutting Department",
            "Maintenance Check",
            "Pattern Making Workshop",
            "Packaging & Labeling",
        ],
        details: &[
            "Final quality inspection for summer collection",
            "Complete 150 t-shirts for Order #MT-2024-003",
            "Cut 200 pieces for denim jacket production",
            "Inspect incoming silk fabric shipment",
            "Review and approve fall collection designs",
        ],
    },
    CatalogEntry {
        category: Category::Delivery,
        titles: &[
            "Dye Chemicals Delivery",
            "Finished Goods Shipment",
            "Trim & Hardware Delivery",
            "Export Shipment",
        ],
        details: &[
            "Reactive dyes for next batch coloring",
            "Ship 500 units to Retailer Network East",
            "Buttons, zippers, and other hardware items",
            "Container shipment to European markets",
        ],
    },
    CatalogEntry {
        category: Category::Event,
        titles: &[
            "Design Review Meeting",
            "Supplier Audit",
            "Production Planning Meeting",
            "Client Visit",
            "Weekly Performance Review",
            "Inventory Audit",
        ],
        details: &[
            "Review and approve fall collection designs",
            "Annual supplier compliance audit",
            "Monthly production capacity analysis",
            "Product showcase and contract discussion",
            "Weekly production capacity review",
        ],
    },
];

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, pool: &[&'a str]) -> &'a str {
    pool[rng.gen_range(0..pool.len())]
}

fn draw_status<R: Rng + ?Sized>(rng: &mut R) -> ItemStatus {
    if rng.gen::<f64>() > 0.8 {
        ItemStatus::Completed
    } else if rng.gen::<f64>() > 0.6 {
        ItemStatus::Confirmed
    } else {
        ItemStatus::Pending
    }
}

fn draw_priority<R: Rng + ?Sized>(rng: &mut R) -> Priority {
    if rng.gen::<f64>() > 0.7 {
        Priority::High
    } else if rng.gen::<f64>() > 0.5 {
        Priority::Medium
    } else {
        Priority::Low
    }
}

fn draw_time<R: Rng + ?Sized>(rng: &mut R) -> ScheduledTime {
    let hour: u16 = rng.gen_range(1..=12);
    let minute = if rng.gen_bool(0.5) { "00" } else { "30" };
    let meridiem = if rng.gen_bool(0.5) { "AM" } else { "PM" };
    ScheduledTime::parse(&format!("{hour:02}:{minute} {meridiem}"))
}

/// Builds a fresh board covering `window_days` days from `today` inclusive,
/// 2 to 5 items per day. Same seed and day, same board.
///
/// Fails before drawing anything when the window is out of bounds or runs
/// past the last representable date.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    today: DayKey,
    window_days: u32,
) -> Result<EventStore, MillcalError> {
    check_window_days(window_days)?;
    today.plus_days(i64::from(window_days - 1))?;
    let mut store = EventStore::new();

    for day_index in 0..window_days {
        let day = today.plus_days(i64::from(day_index))?;
        store.open_day(day);

        let count = rng.gen_range(2..=5);
        for item_index in 0..count {
            let entry = &CATALOG[rng.gen_range(0..CATALOG.len())];
            let title = pick(rng, entry.titles);
            let department = pick(rng, &DEPARTMENTS);
            let scheduled_time = draw_time(rng);
            let status = draw_status(rng);
            let details = pick(rng, entry.details);
            let priority = draw_priority(rng);

            store.push(
                day,
                ScheduledItem {
                    id: format!("{}-{}-{}", entry.category.as_str(), day_index, item_index),
                    title: title.to_string(),
                    category: entry.category,
                    scheduled_time,
                    status,
                    priority,
                    details: details.to_string(),
                    department: Some(department.to_string()),
                    assigned_to: None,
                    assigned_by: None,
                    deadline: None,
                    created_at: None,
                },
            );
        }
    }

    Ok(store)
}
