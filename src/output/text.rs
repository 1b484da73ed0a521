use crate::models::directory::Employee;
use crate::models::{NotificationIntent, ScheduledItem};
use crate::schedule::projector::{DayColumn, SummaryCounts};
use crate::schedule::{DetailView, Outcome};

fn short_id(id: &str) -> &str {
    &id[..std::cmp::min(20, id.len())]
}

pub fn print_item_line(item: &ScheduledItem) {
    println!(
        "  {} [{}] {} ({}) p={}{}",
        item.scheduled_time,
        item.category.as_str().to_uppercase(),
        item.title,
        short_id(&item.id),
        item.priority.as_str(),
        item.department
            .as_deref()
            .map(|d| format!(" • {d}"))
            .unwrap_or_default()
    );
}

pub fn print_item(item: &ScheduledItem) {
    println!("Item: {} ({})", item.title, item.id);
    println!("  Type: {}", item.category.as_str());
    println!("  Time: {}", item.scheduled_time);
    println!("  Status: {}", item.status.as_str());
    println!("  Priority: {}", item.priority.as_str());
    if !item.details.is_empty() {
        println!("  Details: {}", item.details);
    }
    if let Some(ref dept) = item.department {
        println!("  Department: {dept}");
    }
    if let Some(ref assigned) = item.assigned_to {
        println!("  Assigned to: {assigned}");
    }
    if let Some(ref by) = item.assigned_by {
        println!("  Assigned by: {by}");
    }
    if let Some(ref deadline) = item.deadline {
        println!("  Deadline: {deadline}");
    }
    if let Some(ref created) = item.created_at {
        println!("  Created: {created}");
    }
}

pub fn print_detail(view: &DetailView) {
    print_item(&view.item);
    println!("  Date: {}", view.day);
    if view.actions.is_empty() {
        println!("  Actions: none");
    } else {
        let names: Vec<&str> = view.actions.iter().map(|a| a.as_str()).collect();
        println!("  Actions: {}", names.join(", "));
    }
}

pub fn print_outcome(outcome: &Outcome) {
    let message = outcome.feedback.message();
    if !message.is_empty() {
        println!("{message}");
    }
    for n in &outcome.notifications {
        print_notification(n);
    }
}

pub fn print_notification(n: &NotificationIntent) {
    println!("  notify {} ← \"{}\"", n.recipient(), n.item_title);
}

pub fn print_items(items: &[ScheduledItem]) {
    if items.is_empty() {
        println!("No items found.");
        return;
    }
    for item in items {
        print_item_line(item);
    }
}

pub fn print_summary(s: &SummaryCounts) {
    println!(
        "Total items: {}  High priority: {}  Deliveries: {}",
        s.total_active, s.high_priority, s.deliveries
    );
    println!("Completed: {}  Cancelled: {}", s.completed, s.cancelled);
}

pub fn print_board(columns: &[DayColumn], expanded: Option<&str>) {
    for c in columns {
        let date = c.day.to_string();
        let marker = if c.is_today { "Today - " } else { "" };
        let count = match c.items.len() {
            0 => String::new(),
            1 => " (1 item scheduled)".to_string(),
            n => format!(" ({n} items scheduled)"),
        };
        println!("{marker}{} {date}{count}", c.day.weekday_name());

        if c.items.is_empty() {
            println!("  No events");
        }
        let show_details = c.is_today || expanded == Some(date.as_str());
        for item in &c.items {
            if show_details {
                print_item_line(item);
                if !item.details.is_empty() {
                    println!("      {}", item.details);
                }
            } else {
                println!("  [{}] {}", item.category.as_str()[..3].to_uppercase(), item.title);
            }
        }
    }
}

pub fn print_staff(staff: &[&Employee]) {
    if staff.is_empty() {
        println!("No staff found.");
        return;
    }
    for e in staff {
        println!("  {:>3} {} ({})", e.id, e.name, e.department);
    }
}
