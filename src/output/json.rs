use serde_json::{json, Value};

use crate::error::MillcalError;
use crate::models::{NotificationIntent, ScheduledItem};
use crate::schedule::projector::{DayColumn, SummaryCounts};
use crate::schedule::{DetailView, Feedback, Outcome};

pub fn success(data: Value) -> Value {
    json!({
        "success": true,
        "data": data
    })
}

pub fn error(err: &MillcalError) -> Value {
    json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message,
            "retryable": err.is_retryable()
        },
        "feedback": feedback_json(&Feedback::from(err))
    })
}

pub fn feedback_json(f: &Feedback) -> Value {
    match f {
        Feedback::Success(m) => json!({ "kind": "success", "message": m }),
        Feedback::Error(m) => json!({ "kind": "error", "message": m }),
    }
}

pub fn item_summary(item: &ScheduledItem) -> Value {
    json!({
        "id": item.id,
        "title": item.title,
        "category": item.category.as_str(),
        "time": item.scheduled_time.as_str(),
        "status": item.status.as_str(),
        "priority": item.priority.as_str()
    })
}

pub fn item_detail(item: &ScheduledItem) -> Value {
    json!({
        "id": item.id,
        "title": item.title,
        "category": item.category.as_str(),
        "time": item.scheduled_time.as_str(),
        "status": item.status.as_str(),
        "priority": item.priority.as_str(),
        "details": item.details,
        "department": item.department,
        "assigned_to": item.assigned_to,
        "assigned_by": item.assigned_by,
        "deadline": item.deadline,
        "created_at": item.created_at
    })
}

pub fn detail_json(view: &DetailView) -> Value {
    json!({
        "date": view.day.to_string(),
        "item": item_detail(&view.item),
        "actions": view.actions.iter().map(|a| a.as_str()).collect::<Vec<_>>()
    })
}

pub fn notification_json(n: &NotificationIntent) -> Value {
    json!({
        "assignee_id": n.assignee_id,
        "assignee_name": n.assignee_name,
        "item_id": n.item_id,
        "item_title": n.item_title
    })
}

pub fn outcome_json(o: &Outcome) -> Value {
    let mut v = json!({
        "feedback": feedback_json(&o.feedback),
        "notifications": o.notifications.iter().map(notification_json).collect::<Vec<_>>()
    });
    if let Some(day) = o.day {
        v["date"] = json!(day.to_string());
    }
    if let Some(ref item) = o.item {
        v["item"] = item_detail(item);
    }
    v
}

pub fn summary_json(s: &SummaryCounts) -> Value {
    json!({
        "total_active": s.total_active,
        "high_priority": s.high_priority,
        "deliveries": s.deliveries,
        "completed": s.completed,
        "cancelled": s.cancelled
    })
}

pub fn column_json(c: &DayColumn, expanded: bool) -> Value {
    let items: Vec<Value> = if expanded {
        c.items.iter().map(item_detail).collect()
    } else {
        c.items.iter().map(item_summary).collect()
    };
    json!({
        "date": c.day.to_string(),
        "weekday": c.day.weekday_name(),
        "is_today": c.is_today,
        "expanded": expanded,
        "count": c.items.len(),
        "items": items
    })
}
