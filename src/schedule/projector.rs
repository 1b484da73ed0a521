use std::collections::BTreeMap;

use crate::error::MillcalError;
use crate::models::{Category, DayKey, ItemStatus, Priority, ScheduledItem};

use super::store::EventStore;

/// Status tab on the board; each maps to one partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Active,
    Completed,
    Cancelled,
}

impl Tab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn of(status: ItemStatus) -> Self {
        match status {
            ItemStatus::Completed => Self::Completed,
            ItemStatus::Cancelled => Self::Cancelled,
            _ => Self::Active,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryCounts {
    pub total_active: usize,
    pub high_priority: usize,
    pub deliveries: usize,
    pub completed: usize,
    pub cancelled: usize,
}

/// Read-only view of the whole store, rebuilt on every read.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub active: Vec<ScheduledItem>,
    pub completed: Vec<ScheduledItem>,
    pub cancelled: Vec<ScheduledItem>,
    pub active_by_date: BTreeMap<DayKey, Vec<ScheduledItem>>,
    pub summary: SummaryCounts,
}

impl Snapshot {
    pub fn partition(&self, tab: Tab) -> &[ScheduledItem] {
        match tab {
            Tab::Active => &self.active,
            Tab::Completed => &self.completed,
            Tab::Cancelled => &self.cancelled,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DayColumn {
    pub day: DayKey,
    pub is_today: bool,
    pub items: Vec<ScheduledItem>,
}

/// Stable sort by time of day; equal times keep bucket order.
pub fn sort_by_time(items: &mut [ScheduledItem]) {
    items.sort_by_key(|i| i.scheduled_time.sort_key());
}

pub fn project(store: &EventStore) -> Snapshot {
    let mut snapshot = Snapshot::default();

    for (day, items) in store.buckets() {
        let mut active_today = Vec::new();
        for item in items {
            match Tab::of(item.status) {
                Tab::Active => {
                    snapshot.active.push(item.clone());
                    active_today.push(item.clone());
                }
                Tab::Completed => snapshot.completed.push(item.clone()),
                Tab::Cancelled => snapshot.cancelled.push(item.clone()),
            }
        }
        if !active_today.is_empty() {
            sort_by_time(&mut active_today);
            snapshot.active_by_date.insert(*day, active_today);
        }
    }

    snapshot.summary = SummaryCounts {
        total_active: snapshot.active.len(),
        high_priority: snapshot
            .active
            .iter()
            .filter(|i| i.priority == Priority::High)
            .count(),
        deliveries: snapshot
            .active
            .iter()
            .filter(|i| i.category == Category::Delivery)
            .count(),
        completed: snapshot.completed.len(),
        cancelled: snapshot.cancelled.len(),
    };
    snapshot
}

/// Board layout: one column per day from `today`, empty days included.
pub fn week(snapshot: &Snapshot, today: DayKey, days: u32) -> Result<Vec<DayColumn>, MillcalError> {
    (0..days)
        .map(|offset| {
            let day = today.plus_days(i64::from(offset))?;
            Ok(DayColumn {
                day,
                is_today: day == today,
                items: snapshot.active_by_date.get(&day).cloned().unwrap_or_default(),
            })
        })
        .collect()
}
