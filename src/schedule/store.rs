use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use tracing::debug;

use crate::config::{Config, MovePolicy};
use crate::error::MillcalError;
use crate::models::directory;
use crate::models::{
    Category, DayKey, ItemStatus, NotificationIntent, Priority, ScheduledItem, ScheduledTime,
};

const MOVED_MARKER: &str = "-moved-";

/// Form submission for a new item. Empty strings count as absent.
#[derive(Debug, Clone, Default)]
pub struct NewItem {
    pub title: String,
    pub date: String,
    pub category: Option<Category>,
    pub time: Option<String>,
    pub details: Option<String>,
    pub priority: Option<Priority>,
    pub department: Option<String>,
    pub assigned_to: Option<String>,
    pub deadline: Option<String>,
}

/// Values filled in for fields the form left blank.
#[derive(Debug, Clone)]
pub struct ItemDefaults {
    pub time: String,
    pub assigned_by: String,
}

impl From<&Config> for ItemDefaults {
    fn from(config: &Config) -> Self {
        Self {
            time: config.default_time.clone(),
            assigned_by: config.current_user.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Added {
    pub day: DayKey,
    pub item: ScheduledItem,
    pub notification: Option<NotificationIntent>,
}

#[derive(Debug, Clone)]
pub struct Transitioned {
    pub day: DayKey,
    pub from: ItemStatus,
    pub item: ScheduledItem,
}

#[derive(Debug, Clone)]
pub struct Moved {
    pub from: DayKey,
    pub to: DayKey,
    pub previous_id: String,
    pub item: ScheduledItem,
}

/// Day-bucketed schedule. Each item id lives in exactly one bucket, once;
/// buckets keep insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventStore {
    days: BTreeMap<DayKey, Vec<ScheduledItem>>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.values().all(Vec::is_empty)
    }

    pub fn days(&self) -> impl Iterator<Item = &DayKey> {
        self.days.keys()
    }

    pub fn bucket(&self, day: &DayKey) -> &[ScheduledItem] {
        self.days.get(day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn buckets(&self) -> impl Iterator<Item = (&DayKey, &[ScheduledItem])> {
        self.days.iter().map(|(day, items)| (day, items.as_slice()))
    }

    /// All items, day order then insertion order.
    pub fn items(&self) -> impl Iterator<Item = &ScheduledItem> {
        self.days.values().flatten()
    }

    pub fn find(&self, id: &str) -> Option<(DayKey, &ScheduledItem)> {
        self.days
            .iter()
            .find_map(|(day, items)| items.iter().find(|i| i.id == id).map(|i| (*day, i)))
    }

    /// Exact id first, then a unique id prefix. A prefix never reaches across
    /// a `-moved-` suffix, so the id an item had before a remint stops resolving.
    pub fn resolve(&self, reference: &str) -> Result<(DayKey, &ScheduledItem), MillcalError> {
        if let Some(found) = self.find(reference) {
            return Ok(found);
        }

        let matches: Vec<(DayKey, &ScheduledItem)> = self
            .days
            .iter()
            .flat_map(|(day, items)| items.iter().map(move |i| (*day, i)))
            .filter(|(_, i)| {
                i.id
                    .strip_prefix(reference)
                    .is_some_and(|rest| !rest.starts_with(MOVED_MARKER))
            })
            .collect();

        match matches.len() {
            0 => Err(MillcalError::item_not_found(reference)),
            1 => Ok(matches[0]),
            _ => {
                let candidates: Vec<String> = matches
                    .iter()
                    .map(|(_, i)| format!("{} ({})", i.title, i.id))
                    .collect();
                Err(MillcalError::ambiguous_ref(reference, &candidates))
            }
        }
    }

    /// Appends without validation. Callers guarantee id uniqueness.
    pub(crate) fn push(&mut self, day: DayKey, item: ScheduledItem) {
        self.days.entry(day).or_default().push(item);
    }

    /// Ensures a bucket exists even when it has no items.
    pub(crate) fn open_day(&mut self, day: DayKey) {
        self.days.entry(day).or_default();
    }

    pub fn replace_all(&mut self, generated: EventStore) {
        debug!(items = generated.len(), "replacing board contents");
        *self = generated;
    }

    pub fn add_item(&mut self, input: NewItem, defaults: &ItemDefaults) -> Result<Added, MillcalError> {
        let title = input.title.trim();
        let date = input.date.trim();
        if title.is_empty() || date.is_empty() {
            return Err(MillcalError::missing_required_fields());
        }
        let day = DayKey::parse(date)?;

        let time = non_empty(input.time).unwrap_or_else(|| defaults.time.clone());
        let assigned_to = non_empty(input.assigned_to);

        let item = ScheduledItem {
            id: format!("custom-{}", ulid::Ulid::new()),
            title: title.to_string(),
            category: input.category.unwrap_or(Category::Task),
            scheduled_time: ScheduledTime::parse(&time),
            status: ItemStatus::Pending,
            priority: input.priority.unwrap_or(Priority::Medium),
            details: non_empty(input.details).unwrap_or_default(),
            department: non_empty(input.department),
            assigned_to: assigned_to.clone(),
            assigned_by: Some(defaults.assigned_by.clone()),
            deadline: non_empty(input.deadline),
            created_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        };

        let notification = assigned_to.map(|assignee_id| NotificationIntent {
            assignee_name: directory::find_employee(&assignee_id).map(|e| e.name.to_string()),
            assignee_id,
            item_id: item.id.clone(),
            item_title: item.title.clone(),
        });

        self.push(day, item.clone());
        debug!(id = %item.id, %day, "item added");
        Ok(Added {
            day,
            item,
            notification,
        })
    }

    pub fn transition_status(&mut self, id: &str, target: ItemStatus) -> Result<Transitioned, MillcalError> {
        let (day, item) = self
            .days
            .iter_mut()
            .find_map(|(day, items)| items.iter_mut().find(|i| i.id == id).map(|i| (*day, i)))
            .ok_or_else(|| MillcalError::item_not_found(id))?;

        let from = item.status;
        if !from.can_transition_to(target) {
            return Err(MillcalError::invalid_transition(from.as_str(), target.as_str()));
        }
        item.status = target;
        debug!(%id, from = from.as_str(), to = target.as_str(), "status changed");

        Ok(Transitioned {
            day,
            from,
            item: item.clone(),
        })
    }

    /// Moves an item between buckets, appending it to the target.
    /// Returns `None` when source and target are the same day.
    pub fn move_item(
        &mut self,
        id: &str,
        source: DayKey,
        target: DayKey,
        policy: MovePolicy,
    ) -> Result<Option<Moved>, MillcalError> {
        if source == target {
            return Ok(None);
        }

        let bucket = self
            .days
            .get_mut(&source)
            .ok_or_else(|| MillcalError::item_not_found(id))?;
        let position = bucket
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| MillcalError::item_not_found(id))?;
        let mut item = bucket.remove(position);
        if bucket.is_empty() {
            self.days.remove(&source);
        }

        let previous_id = item.id.clone();
        if policy == MovePolicy::Remint {
            item.id = format!("{previous_id}{MOVED_MARKER}{}", ulid::Ulid::new());
        }

        self.push(target, item.clone());
        debug!(%previous_id, id = %item.id, from = %source, to = %target, "item moved");
        Ok(Some(Moved {
            from: source,
            to: target,
            previous_id,
            item,
        }))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
