use rand::Rng;
use tracing::info;

use crate::config::MovePolicy;
use crate::error::MillcalError;
use crate::models::{DayKey, ItemStatus, NotificationIntent, ScheduledItem};

use super::generator;
use super::projector::Tab;
use super::store::{EventStore, ItemDefaults, NewItem};

/// Transient confirmation or error text for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Success(String),
    Error(String),
}

impl Feedback {
    pub fn message(&self) -> &str {
        match self {
            Self::Success(m) | Self::Error(m) => m,
        }
    }
}

impl From<&MillcalError> for Feedback {
    fn from(err: &MillcalError) -> Self {
        Self::Error(err.message.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Confirm,
    Complete,
    Cancel,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirm => "confirm",
            Self::Complete => "complete",
            Self::Cancel => "cancel",
        }
    }

    pub fn target(&self) -> ItemStatus {
        match self {
            Self::Confirm => ItemStatus::Confirmed,
            Self::Complete => ItemStatus::Completed,
            Self::Cancel => ItemStatus::Cancelled,
        }
    }

    /// Actions offered by the detail view for an item in `status`.
    pub fn available_for(status: ItemStatus) -> Vec<Action> {
        [Self::Confirm, Self::Complete, Self::Cancel]
            .into_iter()
            .filter(|a| status.can_transition_to(a.target()))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct DetailView {
    pub day: DayKey,
    pub item: ScheduledItem,
    pub actions: Vec<Action>,
}

/// What one interaction produced. `item` is the item as it stands afterwards.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub feedback: Feedback,
    pub day: Option<DayKey>,
    pub item: Option<ScheduledItem>,
    pub notifications: Vec<NotificationIntent>,
}

impl Outcome {
    fn success(message: impl Into<String>) -> Self {
        Self {
            feedback: Feedback::Success(message.into()),
            day: None,
            item: None,
            notifications: Vec::new(),
        }
    }
}

/// The only writer of the store. Holds what the user has open on screen:
/// the item in the detail dialog, the expanded day and the status tab.
pub struct Session<'a> {
    store: &'a mut EventStore,
    defaults: ItemDefaults,
    move_policy: MovePolicy,
    selected: Option<String>,
    expanded: Option<DayKey>,
    tab: Tab,
}

impl<'a> Session<'a> {
    pub fn new(store: &'a mut EventStore, defaults: ItemDefaults, move_policy: MovePolicy) -> Self {
        Self {
            store,
            defaults,
            move_policy,
            selected: None,
            expanded: None,
            tab: Tab::Active,
        }
    }

    pub fn store(&self) -> &EventStore {
        &*self.store
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn expanded(&self) -> Option<DayKey> {
        self.expanded
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    /// Expands `day`, or collapses it if it is already the expanded one.
    pub fn toggle_day(&mut self, day: DayKey) {
        self.expanded = if self.expanded == Some(day) { None } else { Some(day) };
    }

    pub fn open_detail(&mut self, reference: &str) -> Result<DetailView, MillcalError> {
        let (day, item) = self.store.resolve(reference)?;
        let view = DetailView {
            day,
            actions: Action::available_for(item.status),
            item: item.clone(),
        };
        self.selected = Some(view.item.id.clone());
        Ok(view)
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    /// Applies `action` to the item in the open detail view, then closes it.
    pub fn apply(&mut self, action: Action) -> Result<Outcome, MillcalError> {
        let id = self
            .selected
            .clone()
            .ok_or_else(|| MillcalError::validation("No item is open"))?;
        let changed = self.store.transition_status(&id, action.target())?;
        self.selected = None;

        info!(id = %changed.item.id, from = changed.from.as_str(), to = changed.item.status.as_str(), "status transition");
        let mut outcome = Outcome::success(format!(
            "Task {} successfully",
            changed.item.status.as_str()
        ));
        outcome.day = Some(changed.day);
        outcome.item = Some(changed.item);
        Ok(outcome)
    }

    /// Form submission. Validation failures leave the store as it was.
    pub fn submit(&mut self, input: NewItem) -> Result<Outcome, MillcalError> {
        let added = self.store.add_item(input, &self.defaults)?;
        info!(id = %added.item.id, day = %added.day, title = %added.item.title, "item added");

        let feedback = match &added.notification {
            Some(intent) => {
                info!(
                    target: "millcal::notify",
                    assignee = %intent.assignee_id,
                    "Notification sent to {}: New task \"{}\" assigned",
                    intent.recipient(),
                    intent.item_title
                );
                info!(
                    target: "millcal::notify",
                    "Notification sent to Admin: Task \"{}\" created and assigned to {}",
                    intent.item_title,
                    intent.recipient()
                );
                format!("Task assigned to {} successfully", intent.recipient())
            }
            None => "Event added successfully".to_string(),
        };

        Ok(Outcome {
            feedback: Feedback::Success(feedback),
            day: Some(added.day),
            item: Some(added.item),
            notifications: added.notification.into_iter().collect(),
        })
    }

    /// Drag-and-drop of an item onto `target`. `source` defaults to the day
    /// the item is on. Dropping on the source day changes nothing and says nothing.
    pub fn drop_item(
        &mut self,
        reference: &str,
        source: Option<DayKey>,
        target: DayKey,
    ) -> Result<Outcome, MillcalError> {
        let (found, item) = self.store.resolve(reference)?;
        let id = item.id.clone();
        let source = source.unwrap_or(found);

        let moved = match self.store.move_item(&id, source, target, self.move_policy)? {
            Some(moved) => moved,
            None => {
                return Ok(Outcome {
                    feedback: Feedback::Success(String::new()),
                    day: Some(source),
                    item: self.store.find(&id).map(|(_, i)| i.clone()),
                    notifications: Vec::new(),
                })
            }
        };

        if self.selected.as_deref() == Some(moved.previous_id.as_str()) {
            self.selected = Some(moved.item.id.clone());
        }
        info!(from = %moved.from, to = %moved.to, id = %moved.item.id, "item moved");

        let mut outcome = Outcome::success(format!("Event moved to {}", target.short_display()));
        outcome.day = Some(moved.to);
        outcome.item = Some(moved.item);
        Ok(outcome)
    }

    /// Replaces the whole board. A window that cannot be generated leaves
    /// the store as it was.
    pub fn regenerate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        today: DayKey,
        window_days: u32,
    ) -> Result<Outcome, MillcalError> {
        let fresh = generator::generate(rng, today, window_days)?;
        self.store.replace_all(fresh);
        self.selected = None;
        self.expanded = None;
        info!(items = self.store.len(), %today, window_days, "board regenerated");
        Ok(Outcome::success(format!("Generated {} items", self.store.len())))
    }
}
