use serde::{Deserialize, Serialize};

use super::time::ScheduledTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Delivery,
    Production,
    Payment,
    Meeting,
    Cutting,
    Quality,
    Task,
    Event,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Self::Delivery,
        Self::Production,
        Self::Payment,
        Self::Meeting,
        Self::Cutting,
        Self::Quality,
        Self::Task,
        Self::Event,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delivery => "delivery",
            Self::Production => "production",
            Self::Payment => "payment",
            Self::Meeting => "meeting",
            Self::Cutting => "cutting",
            Self::Quality => "quality",
            Self::Task => "task",
            Self::Event => "event",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Pending,
    Confirmed,
    Completed,
    Overdue,
    Cancelled,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Overdue => "overdue",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "completed" => Some(Self::Completed),
            "overdue" => Some(Self::Overdue),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Statuses reachable in one step. Terminal states have none.
    pub fn next_states(&self) -> &'static [ItemStatus] {
        match self {
            Self::Pending => &[Self::Confirmed, Self::Completed, Self::Cancelled],
            Self::Confirmed | Self::Overdue => &[Self::Completed, Self::Cancelled],
            Self::Completed | Self::Cancelled => &[],
        }
    }

    pub fn can_transition_to(&self, target: ItemStatus) -> bool {
        self.next_states().contains(&target)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledItem {
    pub id: String,
    pub title: String,
    pub category: Category,
    pub scheduled_time: ScheduledTime,
    pub status: ItemStatus,
    pub priority: Priority,
    pub details: String,
    pub department: Option<String>,
    pub assigned_to: Option<String>,
    pub assigned_by: Option<String>,
    pub deadline: Option<String>,
    pub created_at: Option<String>,
}

impl ScheduledItem {
    /// Active means shown on the calendar board: anything not completed or cancelled.
    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }
}
