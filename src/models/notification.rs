use serde::{Deserialize, Serialize};

/// Request to tell an assignee about new work. Nothing here delivers it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationIntent {
    pub assignee_id: String,
    pub assignee_name: Option<String>,
    pub item_id: String,
    pub item_title: String,
}

impl NotificationIntent {
    pub fn recipient(&self) -> &str {
        self.assignee_name.as_deref().unwrap_or(&self.assignee_id)
    }
}
