//! Follow-up task model.
//!
//! # Invariants
//! - New tasks always start `Pending`, whatever the caller asked for.

use crate::model::validation::{require_text, ModelValidationError};
use crate::model::{merge_field, ContactId, ContactLinked, InsertPosition, Record, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl TaskStatus {
    /// Flips between pending and completed.
    pub fn toggled(self) -> Self {
        match self {
            Self::Pending => Self::Completed,
            Self::Completed => Self::Pending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub contact_id: ContactId,
    pub due_date: DateTime<Utc>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
}

impl Task {
    pub fn is_pending(&self) -> bool {
        self.status == TaskStatus::Pending
    }

    /// Pending and due strictly before `now`.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.is_pending() && self.due_date < now
    }

    /// Due on the same UTC calendar date as `now`.
    pub fn is_due_on_day_of(&self, now: DateTime<Utc>) -> bool {
        self.due_date.date_naive() == now.date_naive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub contact_id: ContactId,
    pub due_date: DateTime<Utc>,
    pub priority: TaskPriority,
}

impl NewTask {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("title", &self.title)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub contact_id: Option<ContactId>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if let Some(title) = &self.title {
            require_text("title", title)?;
        }
        Ok(())
    }
}

impl Record for Task {
    type Draft = NewTask;
    type Patch = TaskPatch;

    const KIND: &'static str = "task";
    const INSERT_AT: InsertPosition = InsertPosition::Back;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: NewTask, _now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            contact_id: draft.contact_id,
            due_date: draft.due_date,
            priority: draft.priority,
            status: TaskStatus::Pending,
        }
    }

    fn apply_patch(&mut self, patch: TaskPatch) {
        merge_field(&mut self.title, patch.title);
        merge_field(&mut self.description, patch.description);
        merge_field(&mut self.contact_id, patch.contact_id);
        merge_field(&mut self.due_date, patch.due_date);
        merge_field(&mut self.priority, patch.priority);
        merge_field(&mut self.status, patch.status);
    }
}

impl ContactLinked for Task {
    fn contact_id(&self) -> Option<ContactId> {
        Some(self.contact_id)
    }
}

#[cfg(test)]
mod tests {
    use super::{NewTask, Task, TaskPriority, TaskStatus};
    use crate::model::Record;
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn overdue_requires_pending_and_past_due() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let mut task = Task::from_draft(
            Uuid::new_v4(),
            NewTask {
                title: "Send proposal".to_string(),
                description: String::new(),
                contact_id: Uuid::new_v4(),
                due_date: now - Duration::hours(1),
                priority: TaskPriority::High,
            },
            now,
        );

        assert_eq!(task.status, TaskStatus::Pending);
        assert!(task.is_overdue(now));
        assert!(task.is_due_on_day_of(now));

        task.status = TaskStatus::Completed;
        assert!(!task.is_overdue(now));
    }
}
