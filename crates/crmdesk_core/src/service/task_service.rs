//! Task use-case service.
//!
//! # Invariants
//! - "Overdue" for `overdue` and the dashboard means pending and due before
//!   `now`. The bucket view is narrower: a task due earlier today counts as
//!   `Today`, not `Overdue`.
//! - Day boundaries are UTC calendar dates.

use crate::model::task::{NewTask, Task, TaskPatch, TaskStatus};
use crate::model::{ContactId, RecordId};
use crate::repo::EntityStore;
use crate::service::ServiceResult;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Mutually exclusive task list buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskBucket {
    /// Pending, due today.
    Today,
    /// Pending, due after today.
    Upcoming,
    /// Pending, due before today.
    Overdue,
    Completed,
}

impl TaskBucket {
    /// Classifies `task` relative to `now`.
    pub fn of(task: &Task, now: DateTime<Utc>) -> Self {
        if task.status == TaskStatus::Completed {
            return Self::Completed;
        }
        if task.is_due_on_day_of(now) {
            Self::Today
        } else if task.due_date < now {
            Self::Overdue
        } else {
            Self::Upcoming
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskBucketCounts {
    pub today: usize,
    pub upcoming: usize,
    pub overdue: usize,
    pub completed: usize,
}

impl TaskBucketCounts {
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>, now: DateTime<Utc>) -> Self {
        tasks.into_iter().fold(Self::default(), |mut counts, task| {
            match TaskBucket::of(task, now) {
                TaskBucket::Today => counts.today += 1,
                TaskBucket::Upcoming => counts.upcoming += 1,
                TaskBucket::Overdue => counts.overdue += 1,
                TaskBucket::Completed => counts.completed += 1,
            }
            counts
        })
    }
}

#[derive(Clone)]
pub struct TaskService {
    store: Arc<EntityStore<Task>>,
}

impl TaskService {
    pub fn new(store: Arc<EntityStore<Task>>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Vec<Task> {
        self.store.get_all().await
    }

    pub async fn get(&self, id: RecordId) -> Option<Task> {
        self.store.get_by_id(id).await
    }

    pub async fn by_contact(&self, contact_id: ContactId) -> Vec<Task> {
        self.store.get_by_contact_id(contact_id).await
    }

    /// Pending tasks due before `now`.
    pub async fn overdue(&self, now: DateTime<Utc>) -> Vec<Task> {
        self.store.filter(move |task| task.is_overdue(now)).await
    }

    /// Pending tasks due on `now`'s calendar date.
    pub async fn due_today(&self, now: DateTime<Utc>) -> Vec<Task> {
        self.store
            .filter(move |task| task.is_pending() && task.is_due_on_day_of(now))
            .await
    }

    pub async fn in_bucket(&self, bucket: TaskBucket, now: DateTime<Utc>) -> Vec<Task> {
        self.store
            .filter(move |task| TaskBucket::of(task, now) == bucket)
            .await
    }

    pub async fn bucket_counts(&self, now: DateTime<Utc>) -> TaskBucketCounts {
        TaskBucketCounts::from_tasks(&self.store.get_all().await, now)
    }

    /// Creates a task; new tasks always start pending.
    pub async fn create(&self, draft: NewTask) -> ServiceResult<Task> {
        draft.validate()?;
        Ok(self.store.create(draft).await)
    }

    pub async fn update(&self, id: RecordId, patch: TaskPatch) -> ServiceResult<Task> {
        patch.validate()?;
        Ok(self.store.update(id, patch).await?)
    }

    pub async fn mark_complete(&self, id: RecordId) -> ServiceResult<Task> {
        Ok(self
            .store
            .update(id, TaskPatch::status(TaskStatus::Completed))
            .await?)
    }

    /// Flips pending/completed based on the stored status, not a caller copy.
    pub async fn toggle_status(&self, id: RecordId) -> ServiceResult<Task> {
        self.store.pause_for_write().await;
        Ok(self
            .store
            .modify(id, |task| task.status = task.status.toggled())?)
    }

    pub async fn delete(&self, id: RecordId) -> ServiceResult<()> {
        Ok(self.store.delete(id).await?)
    }
}
