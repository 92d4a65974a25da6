// Task entity for the Taskmaster data layer

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single user-created to-do item.
///
/// The `id` is generated once at construction and is the stable identity used
/// for lookup and UI diffing. Timestamps are seconds since the Unix epoch;
/// `updated_at` equals `created_at` until the first edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub body: String,
    pub is_complete: bool,
    pub created_at: f64,
    pub updated_at: f64,
}

impl Task {
    /// Construct a new incomplete task with a fresh id and current timestamps.
    pub fn new(body: impl Into<String>) -> Self {
        let now = now_secs();
        Self {
            id: Uuid::now_v7().to_string(),
            body: body.into(),
            is_complete: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Copy of this task under a new identity with fresh timestamps.
    pub fn duplicated(&self) -> Self {
        let now = now_secs();
        Self {
            id: Uuid::now_v7().to_string(),
            body: self.body.clone(),
            is_complete: self.is_complete,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an edit in place, bumping `updated_at` when any field changes.
    pub fn apply(&mut self, edit: TaskEdit) {
        if edit.is_empty() {
            return;
        }
        if let Some(body) = edit.body {
            self.body = body;
        }
        if let Some(is_complete) = edit.is_complete {
            self.is_complete = is_complete;
        }
        self.updated_at = now_secs();
    }
}

/// A change set for the mutable fields of a [`Task`].
///
/// `None` fields are left untouched. An edit with at least one `Some` field
/// bumps `updated_at`, regardless of whether the new value differs.
#[derive(Debug, Clone, Default)]
pub struct TaskEdit {
    pub body: Option<String>,
    pub is_complete: Option<bool>,
}

impl TaskEdit {
    pub fn body(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            ..Self::default()
        }
    }

    pub fn complete(is_complete: bool) -> Self {
        Self {
            is_complete: Some(is_complete),
            ..Self::default()
        }
    }

    /// An edit that touches neither field.
    pub fn is_empty(&self) -> bool {
        self.body.is_none() && self.is_complete.is_none()
    }
}

/// Current time in seconds since the Unix epoch, with sub-second precision.
pub fn now_secs() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("System time before Unix epoch")
        .as_secs_f64()
}
