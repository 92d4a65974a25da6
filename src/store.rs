// TaskStore: authoritative in-memory task collection with write-through persistence

use crate::backend::TaskBackend;
use crate::task::{Task, TaskEdit};
use eyre::Result;
use std::collections::HashMap;
use tracing::{debug, warn};

/// A mutation observed on the task collection.
///
/// `Added`/`Updated` carry the task as it stands after the mutation. `Cleared`
/// stands for "every task was removed" and is emitted once per `clear_all`.
#[derive(Debug, Clone)]
pub enum TaskChange {
    Added(Task),
    Updated(Task),
    Removed(String),
    Cleared,
}

/// Handle for removing a subscriber registered with [`TaskStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn Fn(&TaskChange)>;

/// Owns the authoritative copy of every task.
///
/// The in-memory collection is the source of truth for the lifetime of the
/// process; every mutation is flushed to the injected [`TaskBackend`]
/// synchronously, but a flush failure is logged and otherwise ignored. No
/// operation returns an error to the caller.
///
/// The live query surface is [`tasks`](TaskStore::tasks) (insertion-ordered
/// snapshot) plus [`subscribe`](TaskStore::subscribe), which observes every
/// insert, update, and removal without re-querying.
pub struct TaskStore {
    backend: Box<dyn TaskBackend>,
    tasks: HashMap<String, Task>,
    order: Vec<String>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl TaskStore {
    /// Open a store over the given backend, loading any previously stored
    /// tasks in their stored order.
    ///
    /// A load failure degrades to an empty store; it is logged, not surfaced.
    pub fn open(backend: impl TaskBackend + 'static) -> Self {
        let backend: Box<dyn TaskBackend> = Box::new(backend);

        let loaded = match backend.load_all() {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!(error = ?e, "Failed to load tasks, starting empty");
                Vec::new()
            }
        };

        let mut tasks = HashMap::with_capacity(loaded.len());
        let mut order = Vec::with_capacity(loaded.len());
        for task in loaded {
            order.push(task.id.clone());
            tasks.insert(task.id.clone(), task);
        }

        debug!(count = order.len(), "Opened task store");

        Self {
            backend,
            tasks,
            order,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Snapshot of all tasks in insertion order.
    pub fn tasks(&self) -> Vec<Task> {
        self.order
            .iter()
            .filter_map(|id| self.tasks.get(id))
            .cloned()
            .collect()
    }

    /// Look up a task by id.
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Create a task from the given body and persist it.
    ///
    /// The body is trimmed of leading and trailing whitespace; that is the
    /// only normalization applied. An empty (or empty-after-trim) body is
    /// accepted: validation belongs to the caller.
    pub fn add(&mut self, body: &str) -> Task {
        let task = Task::new(body.trim());
        debug!(id = %task.id, "Adding task");

        self.order.push(task.id.clone());
        self.tasks.insert(task.id.clone(), task.clone());

        let flushed = self.backend.insert(&task);
        self.log_flush(flushed, "insert", &task.id);
        self.notify(&TaskChange::Added(task.clone()));
        task
    }

    /// Apply an edit to an existing task, bumping `updated_at`, and persist.
    ///
    /// Returns the task after the edit, or `None` for an unknown id. An
    /// empty edit is a no-op: no flush, no notification.
    pub fn update(&mut self, id: &str, edit: TaskEdit) -> Option<Task> {
        if edit.is_empty() {
            return self.tasks.get(id).cloned();
        }

        let task = self.tasks.get_mut(id)?;
        task.apply(edit);
        let task = task.clone();

        let flushed = self.backend.save(&task);
        self.log_flush(flushed, "save", id);
        self.notify(&TaskChange::Updated(task.clone()));
        Some(task)
    }

    /// Flip a task's completion flag.
    pub fn toggle_complete(&mut self, id: &str) -> Option<Task> {
        let flipped = !self.tasks.get(id)?.is_complete;
        self.update(id, TaskEdit::complete(flipped))
    }

    /// Replace a task's body text.
    pub fn edit_body(&mut self, id: &str, body: impl Into<String>) -> Option<Task> {
        self.update(id, TaskEdit::body(body))
    }

    /// Create and persist a copy of a task under a new identity.
    ///
    /// The copy keeps the body and completion flag, gets fresh timestamps,
    /// and lands at the end of insertion order.
    pub fn duplicate(&mut self, id: &str) -> Option<Task> {
        let copy = self.tasks.get(id)?.duplicated();
        debug!(source = %id, id = %copy.id, "Duplicating task");

        self.order.push(copy.id.clone());
        self.tasks.insert(copy.id.clone(), copy.clone());

        let flushed = self.backend.insert(&copy);
        self.log_flush(flushed, "insert", &copy.id);
        self.notify(&TaskChange::Added(copy.clone()));
        Some(copy)
    }

    /// Remove a task. Removing an absent id is a no-op.
    pub fn remove(&mut self, id: &str) {
        if self.tasks.remove(id).is_none() {
            return;
        }
        self.order.retain(|existing| existing != id);

        let flushed = self.backend.delete(id);
        self.log_flush(flushed, "delete", id);
        self.notify(&TaskChange::Removed(id.to_string()));
    }

    /// Remove every task in the collection.
    pub fn clear_all(&mut self) {
        debug!(count = self.order.len(), "Clearing all tasks");
        self.tasks.clear();
        self.order.clear();

        let flushed = self.backend.clear();
        self.log_flush(flushed, "clear", "*");
        self.notify(&TaskChange::Cleared);
    }

    // ========================================================================
    // Change notification
    // ========================================================================

    /// Register a subscriber invoked on every mutation.
    ///
    /// Subscribers run after the in-memory change and the persistence flush
    /// for the mutation have both happened. No ordering is guaranteed
    /// between subscribers.
    pub fn subscribe(&mut self, subscriber: impl Fn(&TaskChange) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Drop a subscriber. Unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(existing, _)| *existing != id);
    }

    fn notify(&self, change: &TaskChange) {
        for (_, subscriber) in &self.subscribers {
            subscriber(change);
        }
    }

    // Persistence is best-effort: in-memory state stands regardless.
    fn log_flush(&self, result: Result<()>, op: &str, id: &str) {
        if let Err(e) = result {
            warn!(op, id, error = ?e, "Persistence flush failed, keeping in-memory state");
        }
    }
}
