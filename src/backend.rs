// Injectable storage boundary for the task collection

use crate::task::Task;
use eyre::Result;

/// Durable storage for the task collection.
///
/// `TaskStore` owns the authoritative in-memory collection and writes through
/// to a backend on every mutation. Backends report failures through `Result`;
/// the store treats a failed flush as non-fatal.
pub trait TaskBackend {
    /// All stored tasks, in stored (insertion) order.
    fn load_all(&self) -> Result<Vec<Task>>;

    /// Persist a newly created task.
    fn insert(&mut self, task: &Task) -> Result<()>;

    /// Persist the current state of an existing task.
    fn save(&mut self, task: &Task) -> Result<()>;

    /// Remove a task by id. Removing an absent id is not an error.
    fn delete(&mut self, id: &str) -> Result<()>;

    /// Remove every stored task.
    fn clear(&mut self) -> Result<()>;
}

/// In-memory backend for tests and previews. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    tasks: Vec<Task>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded backend, in the order given.
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}

impl TaskBackend for MemoryBackend {
    fn load_all(&self) -> Result<Vec<Task>> {
        Ok(self.tasks.clone())
    }

    fn insert(&mut self, task: &Task) -> Result<()> {
        self.tasks.push(task.clone());
        Ok(())
    }

    fn save(&mut self, task: &Task) -> Result<()> {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(existing) => *existing = task.clone(),
            None => self.tasks.push(task.clone()),
        }
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        self.tasks.retain(|t| t.id != id);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.tasks.clear();
        Ok(())
    }
}
