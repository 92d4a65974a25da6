// taskmaster-core - Local data layer for the Taskmaster apps:
// durable task collection plus typed user preferences

pub mod backend;
pub mod container;
pub mod kv;
pub mod options;
pub mod prefs;
pub mod sqlite;
pub mod store;
pub mod task;

// Re-export main types for convenience
pub use backend::{MemoryBackend, TaskBackend};
pub use container::{SHARED_CONTAINER, container_dir};
pub use kv::{FileKv, KvBackend, MemoryKv, RawValue};
pub use options::{
    DateFormat, IndicatorFrame, IndicatorSymbol, QuickAddButtonStyle, ThemeAccent, ThemeBackground,
};
pub use prefs::{Key, ListenerId, PreferenceValue, PreferencesStore, keys};
pub use sqlite::SqliteBackend;
pub use store::{SubscriptionId, TaskChange, TaskStore};
pub use task::{Task, TaskEdit, now_secs};
