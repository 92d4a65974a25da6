// Shared storage-container path resolution

use std::path::PathBuf;

/// Storage container shared by the phone and watch app variants. Both open
/// their task database and preferences file under this container so they
/// observe the same data.
pub const SHARED_CONTAINER: &str = "group.io.github.tsgrissom.taskmaster";

/// Directory for a named storage container under the platform data dir.
///
/// Returns `None` when the platform has no data directory (headless
/// environments); callers fall back to an explicit path.
pub fn container_dir(group: &str) -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(group))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_dir_ends_with_group_name() {
        if let Some(dir) = container_dir(SHARED_CONTAINER) {
            assert!(dir.ends_with(SHARED_CONTAINER));
        }
    }
}
