//! Integration tests for the Eau du Maroc storefront engine.
//!
//! The tests in `tests/` drive [`eaudumaroc_storefront::Storefront`] end to
//! end: filtering over the built-in catalog, cart edits written through to a
//! real directory, and the checkout clear on the virtual clock.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p eaudumaroc-integration-tests
//! ```

use std::path::{Path, PathBuf};

/// A unique directory under the system temp dir, removed on drop.
///
/// The directory itself is created by whoever opens a store there.
#[derive(Debug)]
pub struct TempDataDir {
    path: PathBuf,
}

impl TempDataDir {
    /// Reserve a fresh path tagged with `label`.
    #[must_use]
    pub fn new(label: &str) -> Self {
        let name = format!("eaudumaroc-{label}-{}", uuid::Uuid::new_v4());
        Self {
            path: std::env::temp_dir().join(name),
        }
    }

    /// Directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDataDir {
    fn drop(&mut self) {
        // Absent when nothing was ever written there.
        let _ = std::fs::remove_dir_all(&self.path);
    }
}
