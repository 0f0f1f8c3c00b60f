use crate::tree::Tree;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Checked paths for the tree of one root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionStore {
    checked: HashSet<PathBuf>,
}

impl SelectionStore {
    /// Everything in `tree` checked, the state after loading a root.
    pub fn all(tree: &Tree) -> Self {
        let mut store = SelectionStore::default();
        store.select_all(tree);
        store
    }

    pub fn checked(&self) -> &HashSet<PathBuf> {
        &self.checked
    }

    pub fn is_checked(&self, path: &Path) -> bool {
        self.checked.contains(path)
    }

    pub fn len(&self) -> usize {
        self.checked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checked.is_empty()
    }

    /// Always reports a change so dependent views refresh.
    pub fn select_all(&mut self, tree: &Tree) -> bool {
        self.checked = tree.flat_paths().map(Path::to_path_buf).collect();
        true
    }

    pub fn deselect_all(&mut self) -> bool {
        let changed = !self.is_empty();
        self.checked.clear();
        changed
    }

    /// Accept the full checked set reported by the tree widget.
    ///
    /// A directory that was not checked before and is checked now pulls its
    /// whole subtree in. Unchecking a directory leaves its descendants alone.
    /// Returns whether the stored set changed.
    pub fn apply_user_toggle(&mut self, tree: &Tree, mut new_checked: HashSet<PathBuf>) -> bool {
        new_checked.retain(|path| {
            let known = tree.contains(path);
            if !known {
                debug!(path = %path.display(), "ignoring toggle of unknown path");
            }
            known
        });

        let newly_checked: Vec<PathBuf> = new_checked
            .iter()
            .filter(|path| !self.checked.contains(*path))
            .filter(|path| tree.is_dir(path) == Some(true))
            .cloned()
            .collect();

        for dir in &newly_checked {
            if let Some(subtree) = tree.subtree_paths(dir) {
                new_checked.extend(subtree.map(Path::to_path_buf));
            }
        }

        if new_checked == self.checked {
            return false;
        }
        debug!(
            before = self.checked.len(),
            after = new_checked.len(),
            cascaded_dirs = newly_checked.len(),
            "selection updated"
        );
        self.checked = new_checked;
        true
    }

    /// Drop paths that no longer exist in `tree`.
    pub fn retain_existing(&mut self, tree: &Tree) {
        self.checked.retain(|path| tree.contains(path));
    }

    /// The set the tree widget would report after clicking `path`.
    pub fn toggled(&self, path: &Path) -> HashSet<PathBuf> {
        let mut next = self.checked.clone();
        if !next.remove(path) {
            next.insert(path.to_path_buf());
        }
        next
    }
}
