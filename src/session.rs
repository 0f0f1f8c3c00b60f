//! Session state for one user: the loaded root, its tree and the selection.
//!
//! Every user action is an [`Action`] fed through [`Session::apply`], and
//! what the result panel shows is a projection of the state via
//! [`Session::panel`]. Nothing here knows about terminals.

use crate::error::RootError;
use crate::renderer::{self, Rendered};
use crate::scanner::{self, ScanOptions};
use crate::selection::SelectionStore;
use crate::tree::Tree;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const EMPTY_SELECTION_WARNING: &str = "No files selected.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    LoadRoot(PathBuf),
    Rescan,
    SelectAll,
    DeselectAll,
    /// The complete checked set reported by the tree widget.
    UserToggle(HashSet<PathBuf>),
}

/// A successfully loaded root directory.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub root: PathBuf,
    pub tree: Tree,
    pub selection: SelectionStore,
}

impl Workspace {
    pub fn load(root: PathBuf, options: &ScanOptions) -> Self {
        let tree = scanner::scan(&root, options);
        let selection = SelectionStore::all(&tree);
        if tree.is_empty() {
            debug!(root = %root.display(), "root has no visible entries");
        }
        info!(root = %root.display(), entries = tree.len(), "loaded root");
        Workspace {
            root,
            tree,
            selection,
        }
    }

    pub fn render(&self) -> Rendered {
        renderer::render(self.tree.root(), self.selection.checked(), &self.tree)
    }
}

#[derive(Debug, Default)]
pub enum Session {
    #[default]
    NoRoot,
    InvalidRoot {
        input: PathBuf,
        error: RootError,
    },
    Loaded(Workspace),
}

/// What the result panel should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Panel {
    Idle,
    Error(String),
    Warning(&'static str),
    Diagram(String),
}

/// Check that `input` is an existing directory and make it absolute.
pub fn resolve_root(input: &Path) -> Result<PathBuf, RootError> {
    let metadata = fs::metadata(input).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => RootError::NotFound {
            path: input.to_path_buf(),
        },
        _ => RootError::Io {
            path: input.to_path_buf(),
            source,
        },
    })?;
    if !metadata.is_dir() {
        return Err(RootError::NotADirectory {
            path: input.to_path_buf(),
        });
    }
    input.canonicalize().map_err(|source| RootError::Io {
        path: input.to_path_buf(),
        source,
    })
}

impl Session {
    pub fn workspace(&self) -> Option<&Workspace> {
        match self {
            Session::Loaded(ws) => Some(ws),
            _ => None,
        }
    }

    pub fn apply(self, action: Action, options: &ScanOptions) -> Session {
        match action {
            Action::LoadRoot(input) => self.load_root(input, options),
            Action::Rescan => match self {
                Session::Loaded(ws) => {
                    // The root may have vanished or been replaced since it was loaded.
                    if let Err(error) = resolve_root(&ws.root) {
                        warn!(%error, "loaded root is no longer usable");
                        return Session::InvalidRoot {
                            input: ws.root,
                            error,
                        };
                    }
                    let tree = scanner::scan(&ws.root, options);
                    let mut selection = ws.selection;
                    selection.retain_existing(&tree);
                    debug!(root = %ws.root.display(), entries = tree.len(), "rescanned root");
                    Session::Loaded(Workspace {
                        root: ws.root,
                        tree,
                        selection,
                    })
                }
                other => other,
            },
            Action::SelectAll => self.with_selection(|tree, sel| sel.select_all(tree)),
            Action::DeselectAll => self.with_selection(|_, sel| sel.deselect_all()),
            Action::UserToggle(checked) => {
                self.with_selection(|tree, sel| sel.apply_user_toggle(tree, checked))
            }
        }
    }

    fn load_root(self, input: PathBuf, options: &ScanOptions) -> Session {
        let root = match resolve_root(&input) {
            Ok(root) => root,
            Err(error) => {
                debug!(%error, "rejected root");
                return Session::InvalidRoot { input, error };
            }
        };
        match self {
            Session::Loaded(ws) if ws.root == root => Session::Loaded(ws),
            _ => Session::Loaded(Workspace::load(root, options)),
        }
    }

    fn with_selection<F>(self, f: F) -> Session
    where
        F: FnOnce(&Tree, &mut SelectionStore) -> bool,
    {
        match self {
            Session::Loaded(mut ws) => {
                if f(&ws.tree, &mut ws.selection) {
                    debug!(checked = ws.selection.len(), "selection changed");
                }
                Session::Loaded(ws)
            }
            other => other,
        }
    }

    pub fn panel(&self) -> Panel {
        match self {
            Session::NoRoot => Panel::Idle,
            Session::InvalidRoot { input, error } => Panel::Error(format!(
                "Path not found or invalid directory: {} ({error})",
                input.display()
            )),
            Session::Loaded(ws) => match ws.render() {
                Rendered::EmptySelection => Panel::Warning(EMPTY_SELECTION_WARNING),
                Rendered::Diagram(text) => Panel::Diagram(text),
            },
        }
    }
}
