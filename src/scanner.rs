use crate::tree::{Tree, TreeBuilder};
use ignore::{DirEntry, WalkBuilder};
use std::ffi::OsStr;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Also skip entries matched by .gitignore and git exclude files.
    pub respect_gitignore: bool,
}

pub fn is_hidden(name: &OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

/// Walk `root` into a [`Tree`]. The caller has already checked that `root`
/// is a readable directory.
///
/// Hidden entries are pruned together with their contents, symlinks are
/// never followed, and a directory that cannot be read simply ends up with
/// no children.
pub fn scan(root: &Path, options: &ScanOptions) -> Tree {
    let mut walker = WalkBuilder::new(root);
    walker
        .standard_filters(false)
        .follow_links(false)
        .filter_entry(|entry: &DirEntry| entry.depth() == 0 || !is_hidden(entry.file_name()));

    if options.respect_gitignore {
        walker
            .git_ignore(true)
            .git_exclude(true)
            .git_global(true)
            .parents(true);
    }

    let mut builder = TreeBuilder::new(root);
    for result in walker.build() {
        let entry = match result {
            Ok(v) => v,
            Err(e) => {
                debug!(error = %e, "skipping unreadable entry during scan");
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }

        let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
        let path = entry.into_path();
        let parent = match path.parent() {
            Some(p) if p == root => None,
            Some(p) => match builder.lookup(p) {
                Some(id) => Some(id),
                None => {
                    debug!(path = %path.display(), "parent not scanned, dropping entry");
                    continue;
                }
            },
            None => continue,
        };
        builder.push(path, is_dir, parent);
    }

    let tree = builder.build();
    debug!(root = %root.display(), entries = tree.len(), "scan finished");
    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "x").unwrap();
    }

    fn relative(tree: &Tree) -> Vec<String> {
        tree.flat_paths()
            .map(|p| {
                p.strip_prefix(tree.root())
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn orders_directories_first_then_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join("readme.md"));
        touch(&root.join("src/a.txt"));
        touch(&root.join("Build.rs"));
        fs::create_dir(root.join("assets")).unwrap();

        let tree = scan(root, &ScanOptions::default());
        assert_eq!(
            relative(&tree),
            vec!["assets", "src", "src/a.txt", "Build.rs", "readme.md"]
        );
        assert_eq!(tree.is_dir(&root.join("assets")), Some(true));
        assert_eq!(tree.is_dir(&root.join("Build.rs")), Some(false));
    }

    #[test]
    fn hidden_entries_and_their_contents_are_skipped() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join(".env"));
        touch(&root.join(".git/config"));
        touch(&root.join(".git/visible.txt"));
        touch(&root.join("src/.cache"));
        touch(&root.join("src/main.rs"));

        let tree = scan(root, &ScanOptions::default());
        assert_eq!(relative(&tree), vec!["src", "src/main.rs"]);
    }

    #[test]
    fn hidden_root_is_still_scanned() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join(".config");
        touch(&root.join("app.toml"));

        let tree = scan(&root, &ScanOptions::default());
        assert_eq!(relative(&tree), vec!["app.toml"]);
    }

    #[test]
    fn flat_paths_are_unique_and_parented() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join("a/b/c/d.txt"));
        touch(&root.join("a/b/e.txt"));
        touch(&root.join("a/f.txt"));
        touch(&root.join("g.txt"));

        let tree = scan(root, &ScanOptions::default());
        let paths: Vec<PathBuf> = tree.flat_paths().map(Path::to_path_buf).collect();
        let unique: HashSet<&PathBuf> = paths.iter().collect();
        assert_eq!(unique.len(), paths.len());
        assert_eq!(paths.len(), 7);

        for path in &paths {
            let parent = path.parent().unwrap();
            assert!(
                parent == root || tree.is_dir(parent) == Some(true),
                "{} has no scanned parent",
                path.display()
            );
        }
    }

    #[test]
    fn gitignore_is_only_honoured_when_asked() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir(root.join(".git")).unwrap();
        fs::write(root.join(".gitignore"), "target/\n").unwrap();
        touch(&root.join("target/out.bin"));
        touch(&root.join("lib.rs"));

        let everything = scan(root, &ScanOptions::default());
        assert_eq!(relative(&everything), vec!["target", "target/out.bin", "lib.rs"]);

        let filtered = scan(
            root,
            &ScanOptions {
                respect_gitignore: true,
            },
        );
        assert_eq!(relative(&filtered), vec!["lib.rs"]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directories_are_leaves() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join("real/file.txt"));
        std::os::unix::fs::symlink(root.join("real"), root.join("link")).unwrap();
        std::os::unix::fs::symlink(root, root.join("real/loop")).unwrap();

        let tree = scan(root, &ScanOptions::default());
        assert_eq!(
            relative(&tree),
            vec!["real", "real/file.txt", "real/loop", "link"]
        );
        assert_eq!(tree.is_dir(&root.join("link")), Some(false));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_directory_has_no_children_and_siblings_survive() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join("locked/secret.txt"));
        touch(&root.join("open/visible.txt"));
        let locked = root.join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Mode 000 does not stop a privileged user (e.g. root in a container),
        // so check which behaviour the current user actually gets.
        let readable = fs::read_dir(&locked).is_ok();
        let tree = scan(root, &ScanOptions::default());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let id = tree.find(&locked).unwrap();
        assert_eq!(tree.is_dir(&locked), Some(true));
        if readable {
            assert_eq!(
                relative(&tree),
                vec!["locked", "locked/secret.txt", "open", "open/visible.txt"]
            );
        } else {
            assert_eq!(relative(&tree), vec!["locked", "open", "open/visible.txt"]);
            assert_eq!(tree.node(id).children.as_deref(), Some(&[][..]));
        }
    }

    // Run as an unprivileged user: `cargo test -- --ignored`.
    #[cfg(unix)]
    #[test]
    #[ignore = "needs a user that mode 000 actually locks out"]
    fn permission_denied_directory_is_empty_for_unprivileged_user() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join("locked/secret.txt"));
        let locked = root.join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let readable = fs::read_dir(&locked).is_ok();
        let tree = scan(root, &ScanOptions::default());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(!readable, "current user can read a mode 000 directory");
        assert_eq!(relative(&tree), vec!["locked"]);
    }
}
