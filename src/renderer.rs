use crate::tree::Tree;
use std::collections::HashSet;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

pub const BRANCH: &str = "├── ";
pub const CONTINUATION: &str = "│   ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// Nothing is checked; the caller decides how to warn about it.
    EmptySelection,
    Diagram(String),
}

fn separator_count(s: &str) -> usize {
    s.chars().filter(|&c| c == MAIN_SEPARATOR).count()
}

/// Build the text diagram for `checked` under `root`.
///
/// Lines follow the plain string order of the full paths, not tree order,
/// and the indentation only depends on how many separators deeper than
/// `root` a path is. Every entry gets a branch marker, including the last
/// child of a directory.
pub fn render(root: &Path, checked: &HashSet<PathBuf>, tree: &Tree) -> Rendered {
    if checked.is_empty() {
        return Rendered::EmptySelection;
    }

    let root_str = root.to_string_lossy();
    let root_depth = separator_count(&root_str);
    let root_name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut entries: Vec<(String, &PathBuf)> = checked
        .iter()
        .filter(|path| path.as_path() != root)
        .map(|path| (path.to_string_lossy().into_owned(), path))
        .collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(format!("{}/", root_name));
    for (path_str, path) in entries {
        let depth = separator_count(&path_str).saturating_sub(root_depth);
        let mut label = CONTINUATION.repeat(depth.saturating_sub(1));
        label.push_str(BRANCH);
        label.push_str(
            &path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_default(),
        );
        if tree.is_dir(path) == Some(true) {
            label.push('/');
        }
        lines.push(label);
    }

    Rendered::Diagram(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TreeBuilder;

    fn proj() -> (PathBuf, Tree) {
        let root: PathBuf = ["/", "proj"].iter().collect();
        let mut builder = TreeBuilder::new(&root);
        let src = builder.push(root.join("src"), true, None);
        builder.push(root.join("src").join("a.txt"), false, Some(src));
        builder.push(root.join("readme.md"), false, None);
        (root, builder.build())
    }

    fn everything(tree: &Tree) -> HashSet<PathBuf> {
        tree.flat_paths().map(Path::to_path_buf).collect()
    }

    #[test]
    fn empty_selection_is_signalled() {
        let (root, tree) = proj();
        assert_eq!(
            render(&root, &HashSet::new(), &tree),
            Rendered::EmptySelection
        );
    }

    #[test]
    fn full_selection_follows_path_string_order() {
        let (root, tree) = proj();
        let rendered = render(&root, &everything(&tree), &tree);
        assert_eq!(
            rendered,
            Rendered::Diagram(
                ["proj/", "├── readme.md", "├── src/", "│   ├── a.txt"].join("\n")
            )
        );
    }

    #[test]
    fn line_count_is_one_plus_checked_entries() {
        let (root, tree) = proj();
        let Rendered::Diagram(text) = render(&root, &everything(&tree), &tree) else {
            panic!("expected a diagram");
        };
        assert_eq!(text.lines().count(), 1 + tree.flat_paths().count());
    }

    #[test]
    fn root_path_itself_is_not_listed() {
        let (root, tree) = proj();
        let mut checked = HashSet::new();
        checked.insert(root.clone());
        checked.insert(root.join("readme.md"));
        assert_eq!(
            render(&root, &checked, &tree),
            Rendered::Diagram("proj/\n├── readme.md".to_string())
        );
    }

    #[test]
    fn orphaned_entries_are_indented_by_depth_alone() {
        let (root, tree) = proj();
        let mut checked = HashSet::new();
        checked.insert(root.join("src").join("a.txt"));
        assert_eq!(
            render(&root, &checked, &tree),
            Rendered::Diagram("proj/\n│   ├── a.txt".to_string())
        );
    }

    #[test]
    fn string_order_differs_from_component_order() {
        let root: PathBuf = ["/", "r"].iter().collect();
        let mut builder = TreeBuilder::new(&root);
        let a = builder.push(root.join("a"), true, None);
        builder.push(root.join("a").join("x"), false, Some(a));
        builder.push(root.join("a-b"), false, None);
        let tree = builder.build();

        let Rendered::Diagram(text) = render(&root, &everything(&tree), &tree) else {
            panic!("expected a diagram");
        };
        let lines: Vec<&str> = text.lines().collect();
        // '-' sorts before the separator, so "a-b" comes before "a/x".
        assert_eq!(lines, vec!["r/", "├── a/", "├── a-b", "│   ├── x"]);
    }
}
