use std::collections::HashMap;
use std::ops::Range;
use std::path::{Path, PathBuf};

pub type NodeId = usize;

/// One filesystem entry of a scanned directory.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub path: PathBuf,
    pub parent: Option<NodeId>,
    /// `Some` for directories (possibly empty), `None` for files.
    pub children: Option<Vec<NodeId>>,
    /// Slice of the flat pre-order list holding this node and its descendants.
    subtree: Range<usize>,
}

impl Node {
    pub fn is_dir(&self) -> bool {
        self.children.is_some()
    }
}

/// Immutable result of one scan: nodes in an arena, root-level ids and the
/// flat pre-order list of every node.
#[derive(Debug, Clone)]
pub struct Tree {
    root: PathBuf,
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    flat: Vec<NodeId>,
    index: HashMap<PathBuf, NodeId>,
}

impl Tree {
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn find(&self, path: &Path) -> Option<NodeId> {
        self.index.get(path).copied()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.index.contains_key(path)
    }

    pub fn is_dir(&self, path: &Path) -> Option<bool> {
        self.find(path).map(|id| self.nodes[id].is_dir())
    }

    /// Every path in the tree, directories before files at each level.
    pub fn flat_paths(&self) -> impl Iterator<Item = &Path> + '_ {
        self.flat.iter().map(|&id| self.nodes[id].path.as_path())
    }

    /// The node at `path` followed by all of its descendants, at any depth.
    pub fn subtree_paths(&self, path: &Path) -> Option<impl Iterator<Item = &Path> + '_> {
        let id = self.find(path)?;
        let range = self.nodes[id].subtree.clone();
        Some(
            self.flat[range]
                .iter()
                .map(|&id| self.nodes[id].path.as_path()),
        )
    }
}

/// Collects scanned entries in any order and freezes them into a [`Tree`].
#[derive(Debug)]
pub struct TreeBuilder {
    root: PathBuf,
    nodes: Vec<Node>,
    index: HashMap<PathBuf, NodeId>,
}

impl TreeBuilder {
    pub fn new(root: &Path) -> Self {
        TreeBuilder {
            root: root.to_path_buf(),
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn lookup(&self, path: &Path) -> Option<NodeId> {
        self.index.get(path).copied()
    }

    /// Adds an entry under `parent` (`None` for root-level entries).
    /// A path that was already pushed keeps its first node.
    pub fn push(&mut self, path: PathBuf, is_dir: bool, parent: Option<NodeId>) -> NodeId {
        if let Some(existing) = self.lookup(&path) {
            return existing;
        }
        let id = self.nodes.len();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        self.index.insert(path.clone(), id);
        self.nodes.push(Node {
            name,
            path,
            parent,
            children: is_dir.then(Vec::new),
            subtree: 0..0,
        });
        if let Some(parent_id) = parent {
            if let Some(children) = self.nodes[parent_id].children.as_mut() {
                children.push(id);
            }
        }
        id
    }

    pub fn build(mut self) -> Tree {
        let mut roots: Vec<NodeId> = (0..self.nodes.len())
            .filter(|&id| self.nodes[id].parent.is_none())
            .collect();
        sort_siblings(&self.nodes, &mut roots);
        for id in 0..self.nodes.len() {
            if let Some(mut children) = self.nodes[id].children.take() {
                sort_siblings(&self.nodes, &mut children);
                self.nodes[id].children = Some(children);
            }
        }

        let mut flat = Vec::with_capacity(self.nodes.len());
        for &id in &roots {
            assign_preorder(&mut self.nodes, &mut flat, id);
        }

        Tree {
            root: self.root,
            nodes: self.nodes,
            roots,
            flat,
            index: self.index,
        }
    }
}

// Directories first, then case-insensitive by name.
fn sort_siblings(nodes: &[Node], ids: &mut [NodeId]) {
    ids.sort_by(|&a, &b| {
        let (a, b) = (&nodes[a], &nodes[b]);
        b.is_dir()
            .cmp(&a.is_dir())
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.name.cmp(&b.name))
    });
}

fn assign_preorder(nodes: &mut [Node], flat: &mut Vec<NodeId>, id: NodeId) {
    let start = flat.len();
    flat.push(id);
    let children = nodes[id].children.clone().unwrap_or_default();
    for child in children {
        assign_preorder(nodes, flat, child);
    }
    nodes[id].subtree = start..flat.len();
}
